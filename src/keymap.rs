//! Key bindings
//!
//! A [`KeyMap`] maps crossterm key events to [`Command`]s. Bindings are
//! rebindable and can be written as strings (`"ctrl+n"`, `"pgdown"`, `"G"`),
//! which is how configuration files express them.

use crate::navigator::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing a key description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Empty,
    UnknownKey(String),
    UnknownModifier(String),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::Empty => write!(f, "Empty key description"),
            KeyParseError::UnknownKey(key) => write!(f, "Unknown key '{}'", key),
            KeyParseError::UnknownModifier(modifier) => {
                write!(f, "Unknown modifier '{}'", modifier)
            }
        }
    }
}

impl std::error::Error for KeyParseError {}

/// A single key press: a key code plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        KeyPress { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Whether a terminal key event is this key press.
    ///
    /// Shift is ignored for characters, since the terminal already reports
    /// the shifted character (`G`, not `shift+g`), and for back-tab, which
    /// terminals report together with shift. Release events never match.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        let (mine, theirs) = match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => (
                self.modifiers - KeyModifiers::SHIFT,
                (event.modifiers & relevant) - KeyModifiers::SHIFT,
            ),
            _ => (self.modifiers, event.modifiers & relevant),
        };
        self.code == event.code && mine == theirs
    }
}

impl FromStr for KeyPress {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        // "+" alone, or a trailing "++" for ctrl++, names the plus key
        let (prefix, key) = match s.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if s == "+" => (None, "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        if let Some(prefix) = prefix {
            for part in prefix.split('+') {
                modifiers |= parse_modifier(part)?;
            }
        }

        let mut code = parse_code(key)?;
        if let KeyCode::Char(c) = code {
            if modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_alphabetic() {
                code = KeyCode::Char(c.to_ascii_uppercase());
                modifiers -= KeyModifiers::SHIFT;
            }
        }
        Ok(KeyPress { code, modifiers })
    }
}

fn parse_modifier(part: &str) -> Result<KeyModifiers, KeyParseError> {
    match part.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(KeyModifiers::CONTROL),
        "alt" | "meta" => Ok(KeyModifiers::ALT),
        "shift" => Ok(KeyModifiers::SHIFT),
        "" => Err(KeyParseError::Empty),
        _ => Err(KeyParseError::UnknownModifier(part.to_string())),
    }
}

fn parse_code(key: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "" => return Err(KeyParseError::Empty),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "esc" | "escape" => KeyCode::Esc,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pagedown" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        name => match name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => return Err(KeyParseError::UnknownKey(key.to_string())),
        },
    };
    Ok(code)
}

/// The keys that trigger one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBinding {
    keys: Vec<KeyPress>,
}

impl KeyBinding {
    pub fn new(keys: Vec<KeyPress>) -> Self {
        KeyBinding { keys }
    }

    /// Parse a binding from key descriptions
    pub fn parse<S: AsRef<str>>(keys: &[S]) -> Result<Self, KeyParseError> {
        let keys = keys
            .iter()
            .map(|k| k.as_ref().parse())
            .collect::<Result<Vec<KeyPress>, _>>()?;
        Ok(KeyBinding { keys })
    }

    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(event))
    }
}

/// Bindings for every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(Command, KeyBinding)>,
}

impl KeyMap {
    /// A map with no bindings at all
    pub fn empty() -> Self {
        KeyMap {
            bindings: Command::ALL
                .iter()
                .map(|&command| (command, KeyBinding::default()))
                .collect(),
        }
    }

    /// Replace the binding for `command`.
    pub fn bind(&mut self, command: Command, binding: KeyBinding) {
        if let Some(slot) = self.bindings.iter_mut().find(|(c, _)| *c == command) {
            slot.1 = binding;
        }
    }

    /// Builder form of [`KeyMap::bind`]
    pub fn with(mut self, command: Command, binding: KeyBinding) -> Self {
        self.bind(command, binding);
        self
    }

    pub fn binding(&self, command: Command) -> Option<&KeyBinding> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, binding)| binding)
    }

    /// The first command, in [`Command::ALL`] order, bound to this event
    pub fn command_for(&self, event: &KeyEvent) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(_, binding)| binding.matches(event))
            .map(|(command, _)| *command)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::*;
        let plain = KeyPress::plain;
        let ch = |c| KeyPress::plain(Char(c));
        let b = KeyBinding::new;

        KeyMap::empty()
            .with(Command::MoveDown, b(vec![plain(Down), ch('j'), KeyPress::ctrl('n')]))
            .with(Command::MoveUp, b(vec![plain(Up), ch('k'), KeyPress::ctrl('p')]))
            .with(Command::PageDown, b(vec![plain(PageDown), ch('f')]))
            .with(Command::PageUp, b(vec![plain(PageUp), ch('b')]))
            .with(Command::HalfPageDown, b(vec![KeyPress::ctrl('d'), ch('d')]))
            .with(Command::HalfPageUp, b(vec![KeyPress::ctrl('u'), ch('u')]))
            .with(Command::GoToTop, b(vec![plain(Home), ch('g')]))
            .with(Command::GoToBottom, b(vec![plain(End), ch('G')]))
            .with(Command::ToggleNode, b(vec![plain(Enter), ch(' ')]))
            .with(Command::OpenNode, b(vec![plain(Right), ch('l')]))
            .with(Command::CloseNode, b(vec![plain(Left), ch('h')]))
            .with(Command::Quit, b(vec![ch('q'), KeyPress::ctrl('c')]))
    }
}
