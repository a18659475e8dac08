//! Shared configuration loader for arbor tree views.
//!
//! `defaults/arbor.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ArborConfig`].

use arbor::keymap::{KeyBinding, KeyMap, KeyParseError};
use arbor::Command;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/arbor.default.toml");

/// Top-level configuration consumed by arbor applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ArborConfig {
    pub keys: KeysConfig,
    pub glyphs: GlyphsConfig,
    pub viewport: ViewportConfig,
}

/// Key descriptions per command, e.g. `["down", "j", "ctrl+n"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysConfig {
    pub move_down: Vec<String>,
    pub move_up: Vec<String>,
    pub page_down: Vec<String>,
    pub page_up: Vec<String>,
    pub half_page_down: Vec<String>,
    pub half_page_up: Vec<String>,
    pub go_to_top: Vec<String>,
    pub go_to_bottom: Vec<String>,
    pub toggle_node: Vec<String>,
    pub open_node: Vec<String>,
    pub close_node: Vec<String>,
    pub quit: Vec<String>,
}

impl KeysConfig {
    pub fn keys_for(&self, command: Command) -> &[String] {
        match command {
            Command::MoveDown => &self.move_down,
            Command::MoveUp => &self.move_up,
            Command::PageDown => &self.page_down,
            Command::PageUp => &self.page_up,
            Command::HalfPageDown => &self.half_page_down,
            Command::HalfPageUp => &self.half_page_up,
            Command::GoToTop => &self.go_to_top,
            Command::GoToBottom => &self.go_to_bottom,
            Command::ToggleNode => &self.toggle_node,
            Command::OpenNode => &self.open_node,
            Command::CloseNode => &self.close_node,
            Command::Quit => &self.quit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlyphsConfig {
    pub open: String,
    pub closed: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    pub scroll_off: usize,
}

impl ArborConfig {
    /// Parse the configured key descriptions into a [`KeyMap`].
    pub fn keymap(&self) -> Result<KeyMap, KeyParseError> {
        let mut map = KeyMap::empty();
        for command in Command::ALL {
            map.bind(command, KeyBinding::parse(self.keys.keys_for(command))?);
        }
        Ok(map)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text held in memory.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ArborConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ArborConfig, ConfigError> {
    Loader::new().build()
}
