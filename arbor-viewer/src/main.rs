//! Standalone binary for the arbor interactive tree viewer.
//! Usage:
//!   arborv [path] [--config FILE] [--scroll-off N] [--log FILE] [--log-level FILTER]

mod viewer;

use arbor::Model;
use arbor_config::{ArborConfig, Loader};
use clap::{value_parser, Arg, ArgMatches, Command, ValueHint};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::app::App;
use viewer::source;

/// User configuration picked up from the working directory when present
const LOCAL_CONFIG: &str = "arbor.toml";

fn cli() -> Command {
    Command::new("arborv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive terminal viewer for JSON and YAML trees")
        .arg(
            Arg::new("path")
                .help("Tree document to open (.json, .yaml or .yml); shows a demo tree when omitted")
                .index(1)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("scroll-off")
                .long("scroll-off")
                .help("Lines of context kept above and below the cursor")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help("Write logs to this file")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter, e.g. debug or arbor=trace (defaults to RUST_LOG, then info)"),
        )
}

fn main() {
    let matches = cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    if let Some(log_path) = matches.get_one::<PathBuf>("log") {
        let filter = matches.get_one::<String>("log-level").map(String::as_str);
        init_logging(log_path, filter)?;
    }

    let config = load_config(matches)?;
    let key_map = config.keymap()?;

    let (root, title) = match matches.get_one::<PathBuf>("path") {
        Some(path) => {
            let title = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            (source::load_tree(path)?, title)
        }
        None => (source::demo_tree(), "demo".to_string()),
    };
    info!(%title, nodes = arbor::flatten::flatten(&root).len(), "tree loaded");

    let model = Model::new(root, 0, 0)
        .with_scroll_off(config.viewport.scroll_off)
        .with_key_map(key_map)
        .with_glyphs(config.glyphs.open, config.glyphs.closed);
    let mut app = App::new(model, title);
    let (width, height) = crossterm::terminal::size()?;
    app.handle_resize(width, height);

    viewer::viewer::run_viewer(&mut app)?;
    Ok(())
}

/// Defaults, then ./arbor.toml, then --config, then --scroll-off
fn load_config(matches: &ArgMatches) -> Result<ArborConfig, arbor_config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(&scroll_off) = matches.get_one::<usize>("scroll-off") {
        let scroll_off = i64::try_from(scroll_off).unwrap_or(i64::MAX);
        loader = loader.set_override("viewport.scroll_off", scroll_off)?;
    }
    loader.build()
}

/// Log to a file; the terminal belongs to the viewer.
fn init_logging(path: &Path, filter: Option<&str>) -> Result<(), Box<dyn Error>> {
    let filter = match filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| -> Box<dyn Error> { e })?;
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let matches = cli()
            .try_get_matches_from([
                "arborv",
                "tree.json",
                "-c",
                "custom.toml",
                "--scroll-off",
                "3",
                "--log",
                "arborv.log",
                "--log-level",
                "debug",
            ])
            .expect("flags to parse");
        assert_eq!(
            matches.get_one::<PathBuf>("path"),
            Some(&PathBuf::from("tree.json"))
        );
        assert_eq!(matches.get_one::<usize>("scroll-off"), Some(&3));
        assert_eq!(
            matches.get_one::<String>("log-level").map(String::as_str),
            Some("debug")
        );
    }

    #[test]
    fn path_is_optional() {
        let matches = cli()
            .try_get_matches_from(["arborv"])
            .expect("no arguments to parse");
        assert!(matches.get_one::<PathBuf>("path").is_none());
    }

    #[test]
    fn scroll_off_flag_overrides_config() {
        let matches = cli()
            .try_get_matches_from(["arborv", "--scroll-off", "1"])
            .expect("flags to parse");
        let config = load_config(&matches).expect("config to load");
        assert_eq!(config.viewport.scroll_off, 1);
    }

    #[test]
    fn rejects_negative_scroll_off() {
        let result = cli().try_get_matches_from(["arborv", "--scroll-off", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }
}
