use clap::{value_parser, Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;
use std::path::PathBuf;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("arborv")
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "arborv", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "arborv", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "arborv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
