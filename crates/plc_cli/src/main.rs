//! `plc`: checks a baseline and an optimized FPGA placement against the
//! device rules and reports their quality, driven by a command script.

#![warn(missing_docs)]

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use plc_cli::{resolve_config, run_script, ScriptOptions, Session, SessionError};

/// Placement legality checker and quality reporter.
#[derive(Parser, Debug)]
#[command(name = "plc", version, about = "FPGA placement checker")]
pub struct Cli {
    /// Script to run, one command per line.
    pub script: PathBuf,

    /// Suppress the banner and command echo.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the elapsed time of every command.
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored diagnostics.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `checker.toml` configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

fn run(cli: Cli) -> Result<bool, SessionError> {
    let color = match cli.color {
        ColorChoice::Auto => io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    let options = ScriptOptions {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
    };

    let config = resolve_config(cli.config.as_deref(), &cli.script)?;
    let mut session = Session::new(config)?;
    let script = session
        .source_db
        .load_file(&cli.script)
        .map_err(|source| SessionError::Read {
            path: cli.script.clone(),
            source,
        })?;

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    Ok(run_script(&mut session, script, options, &mut out, &mut err)?)
}

fn main() {
    match run(Cli::parse()) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
