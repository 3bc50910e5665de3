// SPDX-License-Identifier: GPL-2.0-or-later
//! kindle-clippings - Convert kindle clippings to text files

mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;

use commands::{Command, RunContext};
use config::Config;
use logging::Verbosity;

/// Exit status for every fatal condition
const FATAL_EXIT: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "kindle-clippings")]
#[command(version, about = "Convert kindle clippings to text files", long_about = None)]
#[command(after_help = "kindle-clippings is free software with ABSOLUTELY NO WARRANTY under
the terms of the GNU General Public License version 2 or newer.

EXAMPLES:
    kindle-clippings --dir ~/MyClips /media/kindle/My\\ Clippings.txt
    kindle-clippings --format viki,yaml -d ~/MyClips
    kindle-clippings -c list")]
struct Cli {
    /// Path to the device's clippings log (default: My Clippings.txt)
    #[arg(value_name = "MY_CLIPPINGS")]
    input: Option<PathBuf>,

    /// Execute a command: list, convert (default: convert)
    #[arg(short, long, value_name = "COMMAND")]
    command: Option<String>,

    /// Output directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Export formats: text, viki, kindle, yaml (default: text)
    #[arg(long, value_name = "FORMAT,...")]
    format: Option<String>,

    /// Kindle clippings version (default: 2)
    #[arg(short = 'k', long = "kindle", value_name = "VERSION")]
    kindle_version: Option<u32>,

    /// Additional configuration file, read after the discovered ones
    #[arg(long = "config", value_name = "FILE")]
    config_files: Vec<PathBuf>,

    /// Print the configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Show debug messages
    #[arg(long)]
    debug: bool,

    /// Run verbosely
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags override configuration files
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.myclippings = input.clone();
        }
        if let Some(command) = &self.command {
            config.command = command.clone();
        }
        if let Some(dir) = &self.dir {
            config.outdir = dir.clone();
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        if let Some(kindle_version) = self.kindle_version {
            config.kindle_version = kindle_version;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.debug, cli.verbose);

    tracing::subscriber::with_default(logging::subscriber(verbosity), || {
        match run(cli, verbosity) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::from(FATAL_EXIT)
            }
        }
    })
}

fn run(cli: Cli, verbosity: Verbosity) -> Result<()> {
    debug!("command-line arguments: {:?}", cli);

    for path in &cli.config_files {
        if !path.is_file() {
            bail!("Configuration file not found: {}", path.display());
        }
    }

    let mut config_files = config::discover(|key| std::env::var(key).ok());
    config_files.extend(cli.config_files.iter().cloned());

    let mut config = Config::load(&config_files);
    cli.apply(&mut config);
    debug!("config: {:?}", config);

    let ctx = RunContext {
        verbosity,
        config,
        config_files,
    };

    if cli.print_config {
        return ctx.print_config(&mut std::io::stdout().lock());
    }

    let command: Command = ctx.config.command.parse()?;
    ctx.run(command)
}
