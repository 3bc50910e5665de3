// SPDX-License-Identifier: GPL-2.0-or-later
//! Commands run against a parsed clippings log

use anyhow::{bail, Context, Result};
use clippings_core::{parse_format_list, ClippingsParser, ParseConfig, ParseOutcome};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::Config;
use crate::logging::Verbosity;

/// What a run does with the parsed log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print every title, one per line
    List,
    /// Export every title in the configured formats
    Convert,
}

impl Command {
    pub const ALL: [Self; 2] = [Self::List, Self::Convert];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Convert => "convert",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|command| command.name() == s) {
            Some(command) => Ok(command),
            None => bail!("Unknown command: {s}"),
        }
    }
}

/// Everything a command needs to know about the run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub verbosity: Verbosity,
    pub config: Config,
    pub config_files: Vec<PathBuf>,
}

impl RunContext {
    pub fn run(&self, command: Command) -> Result<()> {
        debug!("Command {} at verbosity {:?}", command, self.verbosity);
        match command {
            Command::List => self.list(&mut io::stdout().lock()),
            Command::Convert => self.convert(),
        }
    }

    /// Print the titles in the order first seen
    pub fn list(&self, out: &mut impl Write) -> Result<()> {
        let outcome = self.import()?;
        for title in outcome.log.titles() {
            writeln!(out, "{title}")?;
        }
        Ok(())
    }

    /// Run every requested exporter, in the order requested
    pub fn convert(&self) -> Result<()> {
        let formats = parse_format_list(&self.config.format)?;
        let outcome = self.import()?;
        if outcome.log.is_empty() {
            return Ok(());
        }

        let outdir = &self.config.outdir;
        fs::create_dir_all(outdir)
            .with_context(|| format!("Could not create output directory: {}", outdir.display()))?;

        for format in formats {
            let written = format.exporter().export(&outcome.log, outdir)?;
            info!("{}: wrote {} file(s) to {}", format, written.len(), outdir.display());
        }
        Ok(())
    }

    /// Print the configuration files used and the effective configuration
    pub fn print_config(&self, out: &mut impl Write) -> Result<()> {
        let files: Vec<String> = self
            .config_files
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        writeln!(out, "Configuration files: [{}]", files.join(", "))?;
        write!(out, "{}", toml::to_string(&self.config)?)?;
        Ok(())
    }

    fn import(&self) -> Result<ParseOutcome> {
        let path = &self.config.myclippings;
        if !path.exists() {
            bail!("Could not find 'My Clippings.txt': {}", path.display());
        }

        let parse_config = ParseConfig {
            kindle_version: self.config.kindle_version,
        };
        let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
        let outcome = ClippingsParser::new().parse_reader(BufReader::new(file), &parse_config)?;

        debug!(
            "Parsed {} title(s) with {} warning(s)",
            outcome.log.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }
}
