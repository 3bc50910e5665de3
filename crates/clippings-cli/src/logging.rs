// SPDX-License-Identifier: GPL-2.0-or-later
//! Diagnostic output on stderr

use tracing_subscriber::EnvFilter;

/// How chatty a run is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Warn,
    Info,
    Debug,
}

impl Verbosity {
    /// `--debug` wins over `--verbose`
    pub fn from_flags(debug: bool, verbose: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Info
        } else {
            Self::Warn
        }
    }

    pub const fn directive(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Subscriber for one run; `RUST_LOG` overrides the flag-derived level
pub fn subscriber(verbosity: Verbosity) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
}
