// SPDX-License-Identifier: GPL-2.0-or-later
//! Kindle Clippings Core - clippings log parser and per-book exporters
//!
//! This crate provides:
//! - A single-pass parser for the device's `My Clippings.txt` log
//! - The parsed log: per-title raw lines and fragments per location
//! - Exporters for 4 formats: plain text, viki, near-original, YAML
//! - Title helpers (filename sanitizing, author split) and viki escaping

pub mod escape;
pub mod formats;
pub mod model;
pub mod naming;
pub mod parser;
pub mod source;
pub mod traits;

pub use model::{parse_format_list, ClippingsLog, ExportFormat, Location, TitleRecord};
pub use parser::{ClippingsParser, ParseConfig, ParseOutcome, ParseWarning, WarningKind};
pub use traits::{ClippingsError, Exporter, Result};
