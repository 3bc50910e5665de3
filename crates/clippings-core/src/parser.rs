// SPDX-License-Identifier: GPL-2.0-or-later
//! Clippings log parser
//!
//! The device appends one block per highlight, note or bookmark:
//!
//! ```text
//! Title (Author)
//! - Highlight Loc. 120-121 | Added on Monday
//!
//! highlighted text
//! ==========
//! ```
//!
//! The parser walks the lines with a small state machine. Malformed blocks
//! are reported as warnings and never abort the pass.

use crate::model::{ClippingsLog, Location};
use crate::source::LineSource;
use crate::traits::{ClippingsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::io::BufRead;
use tracing::{debug, warn};

/// Block terminator line
pub const SEPARATOR: &str = "==========";

/// Prefix of staged note fragments
pub const NOTE_TAG: &str = "NOTE: ";

/// The only clippings layout understood so far
pub const SUPPORTED_VERSION: u32 = 2;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- (Highlight|Note|Bookmark) Loc\. ([0-9]+)").unwrap());

/// Configuration for parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Clippings layout version written by the device
    pub kindle_version: u32,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            kindle_version: SUPPORTED_VERSION,
        }
    }
}

/// Something the parser skipped over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Zero-based physical line number
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A line where a marker was expected
    UnsupportedEntryType(String),
    /// A marker whose location does not fit a `u32`
    LocationOutOfRange(String),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnsupportedEntryType(text) => {
                write!(f, "line {}: Unsupported entry type: {}", self.line, text)
            }
            WarningKind::LocationOutOfRange(text) => {
                write!(f, "line {}: Location out of range: {}", self.line, text)
            }
        }
    }
}

/// Parse result with the warnings collected on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub log: ClippingsLog,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Highlight,
    Note,
    Bookmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    SelectingEntryType,
    CapturingHighlight(Location),
    CapturingNote(Location),
    CapturingBookmark(Location),
}

/// Parser for device clippings logs
pub struct ClippingsParser;

impl ClippingsParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete log held in memory
    pub fn parse(&self, input: &str, config: &ParseConfig) -> Result<ParseOutcome> {
        self.parse_reader(input.as_bytes(), config)
    }

    /// Parse from a buffered reader in a single pass
    pub fn parse_reader<R: BufRead>(&self, reader: R, config: &ParseConfig) -> Result<ParseOutcome> {
        if config.kindle_version != SUPPORTED_VERSION {
            return Err(ClippingsError::UnsupportedVersion(config.kindle_version));
        }

        let mut machine = Machine::default();
        for (lnum, line) in LineSource::new(reader).enumerate() {
            machine.step(lnum, line?);
        }
        Ok(machine.finish())
    }
}

impl Default for ClippingsParser {
    fn default() -> Self {
        Self::new()
    }
}

struct Machine {
    log: ClippingsLog,
    warnings: Vec<ParseWarning>,
    state: State,
    skip: bool,
    title: String,
    pending: Option<(Location, String)>,
    block: Vec<String>,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            log: ClippingsLog::new(),
            warnings: Vec::new(),
            state: State::Idle,
            skip: false,
            title: String::new(),
            pending: None,
            block: Vec::new(),
        }
    }
}

impl Machine {
    fn step(&mut self, lnum: usize, line: String) {
        self.block.push(line.clone());

        if self.skip {
            if !line.is_empty() {
                debug!("Skip: {}: {}", lnum, line);
            }
            self.skip = false;
            return;
        }

        debug!("Mode {:?}: {}: {}", self.state, lnum, line);
        match self.state {
            State::Idle => {
                self.pending = None;
                self.log.record_mut(&line);
                debug!("Title: {}", line);
                self.title = line;
                self.state = State::SelectingEntryType;
            }
            State::SelectingEntryType => self.select(lnum, line),
            State::CapturingHighlight(location) => {
                if line == SEPARATOR {
                    self.return_to_idle();
                } else {
                    debug!("Save line: {}: {}", location, line);
                    self.pending = Some((location, line));
                }
            }
            State::CapturingNote(location) => {
                if line == SEPARATOR {
                    self.return_to_idle();
                } else {
                    debug!("Save line: {}: {}", location, line);
                    self.pending = Some((location, format!("{NOTE_TAG}{line}")));
                }
            }
            State::CapturingBookmark(_) => {
                if line == SEPARATOR {
                    self.return_to_idle();
                }
            }
        }
    }

    fn select(&mut self, lnum: usize, line: String) {
        let marker = MARKER.captures(&line).map(|caps| {
            let kind = match &caps[1] {
                "Highlight" => EntryKind::Highlight,
                "Note" => EntryKind::Note,
                _ => EntryKind::Bookmark,
            };
            (kind, caps[2].parse::<Location>())
        });

        let Some((kind, parsed)) = marker else {
            self.push_warning(lnum, WarningKind::UnsupportedEntryType(line));
            return;
        };

        let Ok(location) = parsed else {
            self.push_warning(lnum, WarningKind::LocationOutOfRange(line));
            return;
        };

        self.state = match kind {
            EntryKind::Highlight => State::CapturingHighlight(location),
            EntryKind::Note => State::CapturingNote(location),
            EntryKind::Bookmark => State::CapturingBookmark(location),
        };
        self.skip = true;
        debug!("Set mode = {:?} @ {}", kind, location);
    }

    fn push_warning(&mut self, line: usize, kind: WarningKind) {
        let warning = ParseWarning { line, kind };
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Merge the staged fragment and hand the block's lines to the title
    fn return_to_idle(&mut self) {
        let record = self.log.record_mut(&self.title);
        if let Some((location, fragment)) = self.pending.take() {
            debug!("Merge lines: {}: {}", location, fragment);
            record.merge(location, vec![fragment]);
        }
        record.raw.append(&mut self.block);
        self.state = State::Idle;
    }

    fn finish(self) -> ParseOutcome {
        if self.state != State::Idle {
            debug!(
                "Input ended in mode {:?}; dropping {} unterminated line(s)",
                self.state,
                self.block.len()
            );
        }
        ParseOutcome {
            log: self.log,
            warnings: self.warnings,
        }
    }
}
