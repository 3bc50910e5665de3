// SPDX-License-Identifier: GPL-2.0-or-later
//! Parsed clippings log
//!
//! A log maps every distinct title line to the raw source lines of its
//! blocks and to the fragments captured per location. Titles keep the order
//! in which they were first seen in the source file.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::traits::ClippingsError;

/// Position marker within a book, as printed after `Loc.` in a marker line
pub type Location = u32;

/// Export format identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Text,
    Viki,
    Kindle,
    Yaml,
}

impl ExportFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Viki => "txt",
            Self::Kindle => "kindle",
            Self::Yaml => "yml",
        }
    }

    /// Identifier used on the command line and in configuration files
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Viki => "viki",
            Self::Kindle => "kindle",
            Self::Yaml => "yaml",
        }
    }

    /// All formats in documentation order
    pub const ALL: [Self; 4] = [Self::Text, Self::Viki, Self::Kindle, Self::Yaml];
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ClippingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ClippingsError::UnknownFormat(s.to_string()))
    }
}

/// Parse a comma-separated format list such as `"text,yaml"`.
///
/// Items are trimmed and empty items are ignored; the list order is kept.
pub fn parse_format_list(list: &str) -> Result<Vec<ExportFormat>, ClippingsError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ExportFormat::from_str)
        .collect()
}

/// Everything captured for one title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRecord {
    /// Source lines of every block of this title, in source order
    pub raw: Vec<String>,
    /// Fragments per location, in encounter order within a location
    pub entries: BTreeMap<Location, Vec<String>>,
}

impl TitleRecord {
    /// Append fragments for a location, keeping any already captured there
    pub(crate) fn merge(&mut self, location: Location, fragments: Vec<String>) {
        self.entries.entry(location).or_default().extend(fragments);
    }

    /// Locations in ascending numeric order with their fragments
    pub fn sorted_entries(&self) -> impl Iterator<Item = (Location, &[String])> {
        self.entries
            .iter()
            .map(|(location, fragments)| (*location, fragments.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full parse result, keyed by title line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClippingsLog {
    records: Vec<(String, TitleRecord)>,
    index: HashMap<String, usize>,
}

impl ClippingsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `title`, created on first sight
    pub(crate) fn record_mut(&mut self, title: &str) -> &mut TitleRecord {
        let slot = match self.index.get(title) {
            Some(&slot) => slot,
            None => {
                let slot = self.records.len();
                self.records.push((title.to_string(), TitleRecord::default()));
                self.index.insert(title.to_string(), slot);
                slot
            }
        };
        &mut self.records[slot].1
    }

    pub fn get(&self, title: &str) -> Option<&TitleRecord> {
        self.index.get(title).map(|&slot| &self.records[slot].1)
    }

    /// Titles in the order first encountered
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(title, _)| title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TitleRecord)> {
        self.records
            .iter()
            .map(|(title, record)| (title.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_keep_first_seen_order() {
        let mut log = ClippingsLog::new();
        log.record_mut("B");
        log.record_mut("A");
        log.record_mut("B");

        assert_eq!(log.titles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_merge_appends_fragments() {
        let mut record = TitleRecord::default();
        record.merge(7, vec!["first".to_string()]);
        record.merge(7, vec!["second".to_string()]);

        assert_eq!(record.entries[&7], vec!["first", "second"]);
    }

    #[test]
    fn test_sorted_entries_are_numeric() {
        let mut record = TitleRecord::default();
        record.merge(100, vec!["c".to_string()]);
        record.merge(9, vec!["a".to_string()]);
        record.merge(20, vec!["b".to_string()]);

        let locations: Vec<_> = record.sorted_entries().map(|(loc, _)| loc).collect();
        assert_eq!(locations, vec![9, 20, 100]);
    }

    #[test]
    fn test_parse_format_list() {
        let formats = parse_format_list("text, yaml,,kindle").unwrap();
        assert_eq!(
            formats,
            vec![ExportFormat::Text, ExportFormat::Yaml, ExportFormat::Kindle]
        );
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = parse_format_list("text,html").unwrap_err();
        assert!(matches!(err, ClippingsError::UnknownFormat(name) if name == "html"));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::Text.extension(), "txt");
        assert_eq!(ExportFormat::Viki.extension(), "txt");
        assert_eq!(ExportFormat::Kindle.extension(), "kindle");
        assert_eq!(ExportFormat::Yaml.extension(), "yml");
    }
}
