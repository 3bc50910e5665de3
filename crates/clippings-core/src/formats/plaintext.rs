// SPDX-License-Identifier: GPL-2.0-or-later
//! Plain text exporter

use crate::model::{ExportFormat, TitleRecord};
use crate::traits::{Exporter, Result};

/// Indentation in front of each `#<location>` line
const LOCATION_INDENT: usize = 60;

/// Plain text exporter: title, then every location with its fragments
pub struct PlainTextExporter;

impl PlainTextExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for PlainTextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn render(&self, title: &str, record: &TitleRecord) -> Result<Option<String>> {
        if record.is_empty() {
            return Ok(None);
        }

        let prefix = " ".repeat(LOCATION_INDENT);
        let mut output = String::new();
        output.push_str(title);
        output.push_str("\n\n");

        for (location, fragments) in record.sorted_entries() {
            output.push_str(&format!("{prefix}#{location}\n"));
            output.push_str(&fragments.join("\n\n"));
            output.push_str("\n\n");
        }

        Ok(Some(output))
    }
}
