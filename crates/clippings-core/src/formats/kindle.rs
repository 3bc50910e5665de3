// SPDX-License-Identifier: GPL-2.0-or-later
//! Near-original exporter: a per-title clippings file in the device's layout

use crate::model::{ExportFormat, TitleRecord};
use crate::traits::{Exporter, Result};

/// Line ending written by the device
const CRLF: &str = "\r\n";

/// Rebuilds the title's blocks from their raw lines.
///
/// Bookmarks are kept, so a bookmark-only title still gets a file.
pub struct KindleExporter;

impl KindleExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KindleExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for KindleExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Kindle
    }

    fn render(&self, _title: &str, record: &TitleRecord) -> Result<Option<String>> {
        if record.raw.is_empty() {
            return Ok(None);
        }

        let mut output = record.raw.join(CRLF);
        output.push_str(CRLF);
        Ok(Some(output))
    }
}
