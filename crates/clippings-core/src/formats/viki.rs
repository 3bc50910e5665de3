// SPDX-License-Identifier: GPL-2.0-or-later
//! Viki wiki page exporter

use crate::escape::escape_viki;
use crate::model::{ExportFormat, TitleRecord};
use crate::naming::split_author;
use crate::traits::{Exporter, Result};

/// Vim modeline closing every page
const MODELINE: &str = "% vi: ft=viki:tw=0";

/// Viki exporter: `#TITLE`/`#AUTHOR` header, one anchor per location
pub struct VikiExporter;

impl VikiExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VikiExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for VikiExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Viki
    }

    fn render(&self, title: &str, record: &TitleRecord) -> Result<Option<String>> {
        if record.is_empty() {
            return Ok(None);
        }

        let (book, author) = split_author(title);
        let mut output = format!("#TITLE: {book}\n#AUTHOR: {author}\n\n");

        for (location, fragments) in record.sorted_entries() {
            let escaped: Vec<String> = fragments.iter().map(|f| escape_viki(f)).collect();
            output.push_str(&format!("#{location}\n"));
            output.push_str(&escaped.join("\n\n"));
            output.push_str("\n\n");
        }

        output.push('\n');
        output.push_str(MODELINE);
        output.push('\n');

        Ok(Some(output))
    }
}
