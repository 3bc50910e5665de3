// SPDX-License-Identifier: GPL-2.0-or-later
//! YAML exporter

use crate::escape::escape_viki;
use crate::model::{ExportFormat, TitleRecord};
use crate::naming::split_author;
use crate::traits::{ClippingsError, Exporter, Result};
use serde_yaml::{Mapping, Value};

/// YAML exporter: `author`, `title`, then one key per location
pub struct YamlExporter;

impl YamlExporter {
    pub fn new() -> Self {
        Self
    }

    fn to_mapping(title: &str, record: &TitleRecord) -> Mapping {
        let (book, author) = split_author(title);
        let mut mapping = Mapping::new();
        mapping.insert("author".into(), author.into());
        mapping.insert("title".into(), book.into());

        for (location, fragments) in record.sorted_entries() {
            let escaped: Vec<String> = fragments.iter().map(|f| escape_viki(f)).collect();
            mapping.insert(Value::from(location), Value::from(escaped.join("\n\n")));
        }

        mapping
    }
}

impl Default for YamlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for YamlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Yaml
    }

    fn render(&self, title: &str, record: &TitleRecord) -> Result<Option<String>> {
        if record.is_empty() {
            return Ok(None);
        }

        let mapping = Self::to_mapping(title, record);
        serde_yaml::to_string(&mapping)
            .map(Some)
            .map_err(|e| ClippingsError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_document() {
        let mut record = TitleRecord::default();
        record.merge(120, vec!["Use $var".to_string()]);
        record.merge(7, vec!["one".to_string(), "two".to_string()]);

        let output = YamlExporter::new()
            .render("Flatland (Edwin A. Abbott)", &record)
            .unwrap()
            .unwrap();
        let doc: Mapping = serde_yaml::from_str(&output).unwrap();

        assert_eq!(doc["author"], Value::from("Edwin A. Abbott"));
        assert_eq!(doc["title"], Value::from("Flatland "));
        assert_eq!(doc[&Value::from(7u32)], Value::from("one\n\ntwo"));
        assert_eq!(doc[&Value::from(120u32)], Value::from("Use \\$var"));

        let keys: Vec<&Value> = doc.keys().collect();
        assert_eq!(keys[2], &Value::from(7u32));
        assert_eq!(keys[3], &Value::from(120u32));
    }

    #[test]
    fn test_empty_record_renders_nothing() {
        let output = YamlExporter::new()
            .render("Book", &TitleRecord::default())
            .unwrap();
        assert!(output.is_none());
    }
}
