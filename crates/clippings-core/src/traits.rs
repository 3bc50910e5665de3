// SPDX-License-Identifier: GPL-2.0-or-later
//! Exporter trait and the error type shared by parsing and exporting

use crate::model::{ClippingsLog, ExportFormat, TitleRecord};
use crate::naming::file_name;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for parsing and exporting
#[derive(Debug, thiserror::Error)]
pub enum ClippingsError {
    #[error("Unsupported kindle version: {0}")]
    UnsupportedVersion(u32),

    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not write {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ClippingsError>;

/// Exporter trait: render one title into a target format
pub trait Exporter {
    /// The format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Render a title's record, or `None` when the title gets no file
    fn render(&self, title: &str, record: &TitleRecord) -> Result<Option<String>>;

    /// Write one file per rendered title into `outdir`.
    ///
    /// Files are named after the sanitized title; an existing file with the
    /// same name is overwritten, so titles that sanitize alike leave only the
    /// last one on disk. Returns the written paths in log order.
    fn export(&self, log: &ClippingsLog, outdir: &Path) -> Result<Vec<PathBuf>> {
        let extension = self.format().extension();
        let mut written = Vec::new();

        for (title, record) in log.iter() {
            let Some(content) = self.render(title, record)? else {
                tracing::debug!(format = %self.format(), title, "Nothing to export");
                continue;
            };

            let path = outdir.join(file_name(title, extension));
            fs::write(&path, content).map_err(|source| ClippingsError::OutputFile {
                path: path.clone(),
                source,
            })?;
            tracing::info!(format = %self.format(), path = %path.display(), "Wrote file");
            written.push(path);
        }

        Ok(written)
    }
}
