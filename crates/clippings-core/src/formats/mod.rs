// SPDX-License-Identifier: GPL-2.0-or-later
//! Exporters for each supported format

pub mod kindle;
pub mod plaintext;
pub mod viki;
pub mod yaml;

pub use kindle::KindleExporter;
pub use plaintext::PlainTextExporter;
pub use viki::VikiExporter;
pub use yaml::YamlExporter;

use crate::model::ExportFormat;
use crate::traits::Exporter;

impl ExportFormat {
    /// The exporter producing this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Text => Box::new(PlainTextExporter::new()),
            Self::Viki => Box::new(VikiExporter::new()),
            Self::Kindle => Box::new(KindleExporter::new()),
            Self::Yaml => Box::new(YamlExporter::new()),
        }
    }
}
