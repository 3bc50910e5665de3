// SPDX-License-Identifier: GPL-2.0-or-later
//! Configuration discovery and layering
//!
//! Settings come from built-in defaults, then every configuration file that
//! exists (system-wide, per-user, per-host, then `--config` files), then
//! command-line flags. Later sources override single keys of earlier ones.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

const FILE_NAME: &str = "kindle_clippings.toml";

/// Effective configuration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Directory receiving exported files
    pub outdir: PathBuf,
    /// Clippings layout version
    pub kindle_version: u32,
    /// Comma-separated export formats
    pub format: String,
    /// Path of the device's clippings log
    pub myclippings: PathBuf,
    /// `list` or `convert`
    pub command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("."),
            kindle_version: 2,
            format: "text".to_string(),
            myclippings: PathBuf::from("My Clippings.txt"),
            command: "convert".to_string(),
        }
    }
}

/// Keys present in one configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub outdir: Option<PathBuf>,
    pub kindle_version: Option<u32>,
    pub format: Option<String>,
    pub myclippings: Option<PathBuf>,
    pub command: Option<String>,
}

impl Config {
    /// Override the keys set in `layer`
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(outdir) = layer.outdir {
            self.outdir = outdir;
        }
        if let Some(kindle_version) = layer.kindle_version {
            self.kindle_version = kindle_version;
        }
        if let Some(format) = layer.format {
            self.format = format;
        }
        if let Some(myclippings) = layer.myclippings {
            self.myclippings = myclippings;
        }
        if let Some(command) = layer.command {
            self.command = command;
        }
    }

    /// Defaults layered with every readable file in `files`.
    ///
    /// A file that cannot be read or parsed is logged and skipped.
    pub fn load(files: &[PathBuf]) -> Self {
        let mut config = Self::default();
        for path in files {
            match read_layer(path) {
                Ok(layer) => {
                    debug!("Configuration: {}", path.display());
                    config.apply(layer);
                }
                Err(e) => error!("Error when reading configuration file: {}: {}", path.display(), e),
            }
        }
        config
    }
}

fn read_layer(path: &Path) -> anyhow::Result<ConfigLayer> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// Candidate configuration files, most general first.
///
/// `env` looks up environment variables; `%WINDIR%`, `$HOME`, `$HOSTNAME`
/// and `%USERPROFILE%` decide the candidates.
pub fn candidates(env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    match env("WINDIR") {
        Some(windir) => {
            let windir = PathBuf::from(windir.replace('\\', "/"));
            let root = windir.parent().unwrap_or(&windir);
            files.push(root.join(FILE_NAME));
        }
        None => files.push(Path::new("/etc").join(FILE_NAME)),
    }

    if let Some(home) = env("HOME") {
        let home = PathBuf::from(home.replace('\\', "/"));
        files.push(home.join(format!(".{FILE_NAME}")));
        if let Some(host) = env("HOSTNAME") {
            files.push(home.join(format!(".kindle_clippings_{host}.toml")));
        }
    } else if let Some(profile) = env("USERPROFILE") {
        files.push(PathBuf::from(profile.replace('\\', "/")).join(FILE_NAME));
    }

    files
}

/// Candidates that exist on disk
pub fn discover(env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    candidates(env).into_iter().filter(|path| path.is_file()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_unix_candidates() {
        let files = candidates(env_of(&[("HOME", "/home/reader"), ("HOSTNAME", "kobo")]));
        assert_eq!(
            files,
            vec![
                PathBuf::from("/etc/kindle_clippings.toml"),
                PathBuf::from("/home/reader/.kindle_clippings.toml"),
                PathBuf::from("/home/reader/.kindle_clippings_kobo.toml"),
            ]
        );
    }

    #[test]
    fn test_windows_candidates() {
        let files = candidates(env_of(&[
            ("WINDIR", "C:\\Windows"),
            ("USERPROFILE", "C:\\Users\\reader"),
        ]));
        assert_eq!(
            files,
            vec![
                PathBuf::from("C:/kindle_clippings.toml"),
                PathBuf::from("C:/Users/reader/kindle_clippings.toml"),
            ]
        );
    }

    #[test]
    fn test_layers_override_single_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        fs::write(&system, "format = \"viki\"\noutdir = \"/srv/clips\"\n").unwrap();
        fs::write(&user, "format = \"yaml,text\"\n").unwrap();

        let config = Config::load(&[system, user]);
        assert_eq!(config.format, "yaml,text");
        assert_eq!(config.outdir, PathBuf::from("/srv/clips"));
        assert_eq!(config.kindle_version, 2);
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "format = [not toml").unwrap();

        assert_eq!(Config::load(&[broken]), Config::default());
    }
}
