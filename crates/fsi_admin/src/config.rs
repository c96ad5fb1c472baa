/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use anyhow::{Context, Result};
use fsi_store::admin::DEFAULT_MAX_UPLOAD_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_backups_dir")]
    pub backups_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            backups_dir: default_backups_dir(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_backups_dir() -> PathBuf {
    PathBuf::from("data/backups")
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

const PROJECT_CONFIG_PATHS: [&str; 2] = [".fsi-admin.toml", "fsi-admin.toml"];

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("invalid config file: {:?}", path))
    }

    /// `explicit` if given, else the first project config found, else
    /// defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for path in PROJECT_CONFIG_PATHS.iter().map(Path::new) {
            if path.exists() {
                tracing::debug!(config = ?path, "using project config");
                return Self::load(path);
            }
        }
        Ok(Self::default())
    }

    /// Command-line overrides win over the file.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, backups_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data.dir = dir;
        }
        if let Some(dir) = backups_dir {
            self.data.backups_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.import.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.data.backups_dir, PathBuf::from("data/backups"));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str("[data]\ndir = \"/srv/fsi\"\n").unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/fsi"));
        assert_eq!(config.data.backups_dir, PathBuf::from("data/backups"));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Some("elsewhere".into()), None);
        assert_eq!(config.data.dir, PathBuf::from("elsewhere"));
        assert_eq!(config.data.backups_dir, PathBuf::from("data/backups"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsi-admin.toml");
        std::fs::write(&path, "[import]\nmax_upload_bytes = 1024\n").unwrap();
        let config = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.import.max_upload_bytes, 1024);
        assert!(Config::resolve(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
