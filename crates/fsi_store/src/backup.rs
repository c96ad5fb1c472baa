/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Append-only backup directory.
//!
//! Backups are named `<timestamp>_<file name>`, where the timestamp is
//! RFC 3339 UTC with `:` replaced by `-`. Backups taken in the same
//! millisecond get a `-<n>` suffix on the timestamp. Nothing here ever
//! removes or overwrites an existing backup.

use crate::error::{Result, StoreError};
use crate::files::DataFile;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Name used for the full culture map saved alongside file backups.
pub const CULTURE_DATASET: &str = "culture-dataset.json";

const NAME_SEPARATOR: char = '_';
const MAX_SAME_INSTANT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// Filesystem-safe timestamp taken from the name.
    pub created: String,
    /// Position among backups sharing `created`; 0 for the first.
    pub sequence: u32,
    /// Live file this backup can be restored to, if any.
    pub restores: Option<DataFile>,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` as a new backup of `original_name`.
    pub fn write(&self, original_name: &str, content: &str) -> Result<PathBuf> {
        let backup_err = |source| StoreError::Backup {
            path: self.dir.join(original_name),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(backup_err)?;

        let stamp = timestamp();
        for attempt in 0..MAX_SAME_INSTANT {
            let name = if attempt == 0 {
                format!("{stamp}{NAME_SEPARATOR}{original_name}")
            } else {
                format!("{stamp}-{attempt}{NAME_SEPARATOR}{original_name}")
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes()).map_err(backup_err)?;
                    file.sync_all().map_err(backup_err)?;
                    tracing::info!(backup = %path.display(), "wrote backup");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(backup_err(e)),
            }
        }
        Err(backup_err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "too many backups with the same timestamp",
        )))
    }

    /// All backups, newest first. A missing directory has no backups.
    pub fn list(&self) -> Result<Vec<BackupEntry>> {
        let read_err = |source| StoreError::Read {
            path: self.dir.clone(),
            source,
        };
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_err(e)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(read_err)?;
            let metadata = entry.metadata().map_err(read_err)?;
            if !metadata.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some((stamp, original)) = split_name(&file_name) else {
                continue;
            };
            let (created, sequence) = split_sequence(stamp);
            backups.push(BackupEntry {
                path: entry.path(),
                created: created.to_string(),
                sequence,
                restores: DataFile::from_file_name(original),
                file_name,
                size: metadata.len(),
            });
        }

        backups.sort_by(|a, b| {
            (&b.created, b.sequence, &b.file_name).cmp(&(&a.created, a.sequence, &a.file_name))
        });
        Ok(backups)
    }

    /// Check that `path` names a backup in this directory and return the
    /// live file it restores.
    pub fn resolve(&self, path: &Path) -> Result<(PathBuf, DataFile)> {
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else if path.starts_with(&self.dir) {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        };

        let outside = || StoreError::OutsideBackups(path.to_path_buf());
        let dir = self.dir.canonicalize().map_err(|_| outside())?;
        let resolved = candidate.canonicalize().map_err(|_| outside())?;
        if resolved.parent() != Some(dir.as_path()) {
            return Err(outside());
        }

        let target = resolved
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(split_name)
            .and_then(|(_, original)| DataFile::from_file_name(original))
            .ok_or_else(|| StoreError::UnknownBackup(path.to_path_buf()))?;
        Ok((resolved, target))
    }
}

fn timestamp() -> String {
    Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
}

fn split_name(file_name: &str) -> Option<(&str, &str)> {
    file_name
        .split_once(NAME_SEPARATOR)
        .filter(|(stamp, original)| !stamp.is_empty() && !original.is_empty())
}

/// Split `2026-01-01T00-00-00.000Z-3` into the timestamp and its
/// same-instant sequence number.
fn split_sequence(stamp: &str) -> (&str, u32) {
    stamp
        .rsplit_once('-')
        .filter(|(instant, _)| instant.ends_with('Z'))
        .and_then(|(instant, n)| n.parse().ok().map(|n| (instant, n)))
        .unwrap_or((stamp, 0))
}
