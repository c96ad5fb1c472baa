/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The data files and how they are read and replaced.

use crate::error::{Result, StoreError};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DataFile {
    Languages,
    Resources,
    Culture,
    CultureSidecar,
}

impl DataFile {
    pub const ALL: [DataFile; 4] = [
        DataFile::Languages,
        DataFile::Resources,
        DataFile::Culture,
        DataFile::CultureSidecar,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DataFile::Languages => "languages.yaml",
            DataFile::Resources => "resources.yaml",
            DataFile::Culture => "culture.yaml",
            DataFile::CultureSidecar => "culture.json",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }
}

/// File content plus the fingerprint it had when read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub content: String,
    pub fingerprint: String,
}

impl Snapshot {
    pub fn of(content: String) -> Self {
        let fingerprint = fingerprint(&content);
        Self {
            content,
            fingerprint,
        }
    }
}

/// Hex SHA-256 of the content.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Snapshot::of(content))
}

/// Like [`read_snapshot`], but a missing file is `None`.
pub fn read_optional(path: &Path) -> Result<Option<Snapshot>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(Snapshot::of(content))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace `path` with `content` via a temporary file and rename.
///
/// With `expected` set, the live file is re-read first and the write is
/// abandoned if its fingerprint no longer matches. `Some(None)` expects the
/// file to be absent.
pub fn write_atomic(path: &Path, content: &str, expected: Option<Option<&str>>) -> Result<()> {
    if let Some(expected) = expected {
        let current = read_optional(path)?;
        let current = current.as_ref().map(|s| s.fingerprint.as_str());
        if current != expected {
            return Err(StoreError::Conflict {
                path: path.to_path_buf(),
            });
        }
    }

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let a = fingerprint("version: 1\n");
        assert_eq!(a, fingerprint("version: 1\n"));
        assert_ne!(a, fingerprint("version: 2\n"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_file_names_round_trip() {
        for file in DataFile::ALL {
            assert_eq!(DataFile::from_file_name(file.file_name()), Some(file));
        }
        assert_eq!(DataFile::from_file_name("passwd"), None);
    }

    #[test]
    fn test_write_detects_concurrent_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("languages.yaml");
        fs::write(&path, "a").unwrap();
        let before = read_snapshot(&path).unwrap();

        fs::write(&path, "b").unwrap();
        let err = write_atomic(&path, "c", Some(Some(&before.fingerprint))).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");

        let now = read_snapshot(&path).unwrap();
        write_atomic(&path, "c", Some(Some(&now.fingerprint))).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "c");
    }

    #[test]
    fn test_write_expecting_absence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("culture.json");
        write_atomic(&path, "{}", Some(None)).unwrap();
        assert!(write_atomic(&path, "{}", Some(None)).unwrap_err().is_conflict());
        assert!(read_optional(&dir.path().join("missing")).unwrap().is_none());
    }
}
