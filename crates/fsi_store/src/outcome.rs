/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use crate::error::StoreError;
use serde::Serialize;
use std::path::PathBuf;

/// Result of one save operation.
///
/// Save operations never return `Err`: read and write failures become a
/// failed outcome with the underlying message, so callers have a single
/// failure shape to handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Rows that were left out without failing the save.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    pub inserted: usize,
    pub updated: usize,
    /// Set when the optimistic fingerprint check failed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub conflict: bool,
}

impl SaveOutcome {
    pub fn saved(message: impl Into<String>, backup_path: Option<PathBuf>) -> Self {
        Self {
            success: true,
            message: message.into(),
            backup_path,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn from_error(context: &str, error: &StoreError) -> Self {
        tracing::warn!(%error, "{context}");
        Self {
            success: false,
            message: format!("{context}: {error}"),
            conflict: error.is_conflict(),
            ..Self::default()
        }
    }

    pub fn with_counts(mut self, inserted: usize, updated: usize) -> Self {
        self.inserted = inserted;
        self.updated = updated;
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_skipped(mut self, skipped: Vec<String>) -> Self {
        self.skipped = skipped;
        self
    }
}
