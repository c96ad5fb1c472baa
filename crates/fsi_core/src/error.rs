/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("language record {id:?} is missing required fields: {}", fields.join(", "))]
    IncompleteRecord { id: String, fields: Vec<String> },

    #[error("parse error in {0}: {1}")]
    Parse(String, String),

    #[error("unsupported {document} document version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        document: &'static str,
        found: u32,
        supported: u32,
    },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(e: serde_yaml::Error) -> Self {
        CoreError::Parse("YAML".to_string(), e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Parse("JSON".to_string(), e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
