/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Versioned on-disk documents backing the catalog.
//!
//! Each data file is a YAML mapping with a `version` key and one payload
//! key. Language records are kept loosely typed so hand-edited or legacy
//! files still load through the adapter; resources and culture entries are
//! typed and keyed by language id in sorted order for stable diffs.

use crate::error::{CoreError, Result};
use crate::model::{CultureInfo, Language, LearningResource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Newest document version this crate reads and the one it writes.
pub const DOCUMENT_VERSION: u32 = 1;

fn current_version() -> u32 {
    DOCUMENT_VERSION
}

pub trait VersionedDocument: Serialize + DeserializeOwned {
    const KIND: &'static str;

    fn version(&self) -> u32;

    fn from_yaml(content: &str) -> Result<Self> {
        let document: Self = serde_yaml::from_str(content)?;
        if document.version() > DOCUMENT_VERSION {
            return Err(CoreError::UnsupportedVersion {
                document: Self::KIND,
                found: document.version(),
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(document)
    }

    fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguagesDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub languages: Vec<Value>,
}

impl LanguagesDocument {
    pub fn new(languages: Vec<Value>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            languages,
        }
    }

    /// Build from canonical records, writing them in camelCase shape.
    pub fn from_languages(languages: &[Language]) -> Result<Self> {
        let records = languages
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }
}

impl VersionedDocument for LanguagesDocument {
    const KIND: &'static str = "languages";

    fn version(&self) -> u32 {
        self.version
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, Vec<LearningResource>>,
}

impl ResourcesDocument {
    pub fn new(resources: BTreeMap<String, Vec<LearningResource>>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            resources,
        }
    }
}

impl VersionedDocument for ResourcesDocument {
    const KIND: &'static str = "resources";

    fn version(&self) -> u32 {
        self.version
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CultureDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub culture: BTreeMap<String, CultureInfo>,
}

impl CultureDocument {
    pub fn new(culture: BTreeMap<String, CultureInfo>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            culture,
        }
    }

    /// Pretty JSON of the culture map alone, for the sidecar file.
    pub fn to_json_sidecar(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.culture)?)
    }
}

impl VersionedDocument for CultureDocument {
    const KIND: &'static str = "culture";

    fn version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_version_defaults_to_current() {
        let doc = LanguagesDocument::from_yaml("languages:\n  - id: es\n").unwrap();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.languages[0]["id"], "es");
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let err = ResourcesDocument::from_yaml("version: 99\nresources: {}\n").unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedVersion { document: "resources", found: 99, .. }
        ));
    }

    #[test]
    fn test_culture_sidecar_is_plain_map() {
        let mut culture = BTreeMap::new();
        culture.insert(
            "es".to_string(),
            CultureInfo {
                overview: "o".into(),
                business_use: "b".into(),
                entertainment: vec![],
                cuisine: vec!["Paella".into()],
                cultural_info: None,
            },
        );
        let json = CultureDocument::new(culture).to_json_sidecar().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["es"]["businessUse"], "b");
        assert!(value.get("version").is_none());
    }
}
