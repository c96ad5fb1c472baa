/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The canonical data store as an immutable snapshot.
//!
//! A [`Catalog`] is built once from the bundled seed documents or from a
//! data directory and is never updated in place. Writes made through the
//! store crate become visible only to catalogs loaded after them.

use crate::adapter::{normalize_language, Normalized};
use crate::detail::{build_detail, group_by_type, ExtendedLanguageDetail, ResourceGroup};
use crate::document::{
    CultureDocument, LanguagesDocument, ResourcesDocument, VersionedDocument,
};
use crate::error::Result;
use crate::model::{CultureInfo, Language, LearningResource};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Terms a language name or id must contain to be featured.
pub const FEATURED_TERMS: [&str; 4] = ["spanish", "french", "german", "mandarin"];

/// Upper bound on featured results.
pub const FEATURED_LIMIT: usize = 4;

const SEED_LANGUAGES: &str = include_str!("../../../data/languages.yaml");
const SEED_RESOURCES: &str = include_str!("../../../data/resources.yaml");
const SEED_CULTURE: &str = include_str!("../../../data/culture.yaml");

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Normalized>,
    resources: BTreeMap<String, Vec<LearningResource>>,
    culture: BTreeMap<String, CultureInfo>,
}

impl Catalog {
    /// The dataset bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_documents(
            LanguagesDocument::from_yaml(SEED_LANGUAGES)?,
            ResourcesDocument::from_yaml(SEED_RESOURCES)?,
            CultureDocument::from_yaml(SEED_CULTURE)?,
        ))
    }

    /// Raw seed documents, for initialising a data directory.
    pub fn seed_documents() -> (&'static str, &'static str, &'static str) {
        (SEED_LANGUAGES, SEED_RESOURCES, SEED_CULTURE)
    }

    pub fn from_documents(
        languages: LanguagesDocument,
        resources: ResourcesDocument,
        culture: CultureDocument,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(languages.languages.len());
        for raw in &languages.languages {
            let normalized = normalize_language(raw);
            if !seen.insert(normalized.language.id.clone()) {
                warn!(id = %normalized.language.id, "duplicate language id; keeping the first record");
                continue;
            }
            records.push(normalized);
        }
        Self {
            records,
            resources: resources.resources,
            culture: culture.culture,
        }
    }

    /// Every language in store order.
    pub fn all_languages(&self) -> impl Iterator<Item = &Language> + '_ {
        self.records.iter().map(|r| &r.language)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact id match only; names are never consulted.
    pub fn language_by_id(&self, id: &str) -> Option<&Language> {
        self.record(id).map(|r| &r.language)
    }

    fn record(&self, id: &str) -> Option<&Normalized> {
        self.records.iter().find(|r| r.language.id == id)
    }

    /// Up to [`FEATURED_LIMIT`] languages whose name or id contains one of
    /// [`FEATURED_TERMS`], in store order. May return fewer.
    pub fn featured_languages(&self) -> Vec<&Language> {
        self.all_languages()
            .filter(|lang| {
                let name = lang.name.to_lowercase();
                let id = lang.id.to_lowercase();
                FEATURED_TERMS
                    .iter()
                    .any(|term| name.contains(term) || id.contains(term))
            })
            .take(FEATURED_LIMIT)
            .collect()
    }

    /// Stored resources for a language; empty when there are none.
    pub fn learning_resources(&self, id: &str) -> &[LearningResource] {
        self.resources.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn resources_by_type(&self, id: &str) -> Vec<ResourceGroup> {
        group_by_type(self.learning_resources(id))
    }

    /// Stored culture record, if any.
    pub fn stored_culture(&self, id: &str) -> Option<&CultureInfo> {
        self.culture.get(id)
    }

    /// Stored culture record, or the templated default.
    pub fn culture_info(&self, id: &str) -> CultureInfo {
        match self.culture.get(id) {
            Some(info) => info.clone(),
            None => {
                let label = self
                    .language_by_id(id)
                    .map(|l| l.name.as_str())
                    .unwrap_or(id);
                default_culture_info(label)
            }
        }
    }

    /// Detail view for one language.
    ///
    /// Returns `None` for unknown ids, and also for records whose raw data
    /// lacked a required base field (id, name, FSI category or hours)
    /// rather than exposing a half-formed view.
    pub fn language_detail(&self, id: &str) -> Option<ExtendedLanguageDetail> {
        let record = self.record(id)?;
        if !record.is_complete() {
            warn!(
                id,
                missing = ?record.missing,
                "language record failed the integrity check"
            );
            return None;
        }
        Some(build_detail(
            &record.language,
            self.learning_resources(id),
            self.culture_info(id),
        ))
    }

    pub fn resources(&self) -> &BTreeMap<String, Vec<LearningResource>> {
        &self.resources
    }

    pub fn culture(&self) -> &BTreeMap<String, CultureInfo> {
        &self.culture
    }
}

/// Deterministic placeholder culture record for `label`.
pub fn default_culture_info(label: &str) -> CultureInfo {
    CultureInfo {
        overview: format!(
            "{label} carries a rich cultural heritage shaped by the communities that speak it."
        ),
        business_use: format!(
            "{label} is used for trade, government and everyday business in the regions where it is spoken."
        ),
        entertainment: vec![
            format!("{label}-language music"),
            format!("{label}-language film and television"),
            format!("{label} literature"),
        ],
        cuisine: vec![format!("Regional dishes from {label}-speaking communities")],
        cultural_info: None,
    }
}
