/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Browse, filter, search and compare over a [`Catalog`].

use crate::catalog::Catalog;
use crate::geography::infer_continents;
use crate::model::Language;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Store order.
    #[default]
    Store,
    Name,
    Category,
    Hours,
    Speakers,
}

#[derive(Debug, Clone, Default)]
pub struct LanguageQuery {
    pub categories: Vec<u8>,
    pub family: Option<String>,
    pub continent: Option<String>,
    pub search: Option<String>,
    pub sort: SortKey,
    pub descending: bool,
}

impl LanguageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: u8) -> Self {
        self.categories.push(category);
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey, descending: bool) -> Self {
        self.sort = key;
        self.descending = descending;
        self
    }

    pub fn matches(&self, language: &Language) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&language.fsi.category) {
            return false;
        }
        if let Some(family) = &self.family {
            let family = family.trim();
            if !language.family.eq_ignore_ascii_case(family)
                && !language.subfamily.eq_ignore_ascii_case(family)
            {
                return false;
            }
        }
        if let Some(continent) = &self.continent {
            let continents = infer_continents(&language.regions);
            if !continents
                .iter()
                .any(|c| c.eq_ignore_ascii_case(continent.trim()))
            {
                return false;
            }
        }
        if let Some(text) = &self.search {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() && !search_haystack(language).any(|h| h.contains(&needle)) {
                return false;
            }
        }
        true
    }

    /// Matching languages, sorted; ties keep store order.
    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Language> {
        let mut results: Vec<&Language> =
            catalog.all_languages().filter(|l| self.matches(l)).collect();
        if self.sort != SortKey::Store {
            results.sort_by(|a, b| {
                let ordering = compare_by(self.sort, a, b);
                if self.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        } else if self.descending {
            results.reverse();
        }
        results
    }
}

fn search_haystack(language: &Language) -> impl Iterator<Item = String> + '_ {
    [
        &language.id,
        &language.name,
        &language.native_name,
        &language.family,
        &language.subfamily,
    ]
    .into_iter()
    .chain(language.regions.iter())
    .map(|s| s.to_lowercase())
}

fn compare_by(key: SortKey, a: &Language, b: &Language) -> Ordering {
    match key {
        SortKey::Store => Ordering::Equal,
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Category => a.fsi.category.cmp(&b.fsi.category),
        SortKey::Hours => a.fsi.hours.cmp(&b.fsi.hours),
        SortKey::Speakers => a.speakers.cmp(&b.speakers),
    }
}

pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub languages: Vec<Language>,
    pub unknown_ids: Vec<String>,
    pub easiest: Option<String>,
    pub hardest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("need at least 2 languages to compare, got {0}")]
    TooFew(usize),
    #[error("can compare at most 4 languages, got {0}")]
    TooMany(usize),
}

/// Side-by-side view of 2–4 languages looked up by exact id.
///
/// Unknown ids are reported rather than matched loosely. Easiest and
/// hardest are ranked by category, then study hours.
pub fn compare_languages(catalog: &Catalog, ids: &[&str]) -> Result<Comparison, CompareError> {
    if ids.len() < MIN_COMPARE {
        return Err(CompareError::TooFew(ids.len()));
    }
    if ids.len() > MAX_COMPARE {
        return Err(CompareError::TooMany(ids.len()));
    }

    let mut languages = Vec::new();
    let mut unknown_ids = Vec::new();
    for id in ids {
        match catalog.language_by_id(id) {
            Some(lang) if !languages.iter().any(|l: &Language| l.id == lang.id) => {
                languages.push(lang.clone())
            }
            Some(_) => {}
            None => unknown_ids.push(id.to_string()),
        }
    }

    let rank = |l: &&Language| (l.fsi.category, l.fsi.hours);
    let easiest = languages.iter().min_by_key(rank).map(|l| l.id.clone());
    let hardest = languages.iter().max_by_key(rank).map(|l| l.id.clone());

    Ok(Comparison {
        languages,
        unknown_ids,
        easiest,
        hardest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CultureDocument, LanguagesDocument, ResourcesDocument};
    use serde_json::json;

    fn sample() -> Catalog {
        Catalog::from_documents(
            LanguagesDocument::new(vec![
                json!({"id": "es", "name": "Spanish", "family": "Indo-European", "subfamily": "Romance",
                       "regions": ["Spain", "Mexico"], "speakers": 559000000, "fsi": {"category": 1, "hours": 600}}),
                json!({"id": "ja", "name": "Japanese", "family": "Japonic", "regions": ["Japan"],
                       "speakers": 125000000, "fsi": {"category": 5, "hours": 2200}}),
                json!({"id": "fr", "name": "French", "family": "Indo-European", "subfamily": "Romance",
                       "regions": ["France", "Canada"], "speakers": 310000000, "fsi": {"category": 1, "hours": 750}}),
            ]),
            ResourcesDocument::default(),
            CultureDocument::default(),
        )
    }

    fn ids(langs: &[&Language]) -> Vec<String> {
        langs.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_category_and_family() {
        let cat = sample();
        let result = LanguageQuery::new().category(1).family("romance").run(&cat);
        assert_eq!(ids(&result), vec!["es", "fr"]);
    }

    #[test]
    fn test_filter_by_continent() {
        let cat = sample();
        let result = LanguageQuery::new().continent("north america").run(&cat);
        assert_eq!(ids(&result), vec!["es", "fr"]);
    }

    #[test]
    fn test_search_matches_regions() {
        let cat = sample();
        assert_eq!(ids(&LanguageQuery::new().search("JAPAN").run(&cat)), vec!["ja"]);
        assert_eq!(LanguageQuery::new().search("   ").run(&cat).len(), 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let cat = sample();
        let result = LanguageQuery::new().sort_by(SortKey::Category, false).run(&cat);
        assert_eq!(ids(&result), vec!["es", "fr", "ja"]);
        let result = LanguageQuery::new().sort_by(SortKey::Speakers, true).run(&cat);
        assert_eq!(ids(&result), vec!["es", "fr", "ja"]);
    }

    #[test]
    fn test_compare_reports_unknown_ids() {
        let cat = sample();
        let comparison = compare_languages(&cat, &["fr", "ja", "spanish"]).unwrap();
        assert_eq!(comparison.languages.len(), 2);
        assert_eq!(comparison.unknown_ids, vec!["spanish"]);
        assert_eq!(comparison.easiest.as_deref(), Some("fr"));
        assert_eq!(comparison.hardest.as_deref(), Some("ja"));
    }

    #[test]
    fn test_compare_bounds() {
        let cat = sample();
        assert_eq!(compare_languages(&cat, &["es"]), Err(CompareError::TooFew(1)));
        assert!(matches!(
            compare_languages(&cat, &["a", "b", "c", "d", "e"]),
            Err(CompareError::TooMany(5))
        ));
    }
}
