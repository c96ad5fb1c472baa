/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Normalization of loosely-typed language records.
//!
//! Stored records have accumulated several spellings for the same
//! attribute (`flag` / `flagEmoji`, `writing_system` / `writingSystem`,
//! a nested `fsi` object or flat `fsiCategory` keys, ...). This module is
//! the single boundary where those shapes are reconciled into a
//! [`Language`]; nothing downstream ever sees a raw record.

use crate::error::CoreError;
use crate::model::{Difficulty, FsiDetails, FsiInfo, Language};
use crate::synthesis::{
    clamp_category, default_color, default_description, default_difficulty,
    default_fsi_details, default_hours,
};
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["id", "code", "languageId"];
const NAME_KEYS: &[&str] = &["name", "englishName", "english_name"];
const NATIVE_NAME_KEYS: &[&str] = &["nativeName", "native_name", "native"];
const REGION_KEYS: &[&str] = &["regions", "countries", "country"];
const FAMILY_KEYS: &[&str] = &["family", "languageFamily"];
const SUBFAMILY_KEYS: &[&str] = &["subfamily", "subFamily", "sub_family", "branch"];
const WRITING_KEYS: &[&str] = &["writingSystem", "writing_system", "script"];
const SPEAKER_KEYS: &[&str] = &["speakers", "totalSpeakers", "total_speakers"];
const FLAG_KEYS: &[&str] = &["flagEmoji", "flag_emoji", "flag"];
const COLOR_KEYS: &[&str] = &["color", "colour"];

const CATEGORY_KEYS: &[&str] = &["fsiCategory", "fsi_category", "category"];
const HOURS_KEYS: &[&str] = &["fsiHours", "fsi_hours", "studyHours", "study_hours", "hours"];
const DESCRIPTION_KEYS: &[&str] = &["fsiDescription", "fsi_description"];
const DETAILS_KEYS: &[&str] = &["fsiDetails", "fsi_details"];

const DEFAULT_FAMILY: &str = "Unknown";
const DEFAULT_WRITING_SYSTEM: &str = "Unknown";
const DEFAULT_FLAG: &str = "🌐";

/// Result of normalizing one raw record.
///
/// `language` is always fully populated. `missing` lists the required
/// base fields (`id`, `name`, `fsi.category`, `fsi.hours`) that the raw
/// record did not actually carry and that were filled by defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub language: Language,
    pub missing: Vec<&'static str>,
}

impl Normalized {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Reject records whose required base fields had to be invented.
    pub fn into_result(self) -> Result<Language, CoreError> {
        if self.missing.is_empty() {
            Ok(self.language)
        } else {
            Err(CoreError::IncompleteRecord {
                id: self.language.id,
                fields: self.missing.iter().map(|f| f.to_string()).collect(),
            })
        }
    }
}

/// Normalize a raw record into a canonical [`Language`].
///
/// Never fails and never mutates `raw`. `fsi.category` is always clamped
/// into `0..=5`; every derived field the record omits is synthesized.
pub fn adapt_language_data(raw: &Value) -> Language {
    normalize_language(raw).language
}

/// Like [`adapt_language_data`] but also reports which required fields
/// were absent from the raw record.
pub fn normalize_language(raw: &Value) -> Normalized {
    let empty = Map::new();
    let record = RawRecord(raw.as_object().unwrap_or(&empty));
    let fsi = record.fsi_object();
    let mut missing = Vec::new();

    let id = record.text(ID_KEYS);
    if id.is_none() {
        missing.push("id");
    }
    let id = id.unwrap_or_default();

    let name = record.text(NAME_KEYS);
    if name.is_none() {
        missing.push("name");
    }
    let name = name.unwrap_or_else(|| id.clone());

    let category_value = fsi
        .and_then(|f| f.value(&["category"]))
        .or_else(|| record.value(CATEGORY_KEYS))
        .or_else(|| record.scalar_fsi());
    if category_value.is_none() {
        missing.push("fsi.category");
    }
    let category = clamp_category(category_value);
    let lookup = i64::from(category);

    let hours = fsi
        .and_then(|f| f.value(&["hours"]))
        .or_else(|| record.value(HOURS_KEYS))
        .and_then(as_number)
        .filter(|h| *h >= 0.0);
    if hours.is_none() {
        missing.push("fsi.hours");
    }
    let hours = hours
        .map(|h| h.round() as u32)
        .unwrap_or_else(|| default_hours(lookup));

    let description = fsi
        .and_then(|f| f.text(&["description"]))
        .or_else(|| record.text(DESCRIPTION_KEYS))
        .unwrap_or_else(|| default_description(lookup).to_string());

    let details_object = fsi
        .and_then(|f| f.object(&["details"]))
        .or_else(|| record.object(DETAILS_KEYS));
    let details = read_details(details_object, default_fsi_details(lookup));

    let difficulty = match record.object(&["difficulty"]) {
        Some(d) => read_difficulty(d, default_difficulty(category, &details)),
        None => default_difficulty(category, &details),
    };

    let native_name = record.text(NATIVE_NAME_KEYS).unwrap_or_else(|| name.clone());

    let language = Language {
        regions: record.list(REGION_KEYS),
        family: record
            .text(FAMILY_KEYS)
            .unwrap_or_else(|| DEFAULT_FAMILY.to_string()),
        subfamily: record.text(SUBFAMILY_KEYS).unwrap_or_default(),
        writing_system: record
            .text(WRITING_KEYS)
            .unwrap_or_else(|| DEFAULT_WRITING_SYSTEM.to_string()),
        speakers: record.speakers(),
        flag_emoji: record
            .text(FLAG_KEYS)
            .unwrap_or_else(|| DEFAULT_FLAG.to_string()),
        color: record
            .text(COLOR_KEYS)
            .unwrap_or_else(|| default_color(lookup).to_string()),
        fsi: FsiInfo {
            category,
            hours,
            description,
            details,
        },
        difficulty,
        id,
        name,
        native_name,
    };

    Normalized { language, missing }
}

fn read_details(object: Option<RawRecord<'_>>, defaults: FsiDetails) -> FsiDetails {
    let Some(d) = object else {
        return defaults;
    };
    FsiDetails {
        grammar: d.score(&["grammar"]).unwrap_or(defaults.grammar),
        vocabulary: d.score(&["vocabulary"]).unwrap_or(defaults.vocabulary),
        pronunciation: d.score(&["pronunciation"]).unwrap_or(defaults.pronunciation),
        writing: d.score(&["writing"]).unwrap_or(defaults.writing),
        cultural: d.score(&["cultural", "culture"]).unwrap_or(defaults.cultural),
    }
}

fn read_difficulty(d: RawRecord<'_>, defaults: Difficulty) -> Difficulty {
    Difficulty {
        overall: d.score(&["overall"]).unwrap_or(defaults.overall),
        grammar: d.score(&["grammar"]).unwrap_or(defaults.grammar),
        pronunciation: d.score(&["pronunciation"]).unwrap_or(defaults.pronunciation),
        vocabulary: d.score(&["vocabulary"]).unwrap_or(defaults.vocabulary),
    }
}

/// Numbers, and strings that read as numbers once `,` and `_` separators
/// are dropped.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            cleaned.parse().ok()
        }
        _ => None,
    }
}

#[derive(Clone, Copy)]
struct RawRecord<'a>(&'a Map<String, Value>);

impl<'a> RawRecord<'a> {
    /// First alias present with a non-null value.
    fn value(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !v.is_null())
    }

    /// Non-empty trimmed text; numbers are accepted and rendered.
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    fn object(&self, keys: &[&str]) -> Option<RawRecord<'a>> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find_map(Value::as_object)
            .map(RawRecord)
    }

    /// A sequence of strings, or one string separated by `;` or `,`.
    fn list(&self, keys: &[&str]) -> Vec<String> {
        match self.value(keys) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split([';', ','])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn score(&self, keys: &[&str]) -> Option<u8> {
        self.value(keys)
            .and_then(as_number)
            .filter(|n| !n.is_nan())
            .map(|n| n.round().clamp(1.0, 5.0) as u8)
    }

    fn fsi_object(&self) -> Option<RawRecord<'a>> {
        self.object(&["fsi"])
    }

    /// Some records store the category directly as `fsi: 3`.
    fn scalar_fsi(&self) -> Option<&'a Value> {
        self.0
            .get("fsi")
            .filter(|v| v.is_number() || v.is_string())
    }

    /// Total speakers from a number, a numeric string, or a
    /// `{ total, native }` object.
    fn speakers(&self) -> u64 {
        let total = match self.value(SPEAKER_KEYS) {
            Some(Value::Object(map)) => {
                let nested = RawRecord(map);
                nested
                    .value(&["total", "count"])
                    .or_else(|| nested.value(&["native"]))
                    .and_then(as_number)
            }
            Some(other) => as_number(other),
            None => None,
        };
        total
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_record_passes_through() {
        let raw = json!({
            "id": "es",
            "name": "Spanish",
            "nativeName": "Español",
            "regions": ["Spain", "Mexico"],
            "family": "Indo-European",
            "subfamily": "Romance",
            "writingSystem": "Latin",
            "speakers": 559000000,
            "flagEmoji": "🇪🇸",
            "color": "#123456",
            "fsi": {
                "category": 1,
                "hours": 600,
                "description": "Easy",
                "details": {"grammar": 2, "vocabulary": 1, "pronunciation": 2, "writing": 1, "cultural": 1}
            },
            "difficulty": {"overall": 1, "grammar": 2, "pronunciation": 2, "vocabulary": 1}
        });
        let normalized = normalize_language(&raw);
        assert!(normalized.is_complete());
        let lang = normalized.language;
        assert_eq!(lang.native_name, "Español");
        assert_eq!(lang.color, "#123456");
        assert_eq!(lang.fsi.details.vocabulary, 1);
        assert_eq!(lang.difficulty.overall, 1);
    }

    #[test]
    fn test_aliases_are_honoured() {
        let raw = json!({
            "code": "pt",
            "englishName": "Portuguese",
            "native_name": "Português",
            "countries": "Brazil; Portugal",
            "writing_system": "Latin",
            "flag": "🇵🇹",
            "fsiCategory": "1",
            "studyHours": "600",
            "total_speakers": "264,000,000"
        });
        let lang = adapt_language_data(&raw);
        assert_eq!(lang.id, "pt");
        assert_eq!(lang.name, "Portuguese");
        assert_eq!(lang.regions, vec!["Brazil", "Portugal"]);
        assert_eq!(lang.writing_system, "Latin");
        assert_eq!(lang.flag_emoji, "🇵🇹");
        assert_eq!(lang.fsi.category, 1);
        assert_eq!(lang.fsi.hours, 600);
        assert_eq!(lang.speakers, 264_000_000);
    }

    #[test]
    fn test_missing_details_are_synthesized_from_clamped_category() {
        let raw = json!({"id": "xx", "name": "X", "fsi": {"category": 12, "hours": 10}});
        let lang = adapt_language_data(&raw);
        assert_eq!(lang.fsi.category, 5);
        assert_eq!(lang.fsi.details, default_fsi_details(5));
        assert_eq!(lang.color, default_color(5));
        assert_eq!(lang.fsi.description, default_description(5));
    }

    #[test]
    fn test_partial_details_fill_gaps() {
        let raw = json!({"id": "xx", "name": "X", "fsi": {"category": 2, "hours": 900, "details": {"grammar": 5}}});
        let lang = adapt_language_data(&raw);
        let defaults = default_fsi_details(2);
        assert_eq!(lang.fsi.details.grammar, 5);
        assert_eq!(lang.fsi.details.writing, defaults.writing);
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let normalized = normalize_language(&json!({"name": "Nameless"}));
        assert_eq!(normalized.missing, vec!["id", "fsi.category", "fsi.hours"]);
        assert_eq!(normalized.language.fsi.category, 0);
        assert!(matches!(
            normalized.into_result(),
            Err(CoreError::IncompleteRecord { .. })
        ));
    }

    #[test]
    fn test_category_zero_counts_as_present() {
        let raw = json!({"id": "en", "name": "English", "fsi": {"category": 0, "hours": 0}});
        let normalized = normalize_language(&raw);
        assert!(normalized.is_complete());
        assert_eq!(normalized.language.fsi.category, 0);
    }

    #[test]
    fn test_non_object_input_is_fully_defaulted() {
        let lang = adapt_language_data(&json!("not a record"));
        assert_eq!(lang.id, "");
        assert_eq!(lang.family, "Unknown");
        assert_eq!(lang.fsi.category, 0);
        assert_eq!(lang.fsi.details, default_fsi_details(0));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raw = json!({"id": "de", "name": "German", "fsi": 2});
        let before = raw.clone();
        let lang = adapt_language_data(&raw);
        assert_eq!(raw, before);
        assert_eq!(lang.fsi.category, 2);
    }

    #[test]
    fn test_speaker_object() {
        let raw = json!({"id": "fr", "name": "French", "speakers": {"native": 80000000, "total": 310000000}});
        assert_eq!(adapt_language_data(&raw).speakers, 310_000_000);
    }
}
