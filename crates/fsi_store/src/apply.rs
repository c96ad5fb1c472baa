/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Turning imported spreadsheet rows into canonical records.

use fsi_core::synthesis::{
    clamp_category_number, default_difficulty, IMPORT_DEFAULT_CATEGORY,
};
use fsi_core::{
    default_color, default_description, default_fsi_details, default_hours, CultureInfo,
    CultureScores, Difficulty, FsiDetails, FsiInfo, Language, LearningResource,
};
use fsi_sheets::{BasicInfoRow, CultureInfoRow, FsiDetailRow, LearningResourceRow};

const DEFAULT_FAMILY: &str = "Unknown";
const DEFAULT_FLAG: &str = "🌐";

/// Build the record for one Basic Info row.
///
/// FSI fields come from the matching FSI Details row when there is one and
/// are synthesized from the import default category otherwise. Blank
/// descriptive cells keep the value of the record being replaced.
pub fn language_from_rows(
    basic: &BasicInfoRow,
    fsi: Option<&FsiDetailRow>,
    existing: Option<&Language>,
) -> Language {
    let category = fsi
        .and_then(|row| row.category)
        .map(|c| clamp_category_number(c as f64))
        .unwrap_or(IMPORT_DEFAULT_CATEGORY);
    let key = i64::from(category);

    let defaults = default_fsi_details(key);
    let details = match fsi {
        Some(row) => FsiDetails {
            grammar: score_or(row.grammar, defaults.grammar),
            vocabulary: score_or(row.vocabulary, defaults.vocabulary),
            pronunciation: score_or(row.pronunciation, defaults.pronunciation),
            writing: score_or(row.writing, defaults.writing),
            cultural: score_or(row.cultural, defaults.cultural),
        },
        None => defaults,
    };

    let synthesized = default_difficulty(category, &details);
    let difficulty = match fsi {
        Some(row) => Difficulty {
            overall: score_or(row.overall_difficulty, synthesized.overall),
            grammar: score_or(row.grammar_difficulty, synthesized.grammar),
            pronunciation: score_or(row.pronunciation_difficulty, synthesized.pronunciation),
            vocabulary: score_or(row.vocabulary_difficulty, synthesized.vocabulary),
        },
        None => synthesized,
    };

    let description = fsi
        .map(|row| row.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_description(key).to_string());

    let keep = |value: &str, old: Option<&String>, fallback: &str| -> String {
        if !value.is_empty() {
            value.to_string()
        } else if let Some(old) = old.filter(|o| !o.is_empty()) {
            old.clone()
        } else {
            fallback.to_string()
        }
    };

    Language {
        id: basic.id.clone(),
        name: basic.name.clone(),
        native_name: keep(
            &basic.native_name,
            existing.map(|l| &l.native_name),
            &basic.name,
        ),
        regions: if basic.countries.is_empty() {
            existing.map(|l| l.regions.clone()).unwrap_or_default()
        } else {
            basic.countries.clone()
        },
        family: keep(&basic.family, existing.map(|l| &l.family), DEFAULT_FAMILY),
        subfamily: keep(&basic.subfamily, existing.map(|l| &l.subfamily), ""),
        writing_system: keep(
            &basic.writing_system,
            existing.map(|l| &l.writing_system),
            DEFAULT_FAMILY,
        ),
        speakers: basic
            .speakers
            .or_else(|| existing.map(|l| l.speakers))
            .unwrap_or(0),
        flag_emoji: keep(
            &basic.flag_emoji,
            existing.map(|l| &l.flag_emoji),
            DEFAULT_FLAG,
        ),
        color: if basic.color.is_empty() {
            default_color(key).to_string()
        } else {
            basic.color.clone()
        },
        fsi: FsiInfo {
            category,
            hours: fsi
                .and_then(|row| row.hours)
                .unwrap_or_else(|| default_hours(key)),
            description,
            details,
        },
        difficulty,
    }
}

fn score_or(value: Option<u8>, fallback: u8) -> u8 {
    value.map(|v| v.clamp(1, 5)).unwrap_or(fallback)
}

/// `None` for placeholder rows that only carry a language id.
pub fn resource_from_row(row: &LearningResourceRow) -> Option<LearningResource> {
    if !row.has_resource() {
        return None;
    }
    Some(LearningResource {
        title: row.title.clone(),
        resource_type: row.resource_type?,
        description: row.description.clone(),
        free: row.free,
        url: Some(row.url.clone()).filter(|u| !u.is_empty()),
        rating: row.rating,
    })
}

/// Culture rows need an overview and a business-use note to be saved.
pub fn culture_from_row(row: &CultureInfoRow) -> Option<CultureInfo> {
    if row.overview.is_empty() || row.business_use.is_empty() {
        return None;
    }
    // Scores are kept only as a complete set.
    let cultural_info = match (
        row.business_use_score,
        row.travel_value,
        row.cultural_richness,
        row.online_presence,
    ) {
        (Some(business_use), Some(travel_value), Some(cultural_richness), Some(online_presence)) => {
            Some(CultureScores {
                business_use: business_use.clamp(1, 5),
                travel_value: travel_value.clamp(1, 5),
                cultural_richness: cultural_richness.clamp(1, 5),
                online_presence: online_presence.clamp(1, 5),
            })
        }
        _ => None,
    };
    Some(CultureInfo {
        overview: row.overview.clone(),
        business_use: row.business_use.clone(),
        entertainment: row.entertainment.clone(),
        cuisine: row.cuisine.clone(),
        cultural_info,
    })
}

/// A culture row with nothing but its language columns filled in.
pub fn is_blank_culture_row(row: &CultureInfoRow) -> bool {
    row.overview.is_empty()
        && row.business_use.is_empty()
        && row.entertainment.is_empty()
        && row.cuisine.is_empty()
}
