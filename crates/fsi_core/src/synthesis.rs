/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Field synthesis rules.
//!
//! Deterministic defaults for every derived field, keyed off the FSI
//! category. None of these functions fail: unrecognised input always
//! degrades to a safe default, so callers never branch on "category not
//! found".

use crate::model::{Difficulty, FsiDetails};
use serde_json::Value;

pub const MIN_CATEGORY: u8 = 0;
pub const MAX_CATEGORY: u8 = 5;

/// Category used when a lookup falls outside the tables.
pub const FALLBACK_CATEGORY: u8 = 3;

/// Category assumed for imported rows without a matching FSI row.
pub const IMPORT_DEFAULT_CATEGORY: u8 = 3;

const DETAILS: [FsiDetails; 6] = [
    FsiDetails { grammar: 1, vocabulary: 1, pronunciation: 1, writing: 1, cultural: 1 },
    FsiDetails { grammar: 2, vocabulary: 2, pronunciation: 2, writing: 1, cultural: 2 },
    FsiDetails { grammar: 3, vocabulary: 2, pronunciation: 2, writing: 2, cultural: 2 },
    FsiDetails { grammar: 3, vocabulary: 3, pronunciation: 3, writing: 3, cultural: 3 },
    FsiDetails { grammar: 4, vocabulary: 4, pronunciation: 4, writing: 3, cultural: 4 },
    FsiDetails { grammar: 5, vocabulary: 5, pronunciation: 4, writing: 5, cultural: 4 },
];

const DESCRIPTIONS: [&str; 6] = [
    "Native language (reference point for comparison)",
    "Category I: Languages closely related to English",
    "Category II: Languages similar to English",
    "Category III: Languages with linguistic and/or cultural differences from English",
    "Category IV: Languages with significant linguistic and/or cultural differences from English",
    "Category V: Exceptionally difficult languages for native English speakers",
];

const COLORS: [&str; 6] = [
    "#6B7280", // gray
    "#10B981", // green
    "#F59E0B", // yellow
    "#F97316", // orange
    "#EF4444", // red
    "#8B5CF6", // purple
];

const HOURS: [u32; 6] = [0, 600, 900, 1100, 1800, 2200];

fn table_index(category: i64) -> usize {
    if (i64::from(MIN_CATEGORY)..=i64::from(MAX_CATEGORY)).contains(&category) {
        category as usize
    } else {
        usize::from(FALLBACK_CATEGORY)
    }
}

/// Detail quintuple for a category; out-of-range categories use category 3.
pub fn default_fsi_details(category: i64) -> FsiDetails {
    DETAILS[table_index(category)]
}

pub fn default_description(category: i64) -> &'static str {
    DESCRIPTIONS[table_index(category)]
}

/// Display color: gray, green, yellow, orange, red, purple for 0..=5.
pub fn default_color(category: i64) -> &'static str {
    COLORS[table_index(category)]
}

/// Conventional study hours for a category.
pub fn default_hours(category: i64) -> u32 {
    HOURS[table_index(category)]
}

/// Coarse scores derived from the category and the detail quintuple.
pub fn default_difficulty(category: u8, details: &FsiDetails) -> Difficulty {
    Difficulty {
        overall: category.clamp(1, MAX_CATEGORY),
        grammar: details.grammar,
        pronunciation: details.pronunciation,
        vocabulary: details.vocabulary,
    }
}

/// Clamp an already-numeric category into `0..=5`.
pub fn clamp_category_number(raw: f64) -> u8 {
    if raw.is_nan() {
        return MIN_CATEGORY;
    }
    raw.trunc()
        .clamp(f64::from(MIN_CATEGORY), f64::from(MAX_CATEGORY)) as u8
}

/// Interpret any JSON shape as a category in `0..=5`.
///
/// Numbers and numeric strings are truncated then clamped. Anything else,
/// including `null` and a missing value, resolves to 0.
pub fn clamp_category(raw: Option<&Value>) -> u8 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().map(clamp_category_number).unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(clamp_category_number)
            .unwrap_or(MIN_CATEGORY),
        _ => MIN_CATEGORY,
    }
}
