/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Sheet names, column headers and typed row records.
//!
//! Row structs carry what the sheet actually contained: text columns are
//! empty strings when blank and numeric columns are `None`, so validation
//! can tell a blank cell from a zero.

use fsi_core::ResourceType;
use serde::Serialize;

pub const BASIC_INFO: &str = "Basic Info";
pub const FSI_DETAILS: &str = "FSI Details";
pub const LEARNING_RESOURCES: &str = "Learning Resources";
pub const CULTURE_INFO: &str = "Culture Info";

/// Sheet names in workbook order.
pub const SHEET_NAMES: [&str; 4] = [BASIC_INFO, FSI_DETAILS, LEARNING_RESOURCES, CULTURE_INFO];

/// Separator for list-valued cells.
pub const LIST_SEPARATOR: &str = "; ";

pub mod col {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Name";
    pub const NATIVE_NAME: &str = "Native Name";
    pub const COUNTRIES: &str = "Countries";
    pub const FAMILY: &str = "Family";
    pub const SUBFAMILY: &str = "Subfamily";
    pub const WRITING_SYSTEM: &str = "Writing System";
    pub const SPEAKERS: &str = "Speakers";
    pub const FLAG_EMOJI: &str = "Flag Emoji";
    pub const COLOR: &str = "Color";

    pub const LANGUAGE_ID: &str = "Language ID";
    pub const LANGUAGE_NAME: &str = "Language Name";
    pub const FSI_CATEGORY: &str = "FSI Category";
    pub const STUDY_HOURS: &str = "Study Hours";
    pub const DESCRIPTION: &str = "Description";
    pub const GRAMMAR: &str = "Grammar";
    pub const VOCABULARY: &str = "Vocabulary";
    pub const PRONUNCIATION: &str = "Pronunciation";
    pub const WRITING: &str = "Writing";
    pub const CULTURAL: &str = "Cultural";
    pub const OVERALL_DIFFICULTY: &str = "Overall Difficulty";
    pub const GRAMMAR_DIFFICULTY: &str = "Grammar Difficulty";
    pub const PRONUNCIATION_DIFFICULTY: &str = "Pronunciation Difficulty";
    pub const VOCABULARY_DIFFICULTY: &str = "Vocabulary Difficulty";

    pub const RESOURCE_TITLE: &str = "Resource Title";
    pub const RESOURCE_TYPE: &str = "Resource Type";
    pub const RESOURCE_DESCRIPTION: &str = "Resource Description";
    pub const FREE: &str = "Free";
    pub const URL: &str = "URL";
    pub const RATING: &str = "Rating";

    pub const OVERVIEW: &str = "Overview";
    pub const BUSINESS_USE: &str = "Business Use";
    pub const ENTERTAINMENT: &str = "Entertainment";
    pub const CUISINE: &str = "Cuisine";
    pub const BUSINESS_USE_SCORE: &str = "Business Use Score";
    pub const TRAVEL_VALUE: &str = "Travel Value";
    pub const CULTURAL_RICHNESS: &str = "Cultural Richness";
    pub const ONLINE_PRESENCE: &str = "Online Presence";
}

pub const BASIC_INFO_HEADERS: [&str; 10] = [
    col::ID,
    col::NAME,
    col::NATIVE_NAME,
    col::COUNTRIES,
    col::FAMILY,
    col::SUBFAMILY,
    col::WRITING_SYSTEM,
    col::SPEAKERS,
    col::FLAG_EMOJI,
    col::COLOR,
];

pub const FSI_DETAILS_HEADERS: [&str; 14] = [
    col::LANGUAGE_ID,
    col::LANGUAGE_NAME,
    col::FSI_CATEGORY,
    col::STUDY_HOURS,
    col::DESCRIPTION,
    col::GRAMMAR,
    col::VOCABULARY,
    col::PRONUNCIATION,
    col::WRITING,
    col::CULTURAL,
    col::OVERALL_DIFFICULTY,
    col::GRAMMAR_DIFFICULTY,
    col::PRONUNCIATION_DIFFICULTY,
    col::VOCABULARY_DIFFICULTY,
];

pub const LEARNING_RESOURCES_HEADERS: [&str; 8] = [
    col::LANGUAGE_ID,
    col::LANGUAGE_NAME,
    col::RESOURCE_TITLE,
    col::RESOURCE_TYPE,
    col::RESOURCE_DESCRIPTION,
    col::FREE,
    col::URL,
    col::RATING,
];

pub const CULTURE_INFO_HEADERS: [&str; 10] = [
    col::LANGUAGE_ID,
    col::LANGUAGE_NAME,
    col::OVERVIEW,
    col::BUSINESS_USE,
    col::ENTERTAINMENT,
    col::CUISINE,
    col::BUSINESS_USE_SCORE,
    col::TRAVEL_VALUE,
    col::CULTURAL_RICHNESS,
    col::ONLINE_PRESENCE,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoRow {
    pub id: String,
    pub name: String,
    pub native_name: String,
    pub countries: Vec<String>,
    pub family: String,
    pub subfamily: String,
    pub writing_system: String,
    pub speakers: Option<u64>,
    pub flag_emoji: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsiDetailRow {
    pub language_id: String,
    pub language_name: String,
    /// As written; clamping happens when the row is applied.
    pub category: Option<i64>,
    pub hours: Option<u32>,
    pub description: String,
    pub grammar: Option<u8>,
    pub vocabulary: Option<u8>,
    pub pronunciation: Option<u8>,
    pub writing: Option<u8>,
    pub cultural: Option<u8>,
    pub overall_difficulty: Option<u8>,
    pub grammar_difficulty: Option<u8>,
    pub pronunciation_difficulty: Option<u8>,
    pub vocabulary_difficulty: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResourceRow {
    pub language_id: String,
    pub language_name: String,
    pub title: String,
    pub resource_type: Option<ResourceType>,
    pub description: String,
    pub free: bool,
    pub url: String,
    pub rating: Option<u8>,
}

impl LearningResourceRow {
    /// Placeholder rows (language present, no resource) carry no title.
    pub fn has_resource(&self) -> bool {
        !self.title.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureInfoRow {
    pub language_id: String,
    pub language_name: String,
    pub overview: String,
    pub business_use: String,
    pub entertainment: Vec<String>,
    pub cuisine: Vec<String>,
    pub business_use_score: Option<u8>,
    pub travel_value: Option<u8>,
    pub cultural_richness: Option<u8>,
    pub online_presence: Option<u8>,
}

/// Split a `"; "`-joined cell back into its items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}
