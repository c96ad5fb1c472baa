/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Canonical record types.
//!
//! Field names serialize in camelCase so that documents written by the
//! store, the JSON sidecar and the spreadsheet headers all agree on one
//! vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One language, fully populated.
///
/// Values of this type are only produced by the adapter
/// ([`crate::adapter::adapt_language_data`]), which guarantees every field
/// is set and `fsi.category` is in `0..=5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub name: String,
    pub native_name: String,
    pub regions: Vec<String>,
    pub family: String,
    pub subfamily: String,
    pub writing_system: String,
    pub speakers: u64,
    pub flag_emoji: String,
    pub color: String,
    pub fsi: FsiInfo,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsiInfo {
    /// 0 is the reference language, 1 the easiest, 5 the hardest.
    pub category: u8,
    pub hours: u32,
    pub description: String,
    pub details: FsiDetails,
}

/// The five difficulty sub-scores, each 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FsiDetails {
    pub grammar: u8,
    pub vocabulary: u8,
    pub pronunciation: u8,
    pub writing: u8,
    pub cultural: u8,
}

/// Coarse difficulty scores tracked alongside [`FsiDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub overall: u8,
    pub grammar: u8,
    pub pronunciation: u8,
    pub vocabulary: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    App,
    Book,
    Course,
    Website,
    Video,
    Podcast,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::App,
        ResourceType::Book,
        ResourceType::Course,
        ResourceType::Website,
        ResourceType::Video,
        ResourceType::Podcast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::App => "app",
            ResourceType::Book => "book",
            ResourceType::Course => "course",
            ResourceType::Website => "website",
            ResourceType::Video => "video",
            ResourceType::Podcast => "podcast",
        }
    }

    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// 1–5 when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureInfo {
    pub overview: String,
    pub business_use: String,
    #[serde(default)]
    pub entertainment: Vec<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_info: Option<CultureScores>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureScores {
    pub business_use: u8,
    pub travel_value: u8,
    pub cultural_richness: u8,
    pub online_presence: u8,
}
