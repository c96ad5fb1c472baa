/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The per-language detail view.
//!
//! Assembled on every read from the base record, its learning resources
//! and its culture record; it owns no storage of its own.

use crate::format::{format_speakers, global_rank};
use crate::geography::{infer_continents, native_speakers};
use crate::model::{CultureInfo, CultureScores, Language, LearningResource, ResourceType};
use indexmap::IndexMap;
use serde::Serialize;

/// Regions beyond this count are listed as secondary.
pub const PRIMARY_REGION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedLanguageDetail {
    #[serde(flatten)]
    pub language: Language,
    pub speakers_info: SpeakerStats,
    pub geography: Geography,
    pub learning_resources: Vec<ResourceGroup>,
    pub culture: CultureInfo,
    /// Presentation heuristics derived from the category, not stored data.
    pub cultural_scores: CultureScores,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerStats {
    pub native: String,
    pub total: String,
    pub native_count: u64,
    pub total_count: u64,
    pub global_rank: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Geography {
    pub primary_regions: Vec<String>,
    pub secondary_regions: Vec<String>,
    pub continents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub resource_type: ResourceType,
    pub resources: Vec<LearningResource>,
}

pub fn speaker_stats(language: &Language) -> SpeakerStats {
    let native_count = native_speakers(&language.id, language.speakers);
    SpeakerStats {
        native: format_speakers(native_count),
        total: format_speakers(language.speakers),
        native_count,
        total_count: language.speakers,
        global_rank: global_rank(language.speakers),
    }
}

pub fn geography(language: &Language) -> Geography {
    let split = language.regions.len().min(PRIMARY_REGION_COUNT);
    let (primary, secondary) = language.regions.split_at(split);
    Geography {
        primary_regions: primary.to_vec(),
        secondary_regions: secondary.to_vec(),
        continents: infer_continents(&language.regions),
    }
}

/// Group resources by type, groups ordered by first appearance.
pub fn group_by_type(resources: &[LearningResource]) -> Vec<ResourceGroup> {
    let mut groups: IndexMap<ResourceType, Vec<LearningResource>> = IndexMap::new();
    for resource in resources {
        groups
            .entry(resource.resource_type)
            .or_default()
            .push(resource.clone());
    }
    groups
        .into_iter()
        .map(|(resource_type, resources)| ResourceGroup {
            resource_type,
            resources,
        })
        .collect()
}

pub fn cultural_scores(language: &Language) -> CultureScores {
    let category = language.fsi.category;
    CultureScores {
        business_use: (category + 1).min(5),
        travel_value: 6u8.saturating_sub(category).clamp(1, 5),
        cultural_richness: 4,
        online_presence: if language.speakers > 100_000_000 { 5 } else { 3 },
    }
}

pub fn build_detail(
    language: &Language,
    resources: &[LearningResource],
    culture: CultureInfo,
) -> ExtendedLanguageDetail {
    ExtendedLanguageDetail {
        speakers_info: speaker_stats(language),
        geography: geography(language),
        learning_resources: group_by_type(resources),
        cultural_scores: cultural_scores(language),
        culture,
        language: language.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::adapt_language_data;
    use serde_json::json;

    fn language(category: u8, speakers: u64, regions: &[&str]) -> Language {
        adapt_language_data(&json!({
            "id": "xx",
            "name": "Xyzlang",
            "regions": regions,
            "speakers": speakers,
            "fsi": {"category": category, "hours": 1100}
        }))
    }

    fn resource(title: &str, kind: ResourceType) -> LearningResource {
        LearningResource {
            title: title.to_string(),
            resource_type: kind,
            description: String::new(),
            free: true,
            url: None,
            rating: None,
        }
    }

    #[test]
    fn test_regions_split_primary_secondary() {
        let lang = language(1, 10, &["Spain", "Mexico", "Colombia", "Peru", "Atlantis"]);
        let geo = geography(&lang);
        assert_eq!(geo.primary_regions, vec!["Spain", "Mexico", "Colombia"]);
        assert_eq!(geo.secondary_regions, vec!["Peru", "Atlantis"]);
        assert_eq!(geo.continents, vec!["Europe", "North America", "South America"]);
    }

    #[test]
    fn test_short_region_list_has_no_secondary() {
        let geo = geography(&language(1, 10, &["Japan"]));
        assert_eq!(geo.primary_regions, vec!["Japan"]);
        assert!(geo.secondary_regions.is_empty());
    }

    #[test]
    fn test_speaker_stats_use_default_ratio() {
        let stats = speaker_stats(&language(3, 10_000_000, &[]));
        assert_eq!(stats.total, "10M");
        assert_eq!(stats.native_count, 8_000_000);
        assert_eq!(stats.native, "8M");
        assert_eq!(stats.global_rank, 8);
    }

    #[test]
    fn test_cultural_score_heuristics() {
        let scores = cultural_scores(&language(5, 200_000_000, &[]));
        assert_eq!(scores.business_use, 5);
        assert_eq!(scores.travel_value, 1);
        assert_eq!(scores.cultural_richness, 4);
        assert_eq!(scores.online_presence, 5);

        let scores = cultural_scores(&language(0, 5, &[]));
        assert_eq!(scores.business_use, 1);
        assert_eq!(scores.travel_value, 5);
        assert_eq!(scores.online_presence, 3);
    }

    #[test]
    fn test_group_by_type_keeps_first_seen_order() {
        let groups = group_by_type(&[
            resource("a", ResourceType::Podcast),
            resource("b", ResourceType::App),
            resource("c", ResourceType::Podcast),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].resource_type, ResourceType::Podcast);
        assert_eq!(groups[0].resources.len(), 2);
        assert_eq!(groups[1].resources[0].title, "b");
    }
}
