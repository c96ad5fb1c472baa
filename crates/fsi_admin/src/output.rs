/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use anyhow::Result;
use fsi_core::{format_speakers, Comparison, ExtendedLanguageDetail, Language, ResourceGroup};
use fsi_sheets::ParsedWorkbook;
use fsi_store::BackupEntry;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Category")]
    category: u8,
    #[tabled(rename = "Hours")]
    hours: u32,
    #[tabled(rename = "Speakers")]
    speakers: String,
}

impl From<&Language> for LanguageRow {
    fn from(lang: &Language) -> Self {
        Self {
            id: lang.id.clone(),
            name: format!("{} {}", lang.flag_emoji, lang.name),
            family: lang.family.clone(),
            category: lang.fsi.category,
            hours: lang.fsi.hours,
            speakers: format_speakers(lang.speakers),
        }
    }
}

pub fn languages_table<'a>(languages: impl IntoIterator<Item = &'a Language>) -> String {
    let rows: Vec<LanguageRow> = languages.into_iter().map(LanguageRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn print_language(lang: &Language) {
    println!("{} {} ({})", lang.flag_emoji, lang.name, lang.id);
    if !lang.native_name.is_empty() && lang.native_name != lang.name {
        println!("Native name: {}", lang.native_name);
    }
    if lang.subfamily.is_empty() {
        println!("Family: {}", lang.family);
    } else {
        println!("Family: {} / {}", lang.family, lang.subfamily);
    }
    println!("Writing system: {}", lang.writing_system);
    println!("Speakers: {}", format_speakers(lang.speakers));
    if !lang.regions.is_empty() {
        println!("Regions: {}", lang.regions.join(", "));
    }
    println!(
        "FSI category {} ({} hours): {}",
        lang.fsi.category, lang.fsi.hours, lang.fsi.description
    );
    let d = &lang.fsi.details;
    println!(
        "Grammar {} | Vocabulary {} | Pronunciation {} | Writing {} | Cultural {}",
        d.grammar, d.vocabulary, d.pronunciation, d.writing, d.cultural
    );
}

pub fn print_detail(detail: &ExtendedLanguageDetail) {
    print_language(&detail.language);
    let s = &detail.speakers_info;
    println!(
        "Native speakers: {} of {} (global rank bucket {})",
        s.native, s.total, s.global_rank
    );

    let g = &detail.geography;
    println!("Primary regions: {}", g.primary_regions.join(", "));
    if !g.secondary_regions.is_empty() {
        println!("Secondary regions: {}", g.secondary_regions.join(", "));
    }
    println!("Continents: {}", g.continents.join(", "));

    println!("\nCulture:\n{}", detail.culture.overview);
    println!("Business: {}", detail.culture.business_use);
    if !detail.culture.entertainment.is_empty() {
        println!("Entertainment: {}", detail.culture.entertainment.join(", "));
    }
    if !detail.culture.cuisine.is_empty() {
        println!("Cuisine: {}", detail.culture.cuisine.join(", "));
    }
    let c = &detail.cultural_scores;
    println!(
        "Business use {} | Travel value {} | Cultural richness {} | Online presence {}",
        c.business_use, c.travel_value, c.cultural_richness, c.online_presence
    );

    if !detail.learning_resources.is_empty() {
        println!();
        print_resource_groups(&detail.learning_resources);
    }
}

pub fn print_resource_groups(groups: &[ResourceGroup]) {
    if groups.is_empty() {
        println!("No learning resources.");
        return;
    }
    for group in groups {
        println!("{}:", group.resource_type);
        for r in &group.resources {
            let price = if r.free { "free" } else { "paid" };
            match (&r.url, r.rating) {
                (Some(url), Some(rating)) => {
                    println!("  - {} ({price}, {rating}/5) {url}", r.title)
                }
                (Some(url), None) => println!("  - {} ({price}) {url}", r.title),
                (None, Some(rating)) => println!("  - {} ({price}, {rating}/5)", r.title),
                (None, None) => println!("  - {} ({price})", r.title),
            }
        }
    }
}

pub fn comparison_table(comparison: &Comparison) -> String {
    let mut out = languages_table(&comparison.languages);
    if let (Some(easiest), Some(hardest)) = (&comparison.easiest, &comparison.hardest) {
        out.push_str(&format!("\nEasiest: {easiest}  Hardest: {hardest}"));
    }
    if !comparison.unknown_ids.is_empty() {
        out.push_str(&format!(
            "\nUnknown ids: {}",
            comparison.unknown_ids.join(", ")
        ));
    }
    out
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Restores")]
    restores: String,
    #[tabled(rename = "Size")]
    size: u64,
    #[tabled(rename = "Path")]
    path: String,
}

pub fn backups_table(backups: &[BackupEntry]) -> String {
    let rows: Vec<BackupRow> = backups
        .iter()
        .map(|b| BackupRow {
            created: b.created.clone(),
            restores: b
                .restores
                .map(|f| f.file_name().to_string())
                .unwrap_or_else(|| "-".to_string()),
            size: b.size,
            path: b.path.display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn print_validation(parsed: &ParsedWorkbook) {
    println!(
        "Basic Info: {}, FSI Details: {}, Learning Resources: {}, Culture Info: {}",
        parsed.basic_info.len(),
        parsed.fsi_details.len(),
        parsed.learning_resources.len(),
        parsed.culture_info.len()
    );
    if parsed.errors.is_empty() {
        println!("No problems found.");
    } else {
        println!("{} problem(s):", parsed.errors.len());
        for error in &parsed.errors {
            println!("  - {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_core::Catalog;

    #[test]
    fn test_languages_table_has_header_and_rows() {
        let catalog = Catalog::builtin().unwrap();
        let table = languages_table(catalog.featured_languages());
        assert!(table.contains("Category"));
        assert!(table.contains("Spanish"));
        assert!(table.contains("1.2B"));
    }
}
