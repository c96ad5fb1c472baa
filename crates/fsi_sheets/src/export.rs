/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Catalog → four-sheet workbook.

use crate::rows::{
    join_list, BASIC_INFO, BASIC_INFO_HEADERS, CULTURE_INFO, CULTURE_INFO_HEADERS, FSI_DETAILS,
    FSI_DETAILS_HEADERS, LEARNING_RESOURCES, LEARNING_RESOURCES_HEADERS,
};
use crate::workbook::{Cell, Sheet, Workbook};
use fsi_core::{Catalog, Language, LearningResource};

/// Serialize every language in the catalog, in store order.
pub fn export_workbook(catalog: &Catalog) -> Workbook {
    let languages: Vec<&Language> = catalog.all_languages().collect();

    let mut basic = Sheet::new(BASIC_INFO, &BASIC_INFO_HEADERS);
    let mut fsi = Sheet::new(FSI_DETAILS, &FSI_DETAILS_HEADERS);
    let mut resources = Sheet::new(LEARNING_RESOURCES, &LEARNING_RESOURCES_HEADERS);
    let mut culture = Sheet::new(CULTURE_INFO, &CULTURE_INFO_HEADERS);

    for lang in languages {
        basic.push_row(basic_info_row(lang));
        fsi.push_row(fsi_details_row(lang));

        let entries = catalog.learning_resources(&lang.id);
        if entries.is_empty() {
            // Keep the language visible so it can be filled in by hand.
            resources.push_row(resource_row(lang, None));
        } else {
            for entry in entries {
                resources.push_row(resource_row(lang, Some(entry)));
            }
        }

        culture.push_row(culture_row(lang, catalog));
    }

    let mut workbook = Workbook::new();
    workbook.add_sheet(basic);
    workbook.add_sheet(fsi);
    workbook.add_sheet(resources);
    workbook.add_sheet(culture);
    workbook
}

fn basic_info_row(lang: &Language) -> Vec<Cell> {
    vec![
        Cell::from(&lang.id),
        Cell::from(&lang.name),
        Cell::from(&lang.native_name),
        Cell::from(join_list(&lang.regions)),
        Cell::from(&lang.family),
        Cell::from(&lang.subfamily),
        Cell::from(&lang.writing_system),
        Cell::from(lang.speakers),
        Cell::from(&lang.flag_emoji),
        Cell::from(&lang.color),
    ]
}

fn fsi_details_row(lang: &Language) -> Vec<Cell> {
    let details = &lang.fsi.details;
    let difficulty = &lang.difficulty;
    vec![
        Cell::from(&lang.id),
        Cell::from(&lang.name),
        Cell::from(lang.fsi.category),
        Cell::from(lang.fsi.hours),
        Cell::from(&lang.fsi.description),
        Cell::from(details.grammar),
        Cell::from(details.vocabulary),
        Cell::from(details.pronunciation),
        Cell::from(details.writing),
        Cell::from(details.cultural),
        Cell::from(difficulty.overall),
        Cell::from(difficulty.grammar),
        Cell::from(difficulty.pronunciation),
        Cell::from(difficulty.vocabulary),
    ]
}

fn resource_row(lang: &Language, resource: Option<&LearningResource>) -> Vec<Cell> {
    let mut row = vec![Cell::from(&lang.id), Cell::from(&lang.name)];
    match resource {
        Some(r) => row.extend([
            Cell::from(&r.title),
            Cell::from(r.resource_type.as_str()),
            Cell::from(&r.description),
            Cell::from(if r.free { "Yes" } else { "No" }),
            Cell::from(r.url.as_ref()),
            Cell::from(r.rating),
        ]),
        None => row.extend(std::iter::repeat(Cell::Empty).take(6)),
    }
    row
}

fn culture_row(lang: &Language, catalog: &Catalog) -> Vec<Cell> {
    let mut row = vec![Cell::from(&lang.id), Cell::from(&lang.name)];
    match catalog.stored_culture(&lang.id) {
        Some(info) => {
            let scores = info.cultural_info;
            row.extend([
                Cell::from(&info.overview),
                Cell::from(&info.business_use),
                Cell::from(join_list(&info.entertainment)),
                Cell::from(join_list(&info.cuisine)),
                Cell::from(scores.map(|s| s.business_use)),
                Cell::from(scores.map(|s| s.travel_value)),
                Cell::from(scores.map(|s| s.cultural_richness)),
                Cell::from(scores.map(|s| s.online_presence)),
            ]);
        }
        None => row.extend(std::iter::repeat(Cell::Empty).take(8)),
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_has_four_sheets_in_order() {
        let catalog = Catalog::builtin().unwrap();
        let workbook = export_workbook(&catalog);
        assert_eq!(
            workbook.sheet_names(),
            vec!["Basic Info", "FSI Details", "Learning Resources", "Culture Info"]
        );
        assert_eq!(workbook.sheets[0].rows.len(), catalog.len());
        assert_eq!(workbook.sheets[1].rows.len(), catalog.len());
        assert_eq!(workbook.sheets[3].rows.len(), catalog.len());
    }

    #[test]
    fn test_language_without_resources_gets_one_blank_row() {
        let catalog = Catalog::builtin().unwrap();
        let workbook = export_workbook(&catalog);
        let sheet = workbook.sheet("Learning Resources").unwrap();
        let swahili: Vec<_> = sheet
            .rows
            .iter()
            .filter(|row| row[0] == Cell::from("sw"))
            .collect();
        assert_eq!(swahili.len(), 1);
        assert!(swahili[0][2..].iter().all(Cell::is_blank));

        let spanish = sheet.rows.iter().filter(|row| row[0] == Cell::from("es")).count();
        assert_eq!(spanish, catalog.learning_resources("es").len());
    }

    #[test]
    fn test_countries_are_joined() {
        let catalog = Catalog::builtin().unwrap();
        let workbook = export_workbook(&catalog);
        let basic = workbook.sheet("Basic Info").unwrap();
        let korean = basic.rows.iter().find(|r| r[0] == Cell::from("ko")).unwrap();
        assert_eq!(korean[3], Cell::from("South Korea; North Korea"));
    }
}
