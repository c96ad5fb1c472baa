/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use fsi_core::Catalog;
use fsi_sheets::{
    export_workbook, parse_workbook, read_workbook, write_workbook, Cell, ParsedWorkbook,
    RowCounts, Sheet, Workbook,
};

fn assert_dataset_survives(catalog: &Catalog, parsed: &ParsedWorkbook) {
    assert!(parsed.is_valid(), "unexpected errors: {:?}", parsed.errors);
    for lang in catalog.all_languages() {
        let basic = parsed
            .basic_info
            .iter()
            .find(|row| row.id == lang.id)
            .unwrap_or_else(|| panic!("no Basic Info row for {}", lang.id));
        assert_eq!(basic.name, lang.name);
        assert_eq!(basic.family, lang.family);
        assert_eq!(basic.countries, lang.regions);

        let fsi = parsed
            .fsi_details
            .iter()
            .find(|row| row.language_id == lang.id)
            .unwrap_or_else(|| panic!("no FSI Details row for {}", lang.id));
        assert_eq!(fsi.category, Some(i64::from(lang.fsi.category)));
        assert_eq!(fsi.hours, Some(lang.fsi.hours));
    }
}

#[test]
fn test_export_then_parse_keeps_ids_and_categories() {
    let catalog = Catalog::builtin().unwrap();
    let parsed = parse_workbook(&export_workbook(&catalog));
    assert_dataset_survives(&catalog, &parsed);
    assert_eq!(parsed.basic_info.len(), catalog.len());
}

#[test]
fn test_export_survives_an_xlsx_file() {
    let catalog = Catalog::builtin().unwrap();
    let bytes = write_workbook(&export_workbook(&catalog)).unwrap();
    let workbook = read_workbook(&bytes).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Basic Info", "FSI Details", "Learning Resources", "Culture Info"]
    );

    let parsed = parse_workbook(&workbook);
    assert_dataset_survives(&catalog, &parsed);

    let spanish: Vec<_> = parsed
        .learning_resources
        .iter()
        .filter(|row| row.language_id == "es" && row.has_resource())
        .collect();
    assert_eq!(spanish.len(), catalog.learning_resources("es").len());
    assert_eq!(spanish[0].title, catalog.learning_resources("es")[0].title);
}

#[test]
fn test_row_counts_follow_the_sheets() {
    let catalog = Catalog::builtin().unwrap();
    let parsed = parse_workbook(&export_workbook(&catalog));
    let counts = RowCounts::from(&parsed);
    assert_eq!(counts.basic_info, catalog.len());
    assert_eq!(counts.fsi_details, catalog.len());
    assert_eq!(counts.culture_info, catalog.len());
    assert!(counts.learning_resources >= catalog.len());
}

#[test]
fn test_every_blank_id_is_reported_with_its_row() {
    let mut sheet = Sheet::new("Basic Info", &["ID", "Name", "Family"]);
    sheet.push_row(vec![Cell::Empty, Cell::from("First"), Cell::from("Fam")]);
    sheet.push_row(vec![Cell::from("ok"), Cell::from("Fine"), Cell::from("Fam")]);
    sheet.push_row(vec![Cell::from("  "), Cell::from("Third"), Cell::from("Fam")]);
    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet);

    let parsed = parse_workbook(&workbook);
    let id_errors: Vec<_> = parsed
        .errors
        .iter()
        .filter(|e| e.contains("ID is required"))
        .collect();
    assert_eq!(id_errors.len(), 2);
    assert!(id_errors[0].contains("row 1"));
    assert!(id_errors[1].contains("row 3"));
}

#[test]
fn test_category_zero_text_is_not_missing() {
    let mut sheet = Sheet::new(
        "FSI Details",
        &["Language ID", "Language Name", "FSI Category", "Study Hours"],
    );
    sheet.push_row(vec![
        Cell::from("en"),
        Cell::from("English"),
        Cell::from("0"),
        Cell::from("0"),
    ]);
    let mut workbook = Workbook::new();
    workbook.add_sheet(sheet);

    let parsed = parse_workbook(&workbook);
    assert!(parsed
        .errors
        .iter()
        .all(|e| !e.contains("FSI Category")));
    assert_eq!(parsed.fsi_details[0].category, Some(0));
}
