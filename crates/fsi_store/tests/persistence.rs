/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use fsi_core::{default_fsi_details, default_hours, CultureInfo, LanguagesDocument, VersionedDocument};
use fsi_sheets::rows::{
    BASIC_INFO, BASIC_INFO_HEADERS, CULTURE_INFO, CULTURE_INFO_HEADERS, FSI_DETAILS,
    FSI_DETAILS_HEADERS, LEARNING_RESOURCES, LEARNING_RESOURCES_HEADERS,
};
use fsi_sheets::{export_workbook, write_workbook, BasicInfoRow, Cell, Sheet, Workbook};
use fsi_store::admin::{status, DEFAULT_MAX_UPLOAD_BYTES};
use fsi_store::{AdminService, DataFile, DataRepository};
use std::fs;
use std::sync::Arc;
use std::thread;

fn seeded_repo() -> (tempfile::TempDir, DataRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = DataRepository::new(dir.path().join("data"), dir.path().join("backups"));
    repo.init_from_seed().unwrap();
    (dir, repo)
}

fn basic_row(id: &str, name: &str, family: &str) -> BasicInfoRow {
    BasicInfoRow {
        id: id.to_string(),
        name: name.to_string(),
        family: family.to_string(),
        ..BasicInfoRow::default()
    }
}

fn stored_ids(repo: &DataRepository) -> Vec<String> {
    repo.load_catalog()
        .unwrap()
        .all_languages()
        .map(|l| l.id.clone())
        .collect()
}

#[test]
fn test_import_new_language_gets_default_category() {
    let (_dir, repo) = seeded_repo();
    let admin = AdminService::new(repo, DEFAULT_MAX_UPLOAD_BYTES);

    let mut basic = Sheet::new(BASIC_INFO, &BASIC_INFO_HEADERS);
    basic.push_row(vec![
        Cell::from("xx"),
        Cell::from("Xyzlang"),
        Cell::Empty,
        Cell::Empty,
        Cell::from("TestFam"),
    ]);
    let mut workbook = Workbook::new();
    workbook.add_sheet(basic);
    workbook.add_sheet(Sheet::new(FSI_DETAILS, &FSI_DETAILS_HEADERS));
    workbook.add_sheet(Sheet::new(LEARNING_RESOURCES, &LEARNING_RESOURCES_HEADERS));
    workbook.add_sheet(Sheet::new(CULTURE_INFO, &CULTURE_INFO_HEADERS));
    let bytes = write_workbook(&workbook).unwrap();

    let response = admin.import_workbook("new-language.xlsx", &bytes);
    assert_eq!(response.status, status::OK, "{:?}", response.body);
    let counts = response.body.row_counts.unwrap();
    assert_eq!(counts.basic_info, 1);
    assert_eq!(counts.fsi_details, 0);
    assert_eq!(response.body.languages.unwrap().inserted, 1);

    let catalog = admin.repository().load_catalog().unwrap();
    let lang = catalog.language_by_id("xx").unwrap();
    assert_eq!(lang.name, "Xyzlang");
    assert_eq!(lang.family, "TestFam");
    assert_eq!(lang.fsi.category, 3);
    assert_eq!(lang.fsi.hours, default_hours(3));
    assert_eq!(lang.fsi.details, default_fsi_details(3));
    assert!(catalog.language_detail("xx").is_some());
}

#[test]
fn test_import_rejects_invalid_rows_without_writing() {
    let (_dir, repo) = seeded_repo();
    let admin = AdminService::new(repo, DEFAULT_MAX_UPLOAD_BYTES);
    let before = fs::read_to_string(admin.repository().path(DataFile::Languages)).unwrap();

    let mut workbook = export_workbook(&admin.repository().load_catalog().unwrap());
    workbook.sheets[0].rows[1][0] = Cell::Empty;
    let bytes = write_workbook(&workbook).unwrap();

    let response = admin.import_workbook("edited.xlsx", &bytes);
    assert_eq!(response.status, status::BAD_REQUEST);
    assert_eq!(
        response.body.errors,
        vec!["Basic Info row 2: ID is required".to_string()]
    );
    let after = fs::read_to_string(admin.repository().path(DataFile::Languages)).unwrap();
    assert_eq!(before, after);
    assert!(admin.list_backups().body.backups.is_empty());
}

#[test]
fn test_import_rejects_out_of_range_culture_score() {
    let (_dir, repo) = seeded_repo();
    let admin = AdminService::new(repo, DEFAULT_MAX_UPLOAD_BYTES);
    let before = fs::read_to_string(admin.repository().path(DataFile::Culture)).unwrap();

    let mut culture = Sheet::new(CULTURE_INFO, &CULTURE_INFO_HEADERS);
    culture.push_row(vec![
        Cell::from("sw"),
        Cell::from("Swahili"),
        Cell::from("Lingua franca of East Africa"),
        Cell::from("Regional trade"),
        Cell::Empty,
        Cell::Empty,
        Cell::from(9u8),
    ]);
    let mut workbook = Workbook::new();
    workbook.add_sheet(Sheet::new(BASIC_INFO, &BASIC_INFO_HEADERS));
    workbook.add_sheet(Sheet::new(FSI_DETAILS, &FSI_DETAILS_HEADERS));
    workbook.add_sheet(Sheet::new(LEARNING_RESOURCES, &LEARNING_RESOURCES_HEADERS));
    workbook.add_sheet(culture);
    let bytes = write_workbook(&workbook).unwrap();

    let response = admin.import_workbook("culture.xlsx", &bytes);
    assert_eq!(response.status, status::BAD_REQUEST);
    assert_eq!(response.body.errors.len(), 4, "{:?}", response.body.errors);
    assert!(response.body.errors[0].contains("between 1 and 5, got 9"));
    let after = fs::read_to_string(admin.repository().path(DataFile::Culture)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_exported_workbook_imports_cleanly() {
    let (_dir, repo) = seeded_repo();
    let admin = AdminService::new(repo, DEFAULT_MAX_UPLOAD_BYTES);
    let before = admin.repository().load_catalog().unwrap();
    let bytes = write_workbook(&export_workbook(&before)).unwrap();

    let response = admin.import_workbook("export.xlsx", &bytes);
    assert_eq!(response.status, status::OK, "{:?}", response.body);
    assert_eq!(response.body.languages.as_ref().unwrap().inserted, 0);

    let after = admin.repository().load_catalog().unwrap();
    assert_eq!(after.len(), before.len());
    for lang in before.all_languages() {
        let reloaded = after.language_by_id(&lang.id).unwrap();
        assert_eq!(reloaded.fsi, lang.fsi, "{}", lang.id);
        assert_eq!(reloaded.regions, lang.regions, "{}", lang.id);
        assert_eq!(
            after.learning_resources(&lang.id),
            before.learning_resources(&lang.id),
            "{}",
            lang.id
        );
        assert_eq!(after.culture_info(&lang.id), before.culture_info(&lang.id));
    }
}

#[test]
fn test_upsert_updates_in_place_and_appends_new() {
    let (_dir, repo) = seeded_repo();
    let before = stored_ids(&repo);

    let outcome = repo.save_languages(&[basic_row("es", "Castellano", "Indo-European")], &[]);
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!((outcome.inserted, outcome.updated), (0, 1));
    assert_eq!(stored_ids(&repo), before);
    let catalog = repo.load_catalog().unwrap();
    assert_eq!(catalog.language_by_id("es").unwrap().name, "Castellano");

    let outcome = repo.save_languages(&[basic_row("xx", "Xyzlang", "TestFam")], &[]);
    assert_eq!((outcome.inserted, outcome.updated), (1, 0));
    let after = stored_ids(&repo);
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.last().map(String::as_str), Some("xx"));
    assert_eq!(after.iter().filter(|id| *id == "es").count(), 1);
}

#[test]
fn test_every_save_backs_up_previous_content() {
    let (_dir, repo) = seeded_repo();

    let languages_before = fs::read_to_string(repo.path(DataFile::Languages)).unwrap();
    let outcome = repo.save_languages(&[basic_row("xx", "Xyzlang", "TestFam")], &[]);
    let backup = outcome.backup_path.unwrap();
    assert_eq!(fs::read_to_string(backup).unwrap(), languages_before);

    let resources_before = fs::read_to_string(repo.path(DataFile::Resources)).unwrap();
    let outcome = repo.save_resource_lists([("xx".to_string(), Vec::new())].into());
    let backup = outcome.backup_path.unwrap();
    assert_eq!(fs::read_to_string(backup).unwrap(), resources_before);

    let culture_before = fs::read_to_string(repo.path(DataFile::Culture)).unwrap();
    let info = CultureInfo {
        overview: "Xyzlang overview".to_string(),
        business_use: "None to speak of".to_string(),
        entertainment: Vec::new(),
        cuisine: Vec::new(),
        cultural_info: None,
    };
    let outcome = repo.save_culture_info("xx", info);
    let backup = outcome.backup_path.unwrap();
    assert_eq!(fs::read_to_string(backup).unwrap(), culture_before);

    let listed = repo.list_backups().unwrap();
    assert!(listed.len() >= 4);
    assert!(listed
        .windows(2)
        .all(|pair| (&pair[0].created, pair[0].sequence) >= (&pair[1].created, pair[1].sequence)));
}

#[test]
fn test_failed_backup_leaves_live_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("backups");
    fs::write(&blocker, "a file where the backups directory should be").unwrap();
    let repo = DataRepository::new(dir.path().join("data"), &blocker);
    repo.init_from_seed().unwrap();
    let before = fs::read_to_string(repo.path(DataFile::Languages)).unwrap();

    let outcome = repo.save_languages(&[basic_row("xx", "Xyzlang", "TestFam")], &[]);
    assert!(!outcome.success);
    assert!(outcome.backup_path.is_none());
    assert_eq!(fs::read_to_string(repo.path(DataFile::Languages)).unwrap(), before);
}

#[test]
fn test_concurrent_writers_do_not_lose_updates() {
    let (_dir, repo) = seeded_repo();
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                let id = format!("t{n}");
                repo.save_languages(&[basic_row(&id, &format!("Test {n}"), "TestFam")], &[])
            })
        })
        .collect();
    for handle in handles {
        let outcome = handle.join().unwrap();
        assert!(outcome.success, "{}", outcome.message);
    }

    let ids = stored_ids(&repo);
    for n in 0..8 {
        assert!(ids.contains(&format!("t{n}")), "t{n} was lost");
    }
}

#[test]
fn test_saved_document_is_versioned() {
    let (_dir, repo) = seeded_repo();
    repo.save_languages(&[basic_row("xx", "Xyzlang", "TestFam")], &[]);
    let content = fs::read_to_string(repo.path(DataFile::Languages)).unwrap();
    let doc = LanguagesDocument::from_yaml(&content).unwrap();
    assert_eq!(doc.version, fsi_core::DOCUMENT_VERSION);

    fs::write(
        repo.path(DataFile::Languages),
        content.replacen("version: 1", "version: 99", 1),
    )
    .unwrap();
    assert!(repo.load_catalog().is_err());
}
