/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The data directory as a repository.
//!
//! Reads produce an immutable [`Catalog`] snapshot. Saves rewrite the
//! backing documents and are not visible to snapshots taken earlier; call
//! [`DataRepository::load_catalog`] again to pick them up.
//!
//! Every save follows the same sequence under the writer lock: read the
//! live file, compute the new content, write a backup of the old content,
//! then atomically replace the live file if its fingerprint is unchanged.
//! A failed backup stops the save before the live file is touched.

use crate::apply::{culture_from_row, is_blank_culture_row, language_from_rows, resource_from_row};
use crate::backup::{BackupEntry, BackupStore, CULTURE_DATASET};
use crate::error::{Result, StoreError};
use crate::files::{read_optional, read_snapshot, write_atomic, DataFile};
use crate::outcome::SaveOutcome;
use fsi_core::{
    adapt_language_data, Catalog, CultureDocument, CultureInfo, Language, LanguagesDocument,
    LearningResource, ResourcesDocument, VersionedDocument, DOCUMENT_VERSION,
};
use fsi_sheets::{BasicInfoRow, CultureInfoRow, FsiDetailRow, LearningResourceRow};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct DataRepository {
    data_dir: PathBuf,
    backups: BackupStore,
    writer: Mutex<()>,
}

impl DataRepository {
    pub fn new(data_dir: impl AsRef<Path>, backups_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            backups: BackupStore::new(backups_dir),
            writer: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn backups_dir(&self) -> &Path {
        self.backups.dir()
    }

    pub fn path(&self, file: DataFile) -> PathBuf {
        self.data_dir.join(file.file_name())
    }

    /// Write the bundled dataset into any data file that does not exist yet.
    /// Returns the files created.
    pub fn init_from_seed(&self) -> Result<Vec<PathBuf>> {
        let _guard = self.writer.lock();
        let (languages, resources, culture) = Catalog::seed_documents();
        let sidecar = CultureDocument::from_yaml(culture)?.to_json_sidecar()?;

        let mut created = Vec::new();
        for (file, content) in [
            (DataFile::Languages, languages),
            (DataFile::Resources, resources),
            (DataFile::Culture, culture),
            (DataFile::CultureSidecar, sidecar.as_str()),
        ] {
            let path = self.path(file);
            if path.exists() {
                debug!(path = %path.display(), "data file already present");
                continue;
            }
            write_atomic(&path, content, Some(None))?;
            info!(path = %path.display(), "initialised data file");
            created.push(path);
        }
        Ok(created)
    }

    /// Read a fresh snapshot. The languages document is required; missing
    /// resource or culture documents read as empty.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let languages = read_snapshot(&self.path(DataFile::Languages))?;
        let languages = LanguagesDocument::from_yaml(&languages.content)?;

        let resources = match read_optional(&self.path(DataFile::Resources))? {
            Some(snapshot) => ResourcesDocument::from_yaml(&snapshot.content)?,
            None => ResourcesDocument::new(BTreeMap::new()),
        };
        let culture = match read_optional(&self.path(DataFile::Culture))? {
            Some(snapshot) => CultureDocument::from_yaml(&snapshot.content)?,
            None => CultureDocument::new(BTreeMap::new()),
        };

        Ok(Catalog::from_documents(languages, resources, culture))
    }

    /// Upsert one language per Basic Info row, taking FSI fields from the
    /// FSI Details row with the same id.
    pub fn save_languages(&self, basic: &[BasicInfoRow], fsi: &[FsiDetailRow]) -> SaveOutcome {
        let fsi_by_id: HashMap<&str, &FsiDetailRow> = fsi
            .iter()
            .map(|row| (row.language_id.as_str(), row))
            .collect();

        let mut skipped = Vec::new();
        let rows: Vec<&BasicInfoRow> = basic
            .iter()
            .filter(|row| {
                let keep = !row.id.is_empty();
                if !keep {
                    skipped.push(format!("Basic Info row without an ID ({})", row.name));
                }
                keep
            })
            .collect();

        let result = self.upsert_languages(|table| {
            rows.iter()
                .map(|row| {
                    let existing = table.get(&row.id);
                    let fsi = fsi_by_id.get(row.id.as_str()).copied();
                    language_from_rows(row, fsi, existing.as_ref())
                })
                .collect()
        });
        match result {
            Ok(outcome) => outcome.with_skipped(skipped),
            Err(e) => SaveOutcome::from_error("failed to save languages", &e),
        }
    }

    /// Upsert already-canonical language records.
    pub fn save_language_records(&self, languages: &[Language]) -> SaveOutcome {
        self.upsert_languages(|_| languages.to_vec())
            .unwrap_or_else(|e| SaveOutcome::from_error("failed to save languages", &e))
    }

    fn upsert_languages<F>(&self, build: F) -> Result<SaveOutcome>
    where
        F: FnOnce(&LanguageTable) -> Vec<Language>,
    {
        let _guard = self.writer.lock();
        let mut inserted = 0;
        let mut updated = 0;

        let backup = self.rewrite(DataFile::Languages, |content| {
            let mut table = LanguageTable::parse(content)?;
            let records = build(&table);
            for record in &records {
                if table.upsert(record)? {
                    inserted += 1;
                } else {
                    updated += 1;
                }
            }
            table.to_yaml()
        })?;

        info!(inserted, updated, "saved languages");
        Ok(SaveOutcome::saved(
            format!("Saved languages: {inserted} inserted, {updated} updated"),
            Some(backup),
        )
        .with_counts(inserted, updated))
    }

    /// Replace the resource list of every language that has at least one
    /// row. Placeholder rows without a title leave that language with an
    /// empty list.
    pub fn save_learning_resources(&self, rows: &[LearningResourceRow]) -> SaveOutcome {
        let mut lists: BTreeMap<String, Vec<LearningResource>> = BTreeMap::new();
        for row in rows.iter().filter(|row| !row.language_id.is_empty()) {
            let list = lists.entry(row.language_id.clone()).or_default();
            list.extend(resource_from_row(row));
        }
        self.save_resource_lists(lists)
    }

    /// Replace resource lists wholesale, keyed by language id. Languages
    /// not named here keep their lists.
    pub fn save_resource_lists(&self, lists: BTreeMap<String, Vec<LearningResource>>) -> SaveOutcome {
        if lists.is_empty() {
            return SaveOutcome::saved("No learning resources to save", None);
        }
        self.try_save_resource_lists(lists)
            .unwrap_or_else(|e| SaveOutcome::from_error("failed to save learning resources", &e))
    }

    fn try_save_resource_lists(
        &self,
        lists: BTreeMap<String, Vec<LearningResource>>,
    ) -> Result<SaveOutcome> {
        let _guard = self.writer.lock();
        let mut inserted = 0;
        let mut updated = 0;

        let backup = self.rewrite(DataFile::Resources, |content| {
            let mut doc = ResourcesDocument::from_yaml(content)?;
            for (id, list) in lists {
                let existed = if list.is_empty() {
                    doc.resources.remove(&id).is_some()
                } else {
                    let existed = doc.resources.insert(id, list).is_some();
                    if !existed {
                        inserted += 1;
                    }
                    existed
                };
                if existed {
                    updated += 1;
                }
            }
            doc.version = DOCUMENT_VERSION;
            Ok(doc.to_yaml()?)
        })?;

        info!(inserted, updated, "saved learning resources");
        Ok(SaveOutcome::saved(
            format!("Saved learning resources for {} languages", inserted + updated),
            Some(backup),
        )
        .with_counts(inserted, updated))
    }

    /// Upsert one language's culture notes.
    pub fn save_culture_info(&self, language_id: &str, info: CultureInfo) -> SaveOutcome {
        let mut errors = Vec::new();
        if language_id.trim().is_empty() {
            errors.push("languageId is required".to_string());
        }
        if info.overview.trim().is_empty() {
            errors.push("cultureInfo.overview is required".to_string());
        }
        if info.business_use.trim().is_empty() {
            errors.push("cultureInfo.businessUse is required".to_string());
        }
        if !errors.is_empty() {
            return SaveOutcome::failed("Invalid culture info").with_errors(errors);
        }

        let mut entries = BTreeMap::new();
        entries.insert(language_id.trim().to_string(), info);
        self.try_save_culture(entries)
            .unwrap_or_else(|e| SaveOutcome::from_error("failed to save culture info", &e))
    }

    /// Upsert culture notes from spreadsheet rows. Blank rows are ignored;
    /// rows without an overview or business-use note are skipped.
    pub fn save_culture_rows(&self, rows: &[CultureInfoRow]) -> SaveOutcome {
        let mut entries = BTreeMap::new();
        let mut skipped = Vec::new();
        for row in rows.iter().filter(|row| !row.language_id.is_empty()) {
            if is_blank_culture_row(row) {
                continue;
            }
            match culture_from_row(row) {
                Some(info) => {
                    entries.insert(row.language_id.clone(), info);
                }
                None => {
                    warn!(id = %row.language_id, "culture row lacks overview or business use");
                    skipped.push(format!(
                        "{}: overview and business use are required",
                        row.language_id
                    ));
                }
            }
        }

        if entries.is_empty() {
            return SaveOutcome::saved("No culture info to save", None).with_skipped(skipped);
        }
        match self.try_save_culture(entries) {
            Ok(outcome) => outcome.with_skipped(skipped),
            Err(e) => SaveOutcome::from_error("failed to save culture info", &e),
        }
    }

    fn try_save_culture(&self, entries: BTreeMap<String, CultureInfo>) -> Result<SaveOutcome> {
        let _guard = self.writer.lock();
        let mut inserted = 0;
        let mut updated = 0;
        let mut merged = CultureDocument::default();

        let backup = self.rewrite(DataFile::Culture, |content| {
            let mut doc = CultureDocument::from_yaml(content)?;
            // Full pre-update dataset, kept apart from the file backup.
            self.backups
                .write(CULTURE_DATASET, &doc.to_json_sidecar()?)?;
            for (id, info) in entries {
                if doc.culture.insert(id, info).is_some() {
                    updated += 1;
                } else {
                    inserted += 1;
                }
            }
            doc.version = DOCUMENT_VERSION;
            let yaml = doc.to_yaml()?;
            merged = doc;
            Ok(yaml)
        })?;

        // culture.yaml is already replaced at this point; report the sidecar
        // failure without hiding that.
        if let Err(e) = self.write_sidecar(&merged) {
            warn!(error = %e, "saved culture.yaml but not its JSON sidecar");
            let mut outcome = SaveOutcome::failed(format!(
                "Saved {} but failed to write {}: {e}",
                DataFile::Culture.file_name(),
                DataFile::CultureSidecar.file_name()
            ))
            .with_counts(inserted, updated);
            outcome.backup_path = Some(backup);
            return Ok(outcome);
        }
        info!(inserted, updated, "saved culture info");
        Ok(SaveOutcome::saved(
            format!("Saved culture info: {inserted} inserted, {updated} updated"),
            Some(backup),
        )
        .with_counts(inserted, updated))
    }

    fn write_sidecar(&self, doc: &CultureDocument) -> Result<()> {
        let path = self.path(DataFile::CultureSidecar);
        let current = read_optional(&path)?;
        if let Some(current) = &current {
            self.backups
                .write(DataFile::CultureSidecar.file_name(), &current.content)?;
        }
        let expected = current.as_ref().map(|s| s.fingerprint.as_str());
        write_atomic(&path, &doc.to_json_sidecar()?, Some(expected))
    }

    pub fn list_backups(&self) -> Result<Vec<BackupEntry>> {
        self.backups.list()
    }

    /// The live file a backup path would restore, if the path is acceptable.
    pub fn backup_target(&self, backup: &Path) -> Result<DataFile> {
        self.backups.resolve(backup).map(|(_, target)| target)
    }

    /// Replace a live data file with a backup of it. The live content is
    /// backed up first, so a restore can itself be undone.
    pub fn restore_backup(&self, backup: &Path) -> SaveOutcome {
        self.try_restore(backup)
            .unwrap_or_else(|e| SaveOutcome::from_error("failed to restore backup", &e))
    }

    fn try_restore(&self, backup: &Path) -> Result<SaveOutcome> {
        let (source, target) = self.backups.resolve(backup)?;
        let _guard = self.writer.lock();

        let content = fs::read_to_string(&source).map_err(|e| StoreError::Read {
            path: source.clone(),
            source: e,
        })?;
        let live = self.path(target);
        let current = read_optional(&live)?;
        let backup_path = match &current {
            Some(snapshot) => Some(self.backups.write(target.file_name(), &snapshot.content)?),
            None => None,
        };
        let expected = current.as_ref().map(|s| s.fingerprint.as_str());
        write_atomic(&live, &content, Some(expected))?;

        info!(from = %source.display(), to = %live.display(), "restored backup");
        Ok(SaveOutcome::saved(
            format!("Restored {} from {}", target.file_name(), source.display()),
            backup_path,
        ))
    }

    /// Read-modify-write one data file. Callers hold the writer lock.
    fn rewrite<F>(&self, file: DataFile, update: F) -> Result<PathBuf>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let path = self.path(file);
        let before = read_snapshot(&path)?;
        let content = update(&before.content)?;
        let backup = self.backups.write(file.file_name(), &before.content)?;
        write_atomic(&path, &content, Some(Some(&before.fingerprint)))?;
        debug!(path = %path.display(), "rewrote data file");
        Ok(backup)
    }
}

/// Raw language records indexed by normalized id.
struct LanguageTable {
    doc: LanguagesDocument,
    index: HashMap<String, usize>,
}

impl LanguageTable {
    fn parse(content: &str) -> Result<Self> {
        let doc = LanguagesDocument::from_yaml(content)?;
        let mut index = HashMap::new();
        for (pos, raw) in doc.languages.iter().enumerate() {
            index.entry(adapt_language_data(raw).id).or_insert(pos);
        }
        Ok(Self { doc, index })
    }

    fn get(&self, id: &str) -> Option<Language> {
        self.index
            .get(id)
            .map(|&pos| adapt_language_data(&self.doc.languages[pos]))
    }

    /// Returns `true` when the record was appended.
    fn upsert(&mut self, language: &Language) -> Result<bool> {
        let value = serde_json::to_value(language)?;
        match self.index.get(&language.id) {
            Some(&pos) => {
                self.doc.languages[pos] = value;
                Ok(false)
            }
            None => {
                self.index
                    .insert(language.id.clone(), self.doc.languages.len());
                self.doc.languages.push(value);
                Ok(true)
            }
        }
    }

    fn to_yaml(&mut self) -> Result<String> {
        self.doc.version = DOCUMENT_VERSION;
        Ok(self.doc.to_yaml()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (tempfile::TempDir, DataRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = DataRepository::new(dir.path().join("data"), dir.path().join("backups"));
        repo.init_from_seed().unwrap();
        (dir, repo)
    }

    #[test]
    fn test_init_is_idempotent() {
        let (_dir, repo) = seeded();
        assert!(repo.init_from_seed().unwrap().is_empty());
        assert!(repo.path(DataFile::CultureSidecar).exists());
        assert_eq!(
            repo.load_catalog().unwrap().len(),
            Catalog::builtin().unwrap().len()
        );
    }

    #[test]
    fn test_missing_languages_file_is_a_failed_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DataRepository::new(dir.path().join("data"), dir.path().join("backups"));
        let outcome = repo.save_language_records(&[]);
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("failed to save languages"));
        assert!(repo.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_is_not_updated_by_saves() {
        let (_dir, repo) = seeded();
        let before = repo.load_catalog().unwrap();
        let row = BasicInfoRow {
            id: "xx".to_string(),
            name: "Xyzlang".to_string(),
            family: "TestFam".to_string(),
            ..BasicInfoRow::default()
        };
        assert!(repo.save_languages(&[row], &[]).success);
        assert!(before.language_by_id("xx").is_none());
        assert!(repo.load_catalog().unwrap().language_by_id("xx").is_some());
    }

    #[test]
    fn test_culture_requires_overview_and_business_use() {
        let (_dir, repo) = seeded();
        let info = CultureInfo {
            overview: String::new(),
            business_use: " ".to_string(),
            entertainment: Vec::new(),
            cuisine: Vec::new(),
            cultural_info: None,
        };
        let outcome = repo.save_culture_info("sw", info);
        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 2);
        assert!(repo.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_culture_save_writes_sidecar_and_dataset_backup() {
        let (_dir, repo) = seeded();
        let info = CultureInfo {
            overview: "Swahili is a lingua franca of East Africa.".to_string(),
            business_use: "Trade across East Africa".to_string(),
            entertainment: vec!["Bongo Flava".to_string()],
            cuisine: Vec::new(),
            cultural_info: None,
        };
        let outcome = repo.save_culture_info("sw", info.clone());
        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.inserted, 1);
        assert!(outcome.backup_path.is_some());

        let sidecar = fs::read_to_string(repo.path(DataFile::CultureSidecar)).unwrap();
        let map: BTreeMap<String, CultureInfo> = serde_json::from_str(&sidecar).unwrap();
        assert_eq!(map.get("sw"), Some(&info));

        let names: Vec<_> = repo
            .list_backups()
            .unwrap()
            .into_iter()
            .map(|b| b.file_name)
            .collect();
        assert!(names.iter().any(|n| n.ends_with(CULTURE_DATASET)));
        assert!(names.iter().any(|n| n.ends_with("_culture.yaml")));
        assert!(names.iter().any(|n| n.ends_with("_culture.json")));

        let catalog = repo.load_catalog().unwrap();
        assert_eq!(catalog.culture_info("sw"), info);
    }

    #[test]
    fn test_sidecar_failure_reports_the_partial_save() {
        let (_dir, repo) = seeded();
        let sidecar = repo.path(DataFile::CultureSidecar);
        fs::remove_file(&sidecar).unwrap();
        fs::create_dir(&sidecar).unwrap();

        let info = CultureInfo {
            overview: "Swahili overview".to_string(),
            business_use: "Regional trade".to_string(),
            entertainment: Vec::new(),
            cuisine: Vec::new(),
            cultural_info: None,
        };
        let outcome = repo.save_culture_info("sw", info.clone());
        assert!(!outcome.success);
        assert!(
            outcome
                .message
                .starts_with("Saved culture.yaml but failed to write culture.json"),
            "{}",
            outcome.message
        );
        assert_eq!(outcome.inserted, 1);
        assert!(outcome.backup_path.is_some());
        assert_eq!(repo.load_catalog().unwrap().culture_info("sw"), info);
    }

    #[test]
    fn test_resource_lists_are_replaced_wholesale_and_sorted() {
        let (_dir, repo) = seeded();
        let before = repo.load_catalog().unwrap();
        let rows = vec![
            LearningResourceRow {
                language_id: "es".to_string(),
                title: "Only one".to_string(),
                resource_type: Some(fsi_core::ResourceType::Website),
                ..LearningResourceRow::default()
            },
            LearningResourceRow {
                language_id: "zh".to_string(),
                ..LearningResourceRow::default()
            },
        ];
        let outcome = repo.save_learning_resources(&rows);
        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.updated, 2);

        let after = repo.load_catalog().unwrap();
        assert_eq!(after.learning_resources("es").len(), 1);
        assert!(after.learning_resources("zh").is_empty());
        assert_eq!(after.learning_resources("fr"), before.learning_resources("fr"));

        let ids: Vec<_> = after.resources().keys().cloned().collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_restore_round_trip() {
        let (_dir, repo) = seeded();
        let original = fs::read_to_string(repo.path(DataFile::Languages)).unwrap();
        let outcome = repo.save_language_records(&[]);
        let backup = outcome.backup_path.unwrap();

        fs::write(repo.path(DataFile::Languages), "version: 1\nlanguages: []\n").unwrap();
        let restored = repo.restore_backup(&backup);
        assert!(restored.success, "{}", restored.message);
        assert_eq!(fs::read_to_string(repo.path(DataFile::Languages)).unwrap(), original);

        let undo = restored.backup_path.unwrap();
        assert_eq!(fs::read_to_string(undo).unwrap(), "version: 1\nlanguages: []\n");
    }
}
