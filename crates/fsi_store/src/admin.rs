/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Admin operations with their HTTP-equivalent status codes.
//!
//! Each operation returns a [`Response`] whose body serializes to the JSON
//! an HTTP front end would send back. Nothing here panics or returns `Err`.

use crate::backup::BackupEntry;
use crate::outcome::SaveOutcome;
use crate::repository::DataRepository;
use fsi_core::{normalize_language, CultureInfo, CultureScores, Language, LearningResource};
use fsi_sheets::{parse_workbook, read_workbook, RowCounts, FORMAT_ERROR, NO_DATA_ERROR};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const CONFLICT: u16 = 409;
    pub const PAYLOAD_TOO_LARGE: u16 = 413;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    pub status: u16,
    pub body: T,
}

impl<T> Response<T> {
    fn new(status: u16, body: T) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Status for a failed save: conflicts are retryable, anything else is a
/// server-side failure.
fn failure_status(outcome: &SaveOutcome) -> u16 {
    if outcome.conflict {
        status::CONFLICT
    } else {
        status::INTERNAL_SERVER_ERROR
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_counts: Option<RowCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<SaveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_resources: Option<SaveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture_info: Option<SaveOutcome>,
}

impl ImportReport {
    fn rejected(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDataRequest {
    /// Language records in any shape the adapter understands.
    #[serde(default)]
    pub languages: Vec<Value>,
    #[serde(default)]
    pub learning_resources: BTreeMap<String, Vec<LearningResource>>,
    /// `false` acknowledges the batch without writing anything.
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDataReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<SaveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_resources: Option<SaveOutcome>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCultureRequest {
    pub language_id: Option<String>,
    pub culture_info: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupList {
    pub success: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub backups: Vec<BackupEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub backup_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct AdminService {
    repo: DataRepository,
    max_upload_bytes: u64,
}

impl AdminService {
    pub fn new(repo: DataRepository, max_upload_bytes: u64) -> Self {
        Self {
            repo,
            max_upload_bytes,
        }
    }

    pub fn repository(&self) -> &DataRepository {
        &self.repo
    }

    /// Validate an uploaded workbook and, if it is clean, save all of it.
    pub fn import_workbook(&self, file_name: &str, bytes: &[u8]) -> Response<ImportReport> {
        if !has_accepted_extension(file_name) {
            return Response::new(
                status::BAD_REQUEST,
                ImportReport::rejected(
                    "Invalid file type. Please upload an Excel file (.xlsx or .xls)",
                    Vec::new(),
                ),
            );
        }
        if bytes.len() as u64 > self.max_upload_bytes {
            return Response::new(
                status::PAYLOAD_TOO_LARGE,
                ImportReport::rejected(
                    format!(
                        "File too large. Maximum size is {}MB",
                        self.max_upload_bytes / (1024 * 1024)
                    ),
                    Vec::new(),
                ),
            );
        }

        let workbook = match read_workbook(bytes) {
            Ok(workbook) => workbook,
            Err(e) => {
                warn!(file = file_name, error = %e, "unreadable workbook");
                return Response::new(
                    status::BAD_REQUEST,
                    ImportReport::rejected(FORMAT_ERROR, vec![e.to_string()]),
                );
            }
        };

        let parsed = parse_workbook(&workbook);
        let row_counts = RowCounts::from(&parsed);
        if !parsed.is_valid() {
            let message = if parsed.errors.iter().any(|e| e == NO_DATA_ERROR) {
                FORMAT_ERROR
            } else {
                "Validation failed"
            };
            info!(file = file_name, errors = parsed.errors.len(), "import rejected");
            let mut report = ImportReport::rejected(message, parsed.errors);
            report.row_counts = Some(row_counts);
            return Response::new(status::BAD_REQUEST, report);
        }

        let languages = (!parsed.basic_info.is_empty())
            .then(|| self.repo.save_languages(&parsed.basic_info, &parsed.fsi_details));
        let learning_resources = (!parsed.learning_resources.is_empty())
            .then(|| self.repo.save_learning_resources(&parsed.learning_resources));
        let culture_info = (!parsed.culture_info.is_empty())
            .then(|| self.repo.save_culture_rows(&parsed.culture_info));

        let failed = [&languages, &learning_resources, &culture_info]
            .into_iter()
            .flatten()
            .find(|outcome| !outcome.success);
        let (code, success, message) = match failed {
            Some(outcome) => (
                failure_status(outcome),
                false,
                "Import failed while saving data".to_string(),
            ),
            None => (status::OK, true, "Import completed".to_string()),
        };
        info!(file = file_name, status = code, "import finished");

        Response::new(
            code,
            ImportReport {
                success,
                message,
                errors: Vec::new(),
                row_counts: Some(row_counts),
                languages,
                learning_resources,
                culture_info,
            },
        )
    }

    /// Accept a batch of language records and resource lists.
    pub fn save_data(&self, request: SaveDataRequest) -> Response<SaveDataReport> {
        let mut errors = Vec::new();
        let mut languages: Vec<Language> = Vec::with_capacity(request.languages.len());
        for (idx, raw) in request.languages.iter().enumerate() {
            match normalize_language(raw).into_result() {
                Ok(language) => languages.push(language),
                Err(e) => errors.push(format!("languages[{idx}]: {e}")),
            }
        }
        if !errors.is_empty() {
            return Response::new(
                status::BAD_REQUEST,
                SaveDataReport {
                    success: false,
                    message: "Validation failed".to_string(),
                    errors,
                    ..SaveDataReport::default()
                },
            );
        }

        if !request.persist {
            return Response::new(
                status::OK,
                SaveDataReport {
                    success: true,
                    message: format!(
                        "Received {} languages and resources for {} languages (not persisted)",
                        languages.len(),
                        request.learning_resources.len()
                    ),
                    ..SaveDataReport::default()
                },
            );
        }

        let languages =
            (!languages.is_empty()).then(|| self.repo.save_language_records(&languages));
        let learning_resources = (!request.learning_resources.is_empty())
            .then(|| self.repo.save_resource_lists(request.learning_resources));

        let failed = [&languages, &learning_resources]
            .into_iter()
            .flatten()
            .find(|outcome| !outcome.success);
        let (code, success, message) = match failed {
            Some(outcome) => (failure_status(outcome), false, "Failed to save data"),
            None => (status::OK, true, "Data saved"),
        };

        Response::new(
            code,
            SaveDataReport {
                success,
                message: message.to_string(),
                errors: Vec::new(),
                persisted: success,
                languages,
                learning_resources,
            },
        )
    }

    /// Upsert one language's culture notes. The body carries the backup path.
    pub fn save_culture_info(&self, request: SaveCultureRequest) -> Response<SaveOutcome> {
        let (Some(language_id), Some(raw)) = (request.language_id, request.culture_info) else {
            return Response::new(
                status::BAD_REQUEST,
                SaveOutcome::failed("languageId and cultureInfo are required"),
            );
        };

        let outcome = self.repo.save_culture_info(&language_id, culture_from_value(&raw));
        let code = if outcome.success {
            status::OK
        } else if !outcome.errors.is_empty() {
            status::BAD_REQUEST
        } else {
            failure_status(&outcome)
        };
        Response::new(code, outcome)
    }

    pub fn list_backups(&self) -> Response<BackupList> {
        match self.repo.list_backups() {
            Ok(backups) => Response::new(
                status::OK,
                BackupList {
                    success: true,
                    message: String::new(),
                    backups,
                },
            ),
            Err(e) => {
                warn!(error = %e, "failed to list backups");
                Response::new(
                    status::INTERNAL_SERVER_ERROR,
                    BackupList {
                        success: false,
                        message: format!("Failed to list backups: {e}"),
                        backups: Vec::new(),
                    },
                )
            }
        }
    }

    pub fn restore_backup(&self, request: RestoreRequest) -> Response<SaveOutcome> {
        let Some(path) = request.backup_path else {
            return Response::new(
                status::BAD_REQUEST,
                SaveOutcome::failed("backupPath is required"),
            );
        };
        if let Err(e) = self.repo.backup_target(&path) {
            return Response::new(status::BAD_REQUEST, SaveOutcome::failed(e.to_string()));
        }

        let outcome = self.repo.restore_backup(&path);
        let code = if outcome.success {
            status::OK
        } else {
            failure_status(&outcome)
        };
        Response::new(code, outcome)
    }
}

fn has_accepted_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Read culture notes leniently: list fields that are not lists become
/// empty and malformed scores are dropped.
fn culture_from_value(raw: &Value) -> CultureInfo {
    let text = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let list = |key: &str| -> Vec<String> {
        raw.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    };
    CultureInfo {
        overview: text("overview"),
        business_use: text("businessUse"),
        entertainment: list("entertainment"),
        cuisine: list("cuisine"),
        cultural_info: raw
            .get("culturalInfo")
            .and_then(|v| serde_json::from_value::<CultureScores>(v.clone()).ok()),
    }
}
