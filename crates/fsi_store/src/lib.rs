/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! File-backed storage for the FSI language dataset.
//!
//! [`DataRepository`] owns a data directory of versioned YAML documents and
//! a backups directory. Saves are serialized by an in-process writer lock,
//! guarded across processes by a content fingerprint check, written
//! atomically, and always preceded by a backup of the content they replace.
//!
//! [`admin::AdminService`] exposes the same operations with the request and
//! response shapes of the admin endpoints.

pub mod admin;
pub mod apply;
pub mod backup;
pub mod error;
pub mod files;
pub mod outcome;
pub mod repository;

pub use admin::{AdminService, Response};
pub use backup::{BackupEntry, BackupStore};
pub use error::StoreError;
pub use files::DataFile;
pub use outcome::SaveOutcome;
pub use repository::DataRepository;
