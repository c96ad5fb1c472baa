/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! FSI language difficulty data.
//!
//! This crate holds the canonical record types for languages, learning
//! resources and culture notes, the field synthesis rules that fill in
//! anything a record omits, and the read-side adapter that turns loosely
//! typed stored records into fully populated [`Language`] values.
//!
//! # Example
//!
//! ```rust
//! use fsi_core::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let spanish = catalog.language_by_id("es").unwrap();
//! assert_eq!(spanish.fsi.category, 1);
//!
//! let detail = catalog.language_detail("es").unwrap();
//! assert_eq!(detail.geography.primary_regions.len(), 3);
//! ```

pub mod adapter;
pub mod catalog;
pub mod detail;
pub mod document;
pub mod error;
pub mod format;
pub mod geography;
pub mod model;
pub mod query;
pub mod synthesis;

pub use adapter::{adapt_language_data, normalize_language, Normalized};
pub use catalog::{default_culture_info, Catalog, FEATURED_LIMIT, FEATURED_TERMS};
pub use detail::{ExtendedLanguageDetail, Geography, ResourceGroup, SpeakerStats};
pub use document::{
    CultureDocument, LanguagesDocument, ResourcesDocument, VersionedDocument, DOCUMENT_VERSION,
};
pub use error::CoreError;
pub use format::{format_speakers, global_rank};
pub use model::{
    CultureInfo, CultureScores, Difficulty, FsiDetails, FsiInfo, Language, LearningResource,
    ResourceType,
};
pub use query::{compare_languages, CompareError, Comparison, LanguageQuery, SortKey};
pub use synthesis::{
    clamp_category, default_color, default_description, default_fsi_details, default_hours,
};
