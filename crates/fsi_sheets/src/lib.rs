/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The four-sheet workbook used to edit the language dataset by hand.
//!
//! [`export_workbook`] turns a [`fsi_core::Catalog`] into a [`Workbook`];
//! [`parse_workbook`] turns one back into typed rows plus a list of
//! validation messages. [`xlsx`] moves workbooks to and from files.

pub mod error;
pub mod export;
pub mod import;
pub mod rows;
pub mod workbook;
pub mod xlsx;

pub use error::{SheetError, FORMAT_ERROR};
pub use export::export_workbook;
pub use import::{parse_workbook, ParsedWorkbook, RowCounts, NO_DATA_ERROR};
pub use rows::{
    BasicInfoRow, CultureInfoRow, FsiDetailRow, LearningResourceRow, SHEET_NAMES,
};
pub use workbook::{Cell, Record, Sheet, Workbook};
pub use xlsx::{read_workbook, write_workbook};
