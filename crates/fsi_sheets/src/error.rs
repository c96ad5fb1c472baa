/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Message shown for any workbook that cannot be read at all.
pub const FORMAT_ERROR: &str = "file format error or corrupted file";

#[derive(Debug, Error)]
pub enum SheetError {
    /// The bytes are not a readable spreadsheet. Row-level problems are
    /// never reported this way.
    #[error("file format error or corrupted file: {0}")]
    Format(String),

    #[error("failed to write workbook: {0}")]
    Write(String),
}

impl From<calamine::Error> for SheetError {
    fn from(e: calamine::Error) -> Self {
        SheetError::Format(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Write(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
