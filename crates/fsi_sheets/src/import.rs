/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Workbook → typed rows, with row-level validation.
//!
//! Parsing never fails on business data. Every problem becomes one message
//! in [`ParsedWorkbook::errors`] and parsing carries on, so a single import
//! reports everything an editor needs to fix.

use crate::rows::{
    col, split_list, BasicInfoRow, CultureInfoRow, FsiDetailRow, LearningResourceRow, BASIC_INFO,
    CULTURE_INFO, FSI_DETAILS, LEARNING_RESOURCES,
};
use crate::workbook::{Cell, Record, Sheet, Workbook};
use fsi_core::ResourceType;
use serde::Serialize;

pub const NO_DATA_ERROR: &str = "No data found in the workbook";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorkbook {
    pub basic_info: Vec<BasicInfoRow>,
    pub fsi_details: Vec<FsiDetailRow>,
    pub learning_resources: Vec<LearningResourceRow>,
    pub culture_info: Vec<CultureInfoRow>,
    pub errors: Vec<String>,
}

impl ParsedWorkbook {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.basic_info.len()
            + self.fsi_details.len()
            + self.learning_resources.len()
            + self.culture_info.len()
    }
}

/// Row counts per sheet, as reported back to the importer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCounts {
    pub basic_info: usize,
    pub fsi_details: usize,
    pub learning_resources: usize,
    pub culture_info: usize,
}

impl From<&ParsedWorkbook> for RowCounts {
    fn from(parsed: &ParsedWorkbook) -> Self {
        Self {
            basic_info: parsed.basic_info.len(),
            fsi_details: parsed.fsi_details.len(),
            learning_resources: parsed.learning_resources.len(),
            culture_info: parsed.culture_info.len(),
        }
    }
}

/// Parse all four sheets and collect every validation problem.
pub fn parse_workbook(workbook: &Workbook) -> ParsedWorkbook {
    let mut errors = Vec::new();

    let basic_info = parse_sheet(workbook, BASIC_INFO, &mut errors, basic_info_row);
    let fsi_details = parse_sheet(workbook, FSI_DETAILS, &mut errors, fsi_detail_row);
    let learning_resources = parse_sheet(workbook, LEARNING_RESOURCES, &mut errors, resource_row);
    let culture_info = parse_sheet(workbook, CULTURE_INFO, &mut errors, culture_row);

    let mut parsed = ParsedWorkbook {
        basic_info,
        fsi_details,
        learning_resources,
        culture_info,
        errors,
    };
    if parsed.total_rows() == 0 {
        parsed.errors.push(NO_DATA_ERROR.to_string());
    }
    tracing::debug!(
        rows = parsed.total_rows(),
        errors = parsed.errors.len(),
        "parsed workbook"
    );
    parsed
}

fn parse_sheet<T>(
    workbook: &Workbook,
    name: &str,
    errors: &mut Vec<String>,
    parse_row: fn(&Record<'_>, &mut RowErrors) -> T,
) -> Vec<T> {
    let Some(sheet) = workbook.sheet(name) else {
        errors.push(format!("Missing required sheet: {name}"));
        return Vec::new();
    };
    parse_records(sheet, errors, parse_row)
}

fn parse_records<T>(
    sheet: &Sheet,
    errors: &mut Vec<String>,
    parse_row: fn(&Record<'_>, &mut RowErrors) -> T,
) -> Vec<T> {
    sheet
        .records()
        .map(|record| {
            let mut row_errors = RowErrors {
                sheet: &sheet.name,
                row: record.number,
                errors: &mut *errors,
            };
            parse_row(&record, &mut row_errors)
        })
        .collect()
}

/// Error sink that prefixes each message with its sheet and row.
struct RowErrors<'a> {
    sheet: &'a str,
    row: usize,
    errors: &'a mut Vec<String>,
}

impl RowErrors<'_> {
    fn push(&mut self, message: impl std::fmt::Display) {
        self.errors
            .push(format!("{} row {}: {}", self.sheet, self.row, message));
    }

    fn required(&mut self, record: &Record<'_>, header: &str) -> String {
        match record.text(header) {
            Some(value) => value,
            None => {
                self.push(format_args!("{header} is required"));
                String::new()
            }
        }
    }

    /// A numeric cell that must be present. Zero is a value, not a blank.
    fn required_number(&mut self, record: &Record<'_>, header: &str) -> Option<f64> {
        let cell = record.cell(header);
        if cell.is_blank() {
            self.push(format_args!("{header} is required"));
            return None;
        }
        self.number(cell, header)
    }

    fn optional_number(&mut self, record: &Record<'_>, header: &str) -> Option<f64> {
        let cell = record.cell(header);
        if cell.is_blank() {
            return None;
        }
        self.number(cell, header)
    }

    fn number(&mut self, cell: &Cell, header: &str) -> Option<f64> {
        match cell.number() {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                self.push(format_args!("{header} must be a number, got '{}'", cell.text()));
                None
            }
        }
    }

    fn score(&mut self, record: &Record<'_>, header: &str) -> Option<u8> {
        self.optional_number(record, header)
            .map(|n| n.round().clamp(0.0, f64::from(u8::MAX)) as u8)
    }

    /// An optional score that must fall in `1..=5` when present.
    fn rating(&mut self, record: &Record<'_>, header: &str) -> Option<u8> {
        match self.optional_number(record, header) {
            Some(n) if (1.0..=5.0).contains(&n) => Some(n.round() as u8),
            Some(n) => {
                self.push(format_args!("{header} must be between 1 and 5, got {n}"));
                None
            }
            None => None,
        }
    }
}

fn basic_info_row(record: &Record<'_>, errors: &mut RowErrors) -> BasicInfoRow {
    let id = errors.required(record, col::ID);
    let name = errors.required(record, col::NAME);
    let family = errors.required(record, col::FAMILY);
    let speakers = errors
        .optional_number(record, col::SPEAKERS)
        .map(|n| n.max(0.0) as u64);

    BasicInfoRow {
        id,
        name,
        native_name: record.text(col::NATIVE_NAME).unwrap_or_default(),
        countries: split_list(&record.text(col::COUNTRIES).unwrap_or_default()),
        family,
        subfamily: record.text(col::SUBFAMILY).unwrap_or_default(),
        writing_system: record.text(col::WRITING_SYSTEM).unwrap_or_default(),
        speakers,
        flag_emoji: record.text(col::FLAG_EMOJI).unwrap_or_default(),
        color: record.text(col::COLOR).unwrap_or_default(),
    }
}

fn fsi_detail_row(record: &Record<'_>, errors: &mut RowErrors) -> FsiDetailRow {
    let language_id = errors.required(record, col::LANGUAGE_ID);
    let category = errors
        .required_number(record, col::FSI_CATEGORY)
        .map(|n| n.trunc() as i64);
    let hours = errors
        .required_number(record, col::STUDY_HOURS)
        .map(|n| n.round().max(0.0) as u32);

    FsiDetailRow {
        language_id,
        language_name: record.text(col::LANGUAGE_NAME).unwrap_or_default(),
        category,
        hours,
        description: record.text(col::DESCRIPTION).unwrap_or_default(),
        grammar: errors.score(record, col::GRAMMAR),
        vocabulary: errors.score(record, col::VOCABULARY),
        pronunciation: errors.score(record, col::PRONUNCIATION),
        writing: errors.score(record, col::WRITING),
        cultural: errors.score(record, col::CULTURAL),
        overall_difficulty: errors.score(record, col::OVERALL_DIFFICULTY),
        grammar_difficulty: errors.score(record, col::GRAMMAR_DIFFICULTY),
        pronunciation_difficulty: errors.score(record, col::PRONUNCIATION_DIFFICULTY),
        vocabulary_difficulty: errors.score(record, col::VOCABULARY_DIFFICULTY),
    }
}

fn resource_row(record: &Record<'_>, errors: &mut RowErrors) -> LearningResourceRow {
    let language_id = errors.required(record, col::LANGUAGE_ID);
    let title = record.text(col::RESOURCE_TITLE).unwrap_or_default();

    let resource_type = match record.text(col::RESOURCE_TYPE) {
        Some(raw) => {
            let parsed = ResourceType::parse(&raw);
            if parsed.is_none() {
                errors.push(format_args!(
                    "{} '{raw}' is not one of app, book, course, website, video, podcast",
                    col::RESOURCE_TYPE
                ));
            }
            parsed
        }
        None => {
            if !title.is_empty() {
                errors.push(format_args!(
                    "{} is required when {} is set",
                    col::RESOURCE_TYPE,
                    col::RESOURCE_TITLE
                ));
            }
            None
        }
    };

    let rating = errors.rating(record, col::RATING);

    LearningResourceRow {
        language_id,
        language_name: record.text(col::LANGUAGE_NAME).unwrap_or_default(),
        title,
        resource_type,
        description: record.text(col::RESOURCE_DESCRIPTION).unwrap_or_default(),
        free: parse_flag(record.cell(col::FREE)),
        url: record.text(col::URL).unwrap_or_default(),
        rating,
    }
}

fn culture_row(record: &Record<'_>, errors: &mut RowErrors) -> CultureInfoRow {
    let language_id = errors.required(record, col::LANGUAGE_ID);

    // The four scores are stored together, so one set means all are needed.
    let score_headers = [
        col::BUSINESS_USE_SCORE,
        col::TRAVEL_VALUE,
        col::CULTURAL_RICHNESS,
        col::ONLINE_PRESENCE,
    ];
    let any_score = score_headers
        .iter()
        .any(|header| !record.cell(header).is_blank());
    let [business_use_score, travel_value, cultural_richness, online_presence] =
        score_headers.map(|header| {
            if any_score && record.cell(header).is_blank() {
                errors.push(format_args!(
                    "{header} is required when any culture score is set"
                ));
            }
            errors.rating(record, header)
        });

    CultureInfoRow {
        language_id,
        language_name: record.text(col::LANGUAGE_NAME).unwrap_or_default(),
        overview: record.text(col::OVERVIEW).unwrap_or_default(),
        business_use: record.text(col::BUSINESS_USE).unwrap_or_default(),
        entertainment: split_list(&record.text(col::ENTERTAINMENT).unwrap_or_default()),
        cuisine: split_list(&record.text(col::CUISINE).unwrap_or_default()),
        business_use_score,
        travel_value,
        cultural_richness,
        online_presence,
    }
}

fn parse_flag(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Number(n) => *n != 0.0,
        Cell::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1" | "free"
        ),
        Cell::Empty => false,
    }
}
