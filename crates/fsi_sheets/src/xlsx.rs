/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Spreadsheet file I/O.
//!
//! Reading goes through `calamine`, which sniffs `.xlsx`, `.xls` and `.ods`
//! from the bytes themselves. Writing always produces `.xlsx`.

use crate::error::{Result, SheetError};
use crate::workbook::{Cell, Sheet, Workbook};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::io::Cursor;

/// Read every sheet. The first row of each sheet is its header row.
pub fn read_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut source = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let mut workbook = Workbook::new();

    for name in source.sheet_names() {
        let range = source.worksheet_range(&name)?;
        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|header| header.iter().map(|d| cell_from(d).text()).collect::<Vec<_>>())
            .unwrap_or_default();
        let rows = rows
            .map(|row| row.iter().map(cell_from).collect::<Vec<_>>())
            .collect();
        tracing::debug!(sheet = %name, "read sheet");
        workbook.add_sheet(Sheet {
            name,
            headers,
            rows,
        });
    }

    Ok(workbook)
}

fn cell_from(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::from(other.to_string()),
    }
}

/// Serialize to `.xlsx` bytes with a bold header row.
pub fn write_workbook(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut out = XlsxWorkbook::new();
    let bold = Format::new().set_bold();

    for sheet in &workbook.sheets {
        let worksheet = out.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, column(col)?, header, &bold)?;
        }
        for (idx, cells) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(idx + 1)
                .map_err(|_| SheetError::Write(format!("too many rows in {}", sheet.name)))?;
            for (col, cell) in cells.iter().enumerate() {
                let col = column(col)?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                }
            }
        }
    }

    Ok(out.save_to_buffer()?)
}

fn column(idx: usize) -> Result<u16> {
    u16::try_from(idx).map_err(|_| SheetError::Write(format!("column {idx} out of range")))
}
