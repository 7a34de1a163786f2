use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::flatten::{Cell, Row};

/// Everything that ends up in one sheet: quota metadata rows at the top,
/// a blank spacer row, then the header and data rows.
pub struct Report {
    pub meta: Vec<Row>,
    pub header: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new(header: impl Into<Vec<&'static str>>) -> Self {
        Self {
            meta: Vec::new(),
            header: header.into(),
            rows: Vec::new(),
        }
    }
}

/// Build a fresh workbook and write it to `path`. Poll loops call this
/// every iteration, so the file is always a full rewrite, never an append.
pub fn save_report(path: &Path, sheet_name: &str, report: &Report) -> Result<()> {
    let mut workbook = build_workbook(sheet_name, report)?;
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn build_workbook(sheet_name: &str, report: &Report) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    let mut row_idx: u32 = 0;
    for row in &report.meta {
        write_row(sheet, row_idx, row)?;
        row_idx += 1;
    }
    // Spacer row between metadata and the table.
    row_idx += 1;

    for (col_idx, title) in report.header.iter().enumerate() {
        sheet.write_string(row_idx, col_idx as u16, *title)?;
    }
    row_idx += 1;

    for row in &report.rows {
        write_row(sheet, row_idx, row)?;
        row_idx += 1;
    }

    Ok(workbook)
}

fn write_row(sheet: &mut Worksheet, row_idx: u32, row: &Row) -> Result<()> {
    for (col_idx, cell) in row.iter().enumerate() {
        let col = col_idx as u16;
        match cell {
            Cell::Text(value) => {
                sheet
                    .write_string(row_idx, col, value)
                    .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
            }
            Cell::Number(value) => {
                sheet
                    .write_number(row_idx, col, *value)
                    .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
            }
            Cell::Bool(value) => {
                sheet
                    .write_boolean(row_idx, col, *value)
                    .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
            }
            Cell::Empty => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::SLOT_HEADER;

    #[test]
    fn report_with_mixed_cells_builds_a_workbook() {
        let mut report = Report::new(SLOT_HEADER);
        report.meta = vec![
            vec![Cell::text("Requests Used"), Cell::text("5")],
            vec![Cell::text("Requests Remaining"), Cell::Empty],
        ];
        report.rows = vec![vec![
            Cell::text("abc"),
            Cell::Number(-150.0),
            Cell::Bool(false),
            Cell::Empty,
            Cell::text("A"),
        ]];
        let mut workbook = build_workbook("Sheet1", &report).expect("workbook should build");
        let buffer = workbook.save_to_buffer().expect("workbook should serialize");
        assert!(!buffer.is_empty());
    }

    #[test]
    fn long_sheet_names_are_rejected_by_writer() {
        let report = Report::new(SLOT_HEADER);
        // Excel caps sheet names at 31 characters.
        let result = build_workbook("a_sheet_name_well_over_thirty_one_characters", &report);
        assert!(result.is_err());
    }
}
