//! Workbook builders shared by the loader and pipeline tests.

use crate::process::raw_table::Cell;
use anyhow::Result;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// Write an xlsx file with one worksheet per `(name, rows)` pair.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) -> Result<()> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => {
                        sheet.write_string(r, c, s)?;
                    }
                    Cell::Int(i) => {
                        sheet.write_number(r, c, *i as f64)?;
                    }
                    Cell::Number(f) => {
                        sheet.write_number(r, c, *f)?;
                    }
                    Cell::Bool(b) => {
                        sheet.write_boolean(r, c, *b)?;
                    }
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}
