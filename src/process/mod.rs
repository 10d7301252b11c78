// src/process/mod.rs
use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info};

pub mod aggregate;
pub mod convert;
pub mod matcher;
pub mod raw_table;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use raw_table::{Cell, RawTable};

use crate::schema::{DISTRIBUTION_SHEET, PROJECT_SHEET};

/// The two tables the converter reads.
#[derive(Debug)]
pub struct SheetPair {
    pub project: RawTable,
    pub distribution: RawTable,
}

/// First used row becomes the header; every later row is data.
fn range_to_table(sheet_name: &str, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|hdr| {
            hdr.iter()
                .map(|c| Cell::from(c).as_text().unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows.map(|r| r.iter().map(Cell::from).collect()).collect();
    debug!(
        sheet = sheet_name,
        columns = headers.len(),
        rows = rows.len(),
        "read sheet"
    );
    RawTable {
        sheet_name: sheet_name.to_string(),
        headers,
        rows,
    }
}

/// Open the workbook at `path` (format picked from its extension) and
/// read the Project and Distribution sheets.
///
/// Fails if the file cannot be opened or either sheet is missing.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<SheetPair> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {:?}", path))?;

    let available = workbook.sheet_names();
    for wanted in [PROJECT_SHEET, DISTRIBUTION_SHEET] {
        if !available.iter().any(|s| s == wanted) {
            bail!(
                "sheet {:?} not found in {:?} (available: {:?})",
                wanted,
                path,
                available
            );
        }
    }

    let mut read = |name: &str| -> Result<RawTable> {
        let range = workbook
            .worksheet_range(name)
            .with_context(|| format!("Failed to read sheet {:?} from {:?}", name, path))?;
        Ok(range_to_table(name, &range))
    };
    let project = read(PROJECT_SHEET)?;
    let distribution = read(DISTRIBUTION_SHEET)?;

    info!(
        project_rows = project.rows.len(),
        distribution_rows = distribution.rows.len(),
        "loaded workbook"
    );
    Ok(SheetPair {
        project,
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::fixtures::{text, write_workbook};
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,policysheets::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn test_load_workbook_reads_both_sheets() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("raw_data.xlsx");
        write_workbook(
            &path,
            &[
                (
                    "Distribution Sheet",
                    vec![
                        vec![text("Project ID"), text("Distribution Name")],
                        vec![Cell::Number(1.0), text("Grant")],
                    ],
                ),
                (
                    "Project Sheet",
                    vec![
                        vec![text(" Project Name "), text("Project ID")],
                        vec![text("Fund A"), text("1")],
                        vec![text("Fund B"), Cell::Number(2.0)],
                    ],
                ),
                ("Notes", vec![vec![text("ignored")]]),
            ],
        )?;

        let sheets = load_workbook(&path)?;
        assert_eq!(sheets.project.sheet_name, "Project Sheet");
        assert_eq!(sheets.project.headers, vec!["Project Name", "Project ID"]);
        assert_eq!(sheets.project.rows.len(), 2);
        assert_eq!(sheets.project.rows[1][1], Cell::Number(2.0));

        assert_eq!(
            sheets.distribution.headers,
            vec!["Project ID", "Distribution Name"]
        );
        assert_eq!(sheets.distribution.rows.len(), 1);
        assert_eq!(sheets.distribution.rows[0][1], text("Grant"));
        Ok(())
    }

    #[test]
    fn test_missing_sheet_is_fatal() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("raw_data.xlsx");
        write_workbook(
            &path,
            &[("Project Sheet", vec![vec![text("Project Name")]])],
        )?;

        let err = load_workbook(&path).expect_err("distribution sheet is missing");
        assert!(err.to_string().contains("Distribution Sheet"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_fatal() {
        init_test_logging();
        let dir = tempdir().unwrap();
        assert!(load_workbook(dir.path().join("absent.xlsx")).is_err());
    }
}
