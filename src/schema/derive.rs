// src/schema/derive.rs

use crate::process::raw_table::{BlankRule, Cell, RawTable};
use crate::process::utils::{normalize_id, normalize_number_like, normalize_string, normalize_year};
use crate::schema::columns::{ColumnIndex, Field, DISTRIBUTION_COLUMNS, PROJECT_COLUMNS};
use crate::schema::types::{Details, DistributionRow, ProjectRow, RowKey};
use tracing::{debug, instrument};

fn key_of(idx: &ColumnIndex, row: &[Cell]) -> RowKey {
    RowKey {
        project_name: normalize_string(idx.cell(row, Field::ProjectName)),
        project_id: normalize_id(idx.cell(row, Field::ProjectId)),
        subproject_name: normalize_string(idx.cell(row, Field::SubprojectName)),
        subproject_id: normalize_id(idx.cell(row, Field::SubprojectId)),
    }
}

fn details_of(idx: &ColumnIndex, row: &[Cell]) -> Details {
    Details {
        year_announced: normalize_year(idx.cell(row, Field::YearAnnounced)),
        effective_period: normalize_string(idx.cell(row, Field::EffectivePeriod)),
        country_region: normalize_string(idx.cell(row, Field::CountryRegion)),
        type_and_status: normalize_string(idx.cell(row, Field::TypeAndStatus)),
        numbers: normalize_number_like(idx.cell(row, Field::Numbers)),
        targeted_entities: normalize_string(idx.cell(row, Field::TargetedEntities)),
        notes: normalize_string(idx.cell(row, Field::Notes)),
        sources: normalize_string(idx.cell(row, Field::Sources)),
    }
}

/// Iterate the non-blank rows of `table`, logging which columns were absent.
fn data_rows<'a>(
    table: &'a RawTable,
    mapping: &[(&str, Field)],
    rule: BlankRule,
) -> (ColumnIndex, impl Iterator<Item = &'a Vec<Cell>>) {
    let idx = ColumnIndex::from_headers(&table.headers, mapping);
    let missing = idx.missing(mapping);
    if !missing.is_empty() {
        debug!(sheet = %table.sheet_name, ?missing, "columns absent; treating as empty");
    }
    let rows = table
        .rows
        .iter()
        .filter(move |row| !table.is_blank_row(row, rule));
    (idx, rows)
}

#[instrument(level = "debug", skip(table), fields(sheet = %table.sheet_name))]
pub fn project_rows(table: &RawTable) -> Vec<ProjectRow> {
    // header-less columns never keep a project row alive
    let (idx, rows) = data_rows(table, PROJECT_COLUMNS, BlankRule::NamedColumns);
    let out: Vec<ProjectRow> = rows
        .map(|row| ProjectRow {
            key: key_of(&idx, row),
            details: details_of(&idx, row),
        })
        .collect();
    debug!(rows = out.len(), "derived project rows");
    out
}

#[instrument(level = "debug", skip(table), fields(sheet = %table.sheet_name))]
pub fn distribution_rows(table: &RawTable) -> Vec<DistributionRow> {
    let (idx, rows) = data_rows(table, DISTRIBUTION_COLUMNS, BlankRule::AllColumns);
    let out: Vec<DistributionRow> = rows
        .map(|row| DistributionRow {
            key: key_of(&idx, row),
            distribution_name: normalize_string(idx.cell(row, Field::DistributionName)),
            distribution_id: normalize_id(idx.cell(row, Field::DistributionId)),
            details: details_of(&idx, row),
        })
        .collect();
    debug!(rows = out.len(), "derived distribution rows");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NumberLike;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn table(name: &str, headers: &[&str], rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable {
            sheet_name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn project_rows_are_normalized() {
        let t = table(
            "Project Sheet",
            &[
                "Project Name",
                "Project ID",
                "Subproject Name",
                "Year Announced",
                "Numbers",
            ],
            vec![
                vec![
                    text(" Fund A "),
                    Cell::Number(1.0),
                    text("-"),
                    text("2020-2021"),
                    text("$1,000"),
                ],
                vec![Cell::Empty; 5],
                vec![
                    text("Fund B"),
                    text("2"),
                    text("Phase 2"),
                    Cell::Number(2022.0),
                    text("n/a"),
                ],
            ],
        );
        let rows = project_rows(&t);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].key.project_name, "Fund A");
        assert_eq!(rows[0].key.project_id, "1");
        assert_eq!(rows[0].key.subproject_name, "");
        assert_eq!(rows[0].key.subproject_id, "");
        assert_eq!(rows[0].details.year_announced, "2020");
        assert_eq!(rows[0].details.numbers, NumberLike::Int(1000));
        assert_eq!(rows[0].details.sources, "");

        assert_eq!(rows[1].key.subproject_name, "Phase 2");
        assert_eq!(rows[1].details.year_announced, "2022");
        assert_eq!(rows[1].details.numbers, NumberLike::Text("n/a".into()));
    }

    #[test]
    fn distribution_rows_read_country_column() {
        let t = table(
            "Distribution Sheet",
            &["Project ID", "Distribution Name", "Distribution ID", "Country"],
            vec![vec![text("1"), text("Grant 1"), Cell::Int(10), text(" Japan ")]],
        );
        let rows = distribution_rows(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key.project_id, "1");
        assert_eq!(rows[0].distribution_name, "Grant 1");
        assert_eq!(rows[0].distribution_id, "10");
        assert_eq!(rows[0].details.country_region, "Japan");
        assert_eq!(rows[0].details.numbers, NumberLike::absent());
    }

    #[test]
    fn unknown_columns_keep_rows_alive() {
        let t = table(
            "Project Sheet",
            &["Program", "Notes"],
            vec![vec![text("X"), text("y")], vec![Cell::Empty, text("  ")]],
        );
        let rows = project_rows(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, RowKey::default());
        assert_eq!(rows[0].details.numbers, NumberLike::absent());
    }

    #[test]
    fn headerless_columns_count_only_on_distribution_sheet() {
        let headers = ["Project Name", "", "Unnamed: 2"];
        let rows = vec![
            vec![Cell::Empty, text("stray"), Cell::Empty],
            vec![Cell::Empty, Cell::Empty, Cell::Int(3)],
            vec![Cell::Empty, Cell::Empty, Cell::Empty],
        ];

        let projects = project_rows(&table("Project Sheet", &headers, rows.clone()));
        assert!(projects.is_empty());

        let dists = distribution_rows(&table("Distribution Sheet", &headers, rows));
        assert_eq!(dists.len(), 2);
    }
}
