use crate::process::raw_table::Cell;
use std::collections::HashMap;

/// Canonical field names the sheet headers are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProjectName,
    ProjectId,
    SubprojectName,
    SubprojectId,
    DistributionName,
    DistributionId,
    YearAnnounced,
    EffectivePeriod,
    CountryRegion,
    TypeAndStatus,
    Numbers,
    TargetedEntities,
    Notes,
    Sources,
}

pub const PROJECT_SHEET: &str = "Project Sheet";
pub const DISTRIBUTION_SHEET: &str = "Distribution Sheet";

pub const PROJECT_COLUMNS: &[(&str, Field)] = &[
    ("Project Name", Field::ProjectName),
    ("Project ID", Field::ProjectId),
    ("Subproject Name", Field::SubprojectName),
    ("Subproject ID", Field::SubprojectId),
    ("Year Announced", Field::YearAnnounced),
    ("Effective Period", Field::EffectivePeriod),
    ("Country / Region", Field::CountryRegion),
    ("Type & Status", Field::TypeAndStatus),
    ("Numbers", Field::Numbers),
    ("Targeted Firms or Parts of Value Chain", Field::TargetedEntities),
    ("Notes / Description", Field::Notes),
    ("Source", Field::Sources),
];

// The distribution sheet labels its region column "Country".
pub const DISTRIBUTION_COLUMNS: &[(&str, Field)] = &[
    ("Project Name", Field::ProjectName),
    ("Project ID", Field::ProjectId),
    ("Subproject Name", Field::SubprojectName),
    ("Subproject ID", Field::SubprojectId),
    ("Distribution Name", Field::DistributionName),
    ("Distribution ID", Field::DistributionId),
    ("Year Announced", Field::YearAnnounced),
    ("Effective Period", Field::EffectivePeriod),
    ("Country", Field::CountryRegion),
    ("Type & Status", Field::TypeAndStatus),
    ("Numbers", Field::Numbers),
    ("Targeted Firms or Parts of Value Chain", Field::TargetedEntities),
    ("Notes / Description", Field::Notes),
    ("Source", Field::Sources),
];

static EMPTY_CELL: Cell = Cell::Empty;

/// Position of each known field within a sheet's header row.
#[derive(Debug, Default)]
pub struct ColumnIndex {
    positions: HashMap<Field, usize>,
}

impl ColumnIndex {
    /// Resolve `headers` against `mapping`. Unknown headers are ignored;
    /// when a header repeats, its first column wins.
    pub fn from_headers(headers: &[String], mapping: &[(&str, Field)]) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            let header = header.trim();
            if let Some((_, field)) = mapping.iter().find(|(name, _)| *name == header) {
                positions.entry(*field).or_insert(i);
            }
        }
        Self { positions }
    }

    pub fn has(&self, field: Field) -> bool {
        self.positions.contains_key(&field)
    }

    /// Fields from `mapping` with no matching header.
    pub fn missing(&self, mapping: &[(&str, Field)]) -> Vec<Field> {
        mapping
            .iter()
            .map(|(_, f)| *f)
            .filter(|f| !self.has(*f))
            .collect()
    }

    /// The cell for `field` in `row`; absent columns read as empty.
    pub fn cell<'a>(&self, row: &'a [Cell], field: Field) -> &'a Cell {
        self.positions
            .get(&field)
            .and_then(|&i| row.get(i))
            .unwrap_or(&EMPTY_CELL)
    }
}
