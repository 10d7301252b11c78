// src/schema/types.rs

use serde::Serialize;

/// A value from a numeric-like column: a number when the cell parsed as
/// one, otherwise the cell text (`"-"` when absent).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberLike {
    pub fn absent() -> Self {
        NumberLike::Text(crate::process::utils::ABSENT_NUMBER.to_string())
    }
}

impl Default for NumberLike {
    fn default() -> Self {
        Self::absent()
    }
}

/// The join key shared by project and distribution rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub project_name: String,
    pub project_id: String,
    pub subproject_name: String,
    pub subproject_id: String,
}

/// Descriptive columns present on both sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Details {
    pub year_announced: String,
    pub effective_period: String,
    pub country_region: String,
    pub type_and_status: String,
    pub numbers: NumberLike,
    pub targeted_entities: String,
    pub notes: String,
    pub sources: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectRow {
    pub key: RowKey,
    pub details: Details,
}

/// One row of the Distribution Sheet. Serializes without its key, since
/// it is always nested under the entry it was joined to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionRow {
    #[serde(skip)]
    pub key: RowKey,
    pub distribution_name: String,
    pub distribution_id: String,
    #[serde(flatten)]
    pub details: Details,
}

/// One object of the output array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub project_name: String,
    pub project_id: String,
    #[serde(flatten)]
    pub details: Details,
    pub subproject_name: String,
    pub subproject_id: String,
    pub distributions: Vec<DistributionRow>,
}

impl Entry {
    pub fn new(project: &ProjectRow, distributions: Vec<DistributionRow>) -> Self {
        Self {
            project_name: project.key.project_name.clone(),
            project_id: project.key.project_id.clone(),
            details: project.details.clone(),
            subproject_name: project.key.subproject_name.clone(),
            subproject_id: project.key.subproject_id.clone(),
            distributions,
        }
    }
}
