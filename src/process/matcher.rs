use crate::schema::{DistributionRow, RowKey};
use tracing::trace;

/// Joins project keys against the distribution table.
///
/// A key matches exactly when all four key fields are equal. If no row
/// matches exactly, the relaxed comparison is used instead: project and
/// subproject names compared case-insensitively, subproject ids
/// compared exactly, project ids ignored. Results keep source order and
/// duplicates.
pub struct Matcher<'a> {
    rows: &'a [DistributionRow],
    // lowercased (project_name, subproject_name) per row
    folded: Vec<(String, String)>,
}

impl<'a> Matcher<'a> {
    pub fn new(rows: &'a [DistributionRow]) -> Self {
        let folded = rows
            .iter()
            .map(|r| {
                (
                    r.key.project_name.to_lowercase(),
                    r.key.subproject_name.to_lowercase(),
                )
            })
            .collect();
        Self { rows, folded }
    }

    pub fn rows(&self) -> &'a [DistributionRow] {
        self.rows
    }

    /// Indices into the distribution table of every row matching `key`.
    pub fn indices(&self, key: &RowKey) -> Vec<usize> {
        let strict: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.key == *key)
            .map(|(i, _)| i)
            .collect();
        if !strict.is_empty() {
            return strict;
        }

        let pn = key.project_name.to_lowercase();
        let spn = key.subproject_name.to_lowercase();
        let relaxed: Vec<usize> = self
            .folded
            .iter()
            .zip(self.rows)
            .enumerate()
            .filter(|(_, ((rpn, rspn), r))| {
                *rpn == pn && *rspn == spn && r.key.subproject_id == key.subproject_id
            })
            .map(|(i, _)| i)
            .collect();
        if !relaxed.is_empty() {
            trace!(
                project = %key.project_name,
                project_id = %key.project_id,
                matched = relaxed.len(),
                "relaxed match"
            );
        }
        relaxed
    }

    /// Distribution rows matching `key`, in source order.
    pub fn matches(&self, key: &RowKey) -> Vec<&'a DistributionRow> {
        self.indices(key).into_iter().map(|i| &self.rows[i]).collect()
    }
}
