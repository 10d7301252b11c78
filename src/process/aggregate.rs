use crate::process::matcher::Matcher;
use crate::schema::{Entry, ProjectRow};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// How many subproject names are spelled out in an aggregated entry.
pub const SUBPROJECT_LABEL_LIMIT: usize = 3;

/// Group project rows by project id, keeping groups in order of their
/// first row. Rows with an empty id are never merged.
pub fn group_by_project_id(rows: &[ProjectRow]) -> Vec<Vec<&ProjectRow>> {
    let mut groups: Vec<Vec<&ProjectRow>> = Vec::new();
    let mut by_id: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let id = row.key.project_id.as_str();
        if id.is_empty() {
            groups.push(vec![row]);
            continue;
        }
        match by_id.get(id) {
            Some(&g) => groups[g].push(row),
            None => {
                by_id.insert(id, groups.len());
                groups.push(vec![row]);
            }
        }
    }
    groups
}

/// The first row without a subproject name, else the first row.
pub fn canonical_row<'a>(group: &[&'a ProjectRow]) -> Option<&'a ProjectRow> {
    group
        .iter()
        .find(|r| r.key.subproject_name.is_empty())
        .or_else(|| group.first())
        .copied()
}

/// Sorted distinct non-empty subproject names, first few joined by `", "`.
pub fn subproject_label(group: &[&ProjectRow]) -> String {
    let names: BTreeSet<&str> = group
        .iter()
        .map(|r| r.key.subproject_name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    names
        .into_iter()
        .take(SUBPROJECT_LABEL_LIMIT)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One entry per project id, carrying the union of every distribution
/// row matched by any member of the group.
pub fn aggregate_entries(rows: &[ProjectRow], matcher: &Matcher<'_>) -> Vec<Entry> {
    let groups = group_by_project_id(rows);
    let mut entries = Vec::with_capacity(groups.len());

    for group in &groups {
        let Some(canonical) = canonical_row(group) else {
            continue;
        };

        let mut seen = HashSet::new();
        let mut distributions = Vec::new();
        for member in group {
            for i in matcher.indices(&member.key) {
                if seen.insert(i) {
                    distributions.push(matcher.rows()[i].clone());
                }
            }
        }

        let mut entry = Entry::new(canonical, distributions);
        entry.subproject_name = subproject_label(group);
        if group.len() > 1 {
            debug!(
                project_id = %entry.project_id,
                members = group.len(),
                distributions = entry.distributions.len(),
                "merged project rows"
            );
        }
        entries.push(entry);
    }
    entries
}
