use crate::process::aggregate::aggregate_entries;
use crate::process::load_workbook;
use crate::process::matcher::Matcher;
use crate::schema::{distribution_rows, project_rows, DistributionRow, Entry, ProjectRow};
use anyhow::{Context, Result};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{info, instrument, warn};

/// How project rows become entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinMode {
    /// One entry per project row.
    #[default]
    PerRow,
    /// One entry per project id.
    GroupById,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub mode: JoinMode,
}

/// Join normalized project rows with their distribution rows.
pub fn build_entries(
    projects: &[ProjectRow],
    distributions: &[DistributionRow],
    options: &ConvertOptions,
) -> Vec<Entry> {
    let matcher = Matcher::new(distributions);
    let entries = match options.mode {
        JoinMode::PerRow => projects
            .iter()
            .map(|p| {
                let matched = matcher.matches(&p.key).into_iter().cloned().collect();
                Entry::new(p, matched)
            })
            .collect(),
        JoinMode::GroupById => aggregate_entries(projects, &matcher),
    };

    let orphans = orphan_count(projects, &matcher);
    if orphans > 0 {
        warn!(
            orphans,
            total = distributions.len(),
            "distribution rows matched no project"
        );
    }
    entries
}

/// Number of distribution rows that no project row matches.
pub fn orphan_count(projects: &[ProjectRow], matcher: &Matcher<'_>) -> usize {
    let used: HashSet<usize> = projects
        .iter()
        .flat_map(|p| matcher.indices(&p.key))
        .collect();
    matcher.rows().len() - used.len()
}

/// Serialize `entries` as indented UTF-8 JSON.
pub fn write_entries(entries: &[Entry], out_path: &Path) -> Result<()> {
    let file = File::create(out_path)
        .with_context(|| format!("creating output file {:?}", out_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)
        .with_context(|| format!("writing JSON to {:?}", out_path))?;
    writer
        .flush()
        .with_context(|| format!("flushing {:?}", out_path))?;
    Ok(())
}

/// Load, normalize, join and write in one pass. Returns the entries written.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %xlsx_path.display(), output = %out_path.display())
)]
pub fn convert(
    xlsx_path: &Path,
    out_path: &Path,
    options: &ConvertOptions,
) -> Result<Vec<Entry>> {
    let sheets = load_workbook(xlsx_path)?;
    let projects = project_rows(&sheets.project);
    let distributions = distribution_rows(&sheets.distribution);
    info!(
        projects = projects.len(),
        distributions = distributions.len(),
        mode = ?options.mode,
        "normalized sheets"
    );

    let entries = build_entries(&projects, &distributions, options);
    write_entries(&entries, out_path)?;
    info!(entries = entries.len(), "wrote entries");
    Ok(entries)
}
