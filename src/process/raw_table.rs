use calamine::Data;

/// A single worksheet cell, reduced to the shapes the normalizer cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Renders the cell as display text. Integral floats lose their
    /// fractional part so numeric ids read `1`, not `1.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Number(f) => Some(match integral(*f) {
                Some(i) => i.to_string(),
                None if f.is_nan() => "NaN".to_string(),
                None => f.to_string(),
            }),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }

    /// True for cells a spreadsheet would show as empty.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Returns `Some(i)` when `f` is finite, has no fractional part, and
/// fits in the exactly-representable integer range of an f64.
pub fn integral(f: f64) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT {
        Some(f as i64)
    } else {
        None
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    Cell::Number(dt.as_f64())
                } else {
                    match dt.as_datetime() {
                        Some(ts) => Cell::Text(ts.date().format("%Y-%m-%d").to_string()),
                        None => Cell::Number(dt.as_f64()),
                    }
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

/// Which columns decide whether a row counts as blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankRule {
    /// Only columns with a real header (non-blank, not `Unnamed…`).
    NamedColumns,
    /// Every column, headed or not.
    AllColumns,
}

fn is_named_header(header: &str) -> bool {
    let header = header.trim();
    !header.is_empty() && !header.starts_with("Unnamed")
}

#[derive(Debug)]
pub struct RawTable {
    /// Sheet the table was read from, kept for log and error messages.
    pub sheet_name: String,
    /// Header cells from the first used row, trimmed.
    pub headers: Vec<String>,
    /// Every row below the header, one `Cell` per header column.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// True when every cell of `row` that `rule` looks at is blank.
    /// Unknown headers still count; only header-less columns can be skipped.
    pub fn is_blank_row(&self, row: &[Cell], rule: BlankRule) -> bool {
        row.iter()
            .enumerate()
            .filter(|(i, _)| match rule {
                BlankRule::AllColumns => true,
                BlankRule::NamedColumns => self
                    .headers
                    .get(*i)
                    .is_some_and(|h| is_named_header(h)),
            })
            .all(|(_, cell)| cell.is_blank())
    }
}
