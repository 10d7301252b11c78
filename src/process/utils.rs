use crate::process::raw_table::{integral, Cell};
use crate::schema::NumberLike;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cell texts that mean "no data" once trimmed.
pub const PLACEHOLDERS: &[&str] = &["", "-", "—", "–", "`", "nan", "NaN", "None"];

/// Sentinel written for numeric fields that carry no value.
pub const ABSENT_NUMBER: &str = "-";

static AMOUNT_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s$€£¥₹]").expect("amount regex should parse"));

static LEADING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})").expect("year regex should parse"));

/// Trim whitespace.
pub fn clean_str(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn is_placeholder(cell: &Cell) -> bool {
    match cell.as_text() {
        None => true,
        Some(s) => PLACEHOLDERS.contains(&s.trim()),
    }
}

/// Text fields: placeholders become `""`, everything else is trimmed.
pub fn normalize_string(cell: &Cell) -> String {
    if is_placeholder(cell) {
        return String::new();
    }
    cell.as_text().map(|s| clean_str(&s)).unwrap_or_default()
}

/// Id fields normalize like text.
pub fn normalize_id(cell: &Cell) -> String {
    normalize_string(cell)
}

/// Year fields keep a leading 4-digit run (`"2020-2021"` → `"2020"`).
pub fn normalize_year(cell: &Cell) -> String {
    let s = normalize_string(cell);
    match LEADING_YEAR.captures(&s) {
        Some(caps) => caps[1].to_string(),
        None => s,
    }
}

/// Numeric fields: placeholders become `"-"`, parseable amounts become
/// numbers, anything else is kept as trimmed text.
pub fn normalize_number_like(cell: &Cell) -> NumberLike {
    if is_placeholder(cell) {
        return NumberLike::absent();
    }
    match cell {
        Cell::Int(i) => NumberLike::Int(*i),
        Cell::Number(f) => number_from_f64(*f),
        other => {
            let s = other.as_text().map(|s| clean_str(&s)).unwrap_or_default();
            parse_amount(&s).unwrap_or(NumberLike::Text(s))
        }
    }
}

/// Parse an amount after stripping currency symbols and thousands
/// separators. Returns `None` for anything that is not a finite number.
pub fn parse_amount(raw: &str) -> Option<NumberLike> {
    let stripped = AMOUNT_NOISE.replace_all(raw, "");
    if stripped.is_empty() {
        return None;
    }
    let value: f64 = stripped.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(number_from_f64(value))
}

fn number_from_f64(f: f64) -> NumberLike {
    match integral(f) {
        Some(i) => NumberLike::Int(i),
        None if f.is_finite() => NumberLike::Float(f),
        None => NumberLike::absent(),
    }
}
