use once_cell::sync::Lazy;
use regex::Regex;

/// `12-15`, `3.5 - 7`
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*$").expect("range pattern is valid")
});

/// Spellings spreadsheets export for a missing value
const MISSING_MARKERS: &[&str] = &["na", "n/a", "nan", "null", "none", "#n/a", "-"];

/// Outcome of reading one spreadsheet cell as a score
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCell {
    Number(f64),
    /// A textual range; its midpoint is the representative value
    Range { low: f64, high: f64 },
    /// Blank or a missing-value marker
    Empty,
    /// Anything else, kept for logging; reads as 0
    Unparseable(String),
}

impl ParsedCell {
    pub fn value(&self) -> f64 {
        match *self {
            ParsedCell::Number(value) => value,
            ParsedCell::Range { low, high } => (low + high) / 2.0,
            ParsedCell::Empty | ParsedCell::Unparseable(_) => 0.0,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParsedCell::Empty | ParsedCell::Unparseable(_))
    }
}

/// Parse a cell as a number, a `low-high` range, or a defaulted zero
pub fn parse_score_cell(cell: &str) -> ParsedCell {
    let trimmed = cell.trim();
    if trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return ParsedCell::Empty;
    }

    if let Some(caps) = RANGE_RE.captures(trimmed) {
        if let (Ok(low), Ok(high)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return ParsedCell::Range { low, high };
        }
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => ParsedCell::Number(value),
        _ => ParsedCell::Unparseable(trimmed.to_string()),
    }
}
