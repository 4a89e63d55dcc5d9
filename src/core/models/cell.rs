use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::constants::{
    COL_AMOUNT, COL_AMOUNT_A, COL_AMOUNT_B, COL_SPLIT_A, COL_SPLIT_B, COL_TIMESTAMP,
};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// How the cells of a column are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Timestamp,
}

impl ColumnKind {
    pub fn of(label: &str) -> Self {
        match label {
            COL_AMOUNT | COL_AMOUNT_A | COL_AMOUNT_B | COL_SPLIT_A | COL_SPLIT_B => ColumnKind::Number,
            COL_TIMESTAMP => ColumnKind::Timestamp,
            _ => ColumnKind::Text,
        }
    }
}

/// A single parsed spreadsheet cell.
///
/// `Missing` means the value could not be read at all. It is never the same
/// thing as `Number(0.0)` or `Text("")`, and arithmetic must skip it.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl Cell {
    pub fn parse(kind: ColumnKind, raw: &str) -> Self {
        match kind {
            ColumnKind::Text => Cell::Text(raw.to_string()),
            ColumnKind::Number => Self::number(raw),
            ColumnKind::Timestamp => Self::timestamp(raw),
        }
    }

    pub fn number(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Cell::Number(value),
            _ => Cell::Missing,
        }
    }

    pub fn timestamp(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Cell::Missing;
        }
        for format in TIMESTAMP_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
                return Cell::Timestamp(ts);
            }
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Cell::Timestamp(ts.naive_utc());
        }
        for format in DATE_FORMATS {
            if let Some(ts) = NaiveDate::parse_from_str(raw, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
            {
                return Cell::Timestamp(ts);
            }
        }
        Cell::Missing
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Cell::Text(text) => text,
            _ => String::new(),
        }
    }
}
