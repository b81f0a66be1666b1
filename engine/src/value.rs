//! FILENAME: engine/src/value.rs
//! Field value type shared by the filter and aggregation engines.
//!
//! Records expose their attributes through `Record::field`, which returns a
//! `FieldValue`. This keeps the engines generic: they never know the concrete
//! record struct, only the tagged value for a given key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized, typed view of a single record attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// The record has no value for the requested key.
    Empty,
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Boolean(bool),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// The canonical text form, used for exact-match filtering and grouping.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Renders the value as display text (table cells, CSV export).
    pub fn to_display(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(d: Option<DateTime<Utc>>) -> Self {
        match d {
            Some(d) => FieldValue::Date(d),
            None => FieldValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_renders_whole_numbers_without_fraction() {
        assert_eq!(FieldValue::Number(3.0).to_display(), "3");
        assert_eq!(FieldValue::Number(3.5).to_display(), "3.5");
    }

    #[test]
    fn display_renders_dates_as_iso() {
        let d = Utc.with_ymd_and_hms(2024, 3, 9, 15, 30, 0).unwrap();
        assert_eq!(FieldValue::Date(d).to_display(), "2024-03-09");
    }

    #[test]
    fn option_date_conversion_maps_none_to_empty() {
        let v: FieldValue = (None as Option<DateTime<Utc>>).into();
        assert!(v.is_empty());
    }
}
