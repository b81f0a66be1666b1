//! FILENAME: report-engine/src/filter.rs
//! Filter engine - evaluates a named predicate set against a collection.
//!
//! Pure function over a record snapshot; all predicates are combined with
//! logical AND and an empty predicate value means "match all". Ordering of
//! the output follows the input; no sorting happens here.

use engine::dates::{end_of_day_ms, epoch_ms, start_of_day_ms};
use engine::record::Record;
use engine::value::FieldValue;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER SET
// ============================================================================

/// Categorical predicates, keyed by record field key. Values hold the
/// user-entered text, which may be a display label; `OptionTable::resolve`
/// maps it back to the canonical stored value before comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or replaces the predicate for a field key.
    /// An empty value clears the predicate (match-all).
    pub fn set(&mut self, data_key: &str, value: &str) {
        self.entries.retain(|(k, _)| k != data_key);
        if !value.is_empty() {
            self.entries.push((data_key.to_string(), value.to_string()));
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Inclusive date-range predicate over one date field.
/// The end bound is extended to 23:59:59.999 of its day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFilter {
    pub data_key: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

// ============================================================================
// OPTION TABLE
// ============================================================================

/// One selectable option of a categorical filter control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    /// Canonical stored value (what records carry).
    pub value: String,
    /// Display label (what the filter dropdown shows).
    pub label: String,
}

/// Per-field option lists, supplied by the caller alongside the config.
/// Used to resolve a display label back to its canonical stored value
/// (e.g. company name -> company id).
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    options: FxHashMap<String, Vec<FilterOption>>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, data_key: &str, options: Vec<FilterOption>) {
        self.options.insert(data_key.to_string(), options);
    }

    /// Maps a display label to its canonical value for the given field.
    /// Inputs that already are canonical values, or that have no option
    /// list at all, pass through unchanged.
    pub fn resolve(&self, data_key: &str, input: &str) -> String {
        if let Some(opts) = self.options.get(data_key) {
            if let Some(opt) = opts.iter().find(|o| o.label == input) {
                return opt.value.clone();
            }
        }
        input.to_string()
    }
}

// ============================================================================
// APPLY
// ============================================================================

/// Evaluates all predicates against the collection and returns the
/// surviving records in their original order.
pub fn apply<T: Record + Clone>(
    collection: &[T],
    filter_set: &FilterSet,
    search_term: Option<&str>,
    date_filter: Option<&DateFilter>,
    options: &OptionTable,
) -> Vec<T> {
    collection
        .iter()
        .filter(|record| matches(*record, filter_set, search_term, date_filter, options))
        .cloned()
        .collect()
}

fn matches<T: Record>(
    record: &T,
    filter_set: &FilterSet,
    search_term: Option<&str>,
    date_filter: Option<&DateFilter>,
    options: &OptionTable,
) -> bool {
    if let Some(term) = search_term {
        if !term.is_empty() && !matches_search(record, term) {
            return false;
        }
    }

    for (data_key, raw) in filter_set.iter() {
        let wanted = options.resolve(data_key, raw);
        match record.field(data_key) {
            FieldValue::Text(actual) => {
                if actual != wanted {
                    return false;
                }
            }
            other => {
                if other.to_display() != wanted {
                    return false;
                }
            }
        }
    }

    if let Some(df) = date_filter {
        if !df.is_empty() && !matches_date_range(record, df) {
            return false;
        }
    }

    true
}

/// Case-insensitive substring over the composite display name and the
/// record identifier.
fn matches_search<T: Record>(record: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    record.display_name().to_lowercase().contains(&needle)
        || record.identifier().to_lowercase().contains(&needle)
}

/// Inclusive range check in epoch milliseconds. A record with no date
/// compares as epoch zero, so it fails only when an explicit bound
/// excludes that fallback timestamp.
fn matches_date_range<T: Record>(record: &T, df: &DateFilter) -> bool {
    let record_ms = record
        .field(&df.data_key)
        .as_date()
        .map(|d| epoch_ms(&d))
        .unwrap_or(0);

    if let Some(start) = df.start {
        if record_ms < start_of_day_ms(start) {
            return false;
        }
    }
    if let Some(end) = df.end {
        if record_ms > end_of_day_ms(end) {
            return false;
        }
    }
    true
}
