//! FILENAME: engine/src/record.rs
//! The record abstraction consumed by the filter and aggregation engines.

use crate::value::FieldValue;

/// An ordered, immutable snapshot of domain records.
/// Fetched once per view load and replaced wholesale on re-fetch.
pub type EntityCollection<T> = Vec<T>;

/// Uniform attribute access for domain records.
///
/// The engines combine predicates over `field` lookups and never touch the
/// concrete structs, so adding a record type means implementing this trait
/// and nothing else.
pub trait Record {
    /// Stable identifier, also matched by the free-text search.
    fn identifier(&self) -> &str;

    /// Composite display name, matched by the free-text search.
    fn display_name(&self) -> String;

    /// Typed attribute lookup by data key. Unknown keys return
    /// `FieldValue::Empty` rather than an error.
    fn field(&self, key: &str) -> FieldValue;
}
