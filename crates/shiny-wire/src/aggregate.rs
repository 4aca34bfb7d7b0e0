//! Fixed-shape navigation for aggregate and group-by responses.
//!
//! The server's group-result envelope is:
//!
//! ```text
//! { groups: [ { key: ..., values: { alias: value, ... } } ], total_groups: N }
//! ```
//!
//! and scalar aggregates arrive as `{ count: N }`. Arrays are encoded as
//! documents whose entries are keyed `"0"`, `"1"`, ... so the first group is
//! the sub-document literally named `"0"`.

use std::fmt;

use crate::access::{scalar_field, sub_document};
use crate::value::FieldValue;

/// Failure to read `total_groups`.
///
/// Absence gets its own kind rather than the `NotFound` sentinel because
/// callers treat a group response without `total_groups` as a harness-level
/// failure, never as a legitimate zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCountError {
    Missing,
    WrongType(&'static str),
}

impl fmt::Display for GroupCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no total_groups field in response"),
            Self::WrongType(name) => write!(f, "total_groups has non-numeric type: {name}"),
        }
    }
}

impl std::error::Error for GroupCountError {}

/// Read the top-level `count` scalar with the count coercion policy
/// (i32 widen, i64 passthrough, double truncation toward zero).
pub fn scalar_count(buf: &[u8]) -> Option<i64> {
    scalar_field(buf, "count").as_count()
}

/// Resolve `groups` → element `"0"` → `values` → `alias`.
///
/// Any missing link short-circuits to `NotFound`.
pub fn aggregate_field(buf: &[u8], alias: &str) -> FieldValue {
    let Some(groups) = sub_document(buf, "groups") else {
        return FieldValue::NotFound;
    };
    let Some(first) = sub_document(groups, "0") else {
        return FieldValue::NotFound;
    };
    let Some(values) = sub_document(first, "values") else {
        return FieldValue::NotFound;
    };
    scalar_field(values, alias)
}

/// Read the top-level `total_groups` scalar with the count coercion policy.
pub fn group_count(buf: &[u8]) -> Result<i64, GroupCountError> {
    match scalar_field(buf, "total_groups") {
        FieldValue::NotFound => Err(GroupCountError::Missing),
        value => value
            .as_count()
            .ok_or(GroupCountError::WrongType(value.type_name())),
    }
}
