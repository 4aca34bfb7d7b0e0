use std::fmt;

use shiny_query::{Query, Sort};
use shiny_wire::FieldValue;

use crate::compare::floats_equal;

/// One verification case: a single logical query described through both
/// construction paths, plus its independently authored expected result.
///
/// A case is executed once per path and immediately reduces to a pass/fail
/// outcome; nothing is retained afterward beyond the aggregate counters.
pub struct Case {
    pub id: &'static str,
    pub description: &'static str,
    /// Structured construction path.
    pub query: Query,
    /// Text construction path; must describe the same query.
    pub text: &'static str,
    pub expect: Expectation,
}

/// A literal expected scalar in an ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl Expected {
    /// Exact equality for integers and strings, tolerance for floats.
    pub fn matches(&self, actual: &FieldValue) -> bool {
        match self {
            Expected::Int(v) => match actual {
                FieldValue::Int32(a) => i64::from(*a) == *v,
                FieldValue::Int64(a) => a == v,
                _ => false,
            },
            Expected::Float(v) => actual.as_f64().is_some_and(|a| floats_equal(a, *v)),
            Expected::Str(v) => matches!(actual, FieldValue::Str(a) if a == v),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Int(v) => write!(f, "{v}"),
            Expected::Float(v) => write!(f, "{v}"),
            Expected::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// What a case asserts about the decoded response.
pub enum Expectation {
    /// Top-level `count` scalar, exact. An absent body is accepted only
    /// when the expected value is zero: empty result sets omit the body
    /// entirely (a documented quirk of the client, preserved as observed).
    Count(i64),
    /// Number of complete concatenated documents, exact.
    DocCount(usize),
    /// Aggregate aliases in the group envelope, each tolerance-compared.
    Aggregates(Vec<(&'static str, f64)>),
    /// Top-level `total_groups`, exact; any decode failure is a hard fail.
    GroupCount(i64),
    /// Field values of the leading documents in result order; fail-fast at
    /// the first position that mismatches.
    Order {
        path: &'static str,
        values: Vec<Expected>,
    },
    /// Adjacent-pair validation against a sort-key list with tie-break
    /// cascade: equal values defer to the next key, ties never fail.
    SortedBy(Vec<Sort>),
    /// First document must resolve every `present` path and none of the
    /// `absent` paths. Both lists are checked to completion.
    Projection {
        present: Vec<&'static str>,
        absent: Vec<&'static str>,
    },
}
