use std::fmt;

/// A decoded scalar field, or the absence of one.
///
/// `NotFound` is a first-class outcome, never a stand-in for zero or empty:
/// accessors return it for a missing name, for a name bound to a non-scalar
/// type, and for scans cut short by a malformed buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Double(f64),
    Int32(i32),
    Int64(i64),
    Str(String),
    NotFound,
}

impl FieldValue {
    pub fn is_found(&self) -> bool {
        !matches!(self, FieldValue::NotFound)
    }

    /// Numeric view for cross-type comparison. `None` for strings and
    /// `NotFound`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(v) => Some(*v),
            FieldValue::Int32(v) => Some(f64::from(*v)),
            FieldValue::Int64(v) => Some(*v as f64),
            FieldValue::Str(_) | FieldValue::NotFound => None,
        }
    }

    /// Integer view with the client's numeric coercion policy for counts:
    /// i32 widens, i64 passes through, doubles truncate toward zero.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            FieldValue::Int32(v) => Some(i64::from(*v)),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::Double(v) => Some(*v as i64),
            FieldValue::Str(_) | FieldValue::NotFound => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Double(_) => "double",
            FieldValue::Int32(_) => "int32",
            FieldValue::Int64(_) => "int64",
            FieldValue::Str(_) => "string",
            FieldValue::NotFound => "not found",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Double(v) => write!(f, "{v}"),
            FieldValue::Int32(v) => write!(f, "{v}"),
            FieldValue::Int64(v) => write!(f, "{v}"),
            FieldValue::Str(v) => write!(f, "{v:?}"),
            FieldValue::NotFound => write!(f, "<not found>"),
        }
    }
}
