use std::cmp::Ordering;

use shiny_wire::FieldValue;

/// Absolute drift allowed between two floats.
pub const ABS_TOLERANCE: f64 = 0.01;
/// Relative drift allowed at larger magnitudes, as a fraction of the larger
/// operand's magnitude.
pub const REL_TOLERANCE: f64 = 1e-4;

/// Three-tier float equality: exact, small absolute difference, or small
/// relative difference. Absorbs summation drift over thousands of rows
/// while still catching gross mismatches.
pub fn floats_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if diff <= ABS_TOLERANCE {
        return true;
    }
    diff <= REL_TOLERANCE * a.abs().max(b.abs())
}

/// Outcome of comparing two decoded fields for sort-order validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOrdering {
    Less,
    Equal,
    Greater,
    /// The pair cannot be ordered; carries a description for diagnostics.
    Incomparable(String),
}

fn ordered(ord: Ordering) -> FieldOrdering {
    match ord {
        Ordering::Less => FieldOrdering::Less,
        Ordering::Equal => FieldOrdering::Equal,
        Ordering::Greater => FieldOrdering::Greater,
    }
}

/// Compare two decoded fields.
///
/// Integer pairs compare exactly as i64; only the mixed int/double case goes
/// through f64, where rounding above 2^53 cannot merge two distinct integer
/// keys. Strings compare byte-lexicographically. Anything else, including
/// `NotFound` on either side, is incomparable.
pub fn compare_fields(a: &FieldValue, b: &FieldValue) -> FieldOrdering {
    match (a, b) {
        (FieldValue::Int32(x), FieldValue::Int32(y)) => ordered(x.cmp(y)),
        (FieldValue::Int64(x), FieldValue::Int64(y)) => ordered(x.cmp(y)),
        (FieldValue::Int32(x), FieldValue::Int64(y)) => ordered(i64::from(*x).cmp(y)),
        (FieldValue::Int64(x), FieldValue::Int32(y)) => ordered(x.cmp(&i64::from(*y))),
        (FieldValue::Str(x), FieldValue::Str(y)) => ordered(x.as_bytes().cmp(y.as_bytes())),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => match x.partial_cmp(&y) {
                Some(ord) => ordered(ord),
                None => FieldOrdering::Incomparable("NaN is not orderable".to_string()),
            },
            _ => FieldOrdering::Incomparable(format!(
                "cannot compare {} with {}",
                a.type_name(),
                b.type_name()
            )),
        },
    }
}
