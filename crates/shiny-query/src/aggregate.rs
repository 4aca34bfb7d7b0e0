use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// One aggregate output: `SUM(TotalDue) AS total` and friends.
///
/// `field` is `None` only for `COUNT` without an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub op: AggregateOp,
    pub field: Option<String>,
    pub alias: String,
}
