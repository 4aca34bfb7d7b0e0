//! Query descriptions for ShinyDB.
//!
//! A [`Query`] can be built two equivalent ways: fluently through
//! [`QueryBuilder`], or by parsing a text query with [`parse_query`]. The
//! verification harness leans on that equivalence — both construction paths
//! must produce identical observable results.

mod aggregate;
mod builder;
mod filter;
mod operator;
mod parse;
mod query;
mod sort;

pub use aggregate::{Aggregate, AggregateOp};
pub use builder::QueryBuilder;
pub use filter::{Filter, FilterGroup, FilterNode, LogicalOp};
pub use operator::Operator;
pub use parse::{QueryParseError, parse_query};
pub use query::Query;
pub use sort::{Sort, SortDirection};
