use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::builder::QueryBuilder;
use crate::filter::FilterGroup;
use crate::sort::Sort;

/// A structured query description, handed to the server verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub space: String,
    pub store: String,
    pub filter: Option<FilterGroup>,
    pub sort: Vec<Sort>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
    pub group_by: Vec<String>,
    pub aggregates: Vec<Aggregate>,
    pub projection: Option<Vec<String>>,
    /// Ask for `{ count: N }` instead of the matching documents.
    pub count_only: bool,
}

impl Query {
    pub fn new(space: &str, store: &str) -> Self {
        Query {
            space: space.to_string(),
            store: store.to_string(),
            filter: None,
            sort: Vec::new(),
            skip: None,
            take: None,
            group_by: Vec::new(),
            aggregates: Vec::new(),
            projection: None,
            count_only: false,
        }
    }

    /// Start a fluent builder targeting `space.store`.
    pub fn from(space: &str, store: &str) -> QueryBuilder {
        QueryBuilder::new(Query::new(space, store))
    }
}
