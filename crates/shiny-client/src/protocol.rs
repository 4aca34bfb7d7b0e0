use serde::{Deserialize, Serialize};
use shiny_query::Query;

#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    Query {
        query: Query,
    },
    QueryText {
        text: String,
    },
    InsertMany {
        space: String,
        store: String,
        docs: Vec<bson::Document>,
    },
    CreateSpace {
        space: String,
    },
    CreateStore {
        space: String,
        store: String,
    },
    DropStore {
        space: String,
        store: String,
    },
    Ping,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    Ok,
    Query(QueryResponse),
    Inserted(u64),
    Error(String),
    Pong,
}

/// Result of one query execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Raw concatenated wire documents. `None` when the result set is
    /// empty — the server omits the body entirely rather than sending an
    /// empty buffer.
    pub body: Option<Vec<u8>>,
}
