use shiny_query::Query;

use crate::client::{Client, ClientError};
use crate::protocol::QueryResponse;

/// The execution seam the verification harness consumes.
///
/// [`Client`] implements it over TCP; tests substitute in-process
/// executors that serve canned or computed responses.
pub trait Execute {
    /// Run a structured query.
    fn run(&mut self, query: &Query) -> Result<QueryResponse, ClientError>;

    /// Run a text query, parsed server-side into its structured form.
    fn run_text(&mut self, text: &str) -> Result<QueryResponse, ClientError>;
}

impl Execute for Client {
    fn run(&mut self, query: &Query) -> Result<QueryResponse, ClientError> {
        Client::run(self, query)
    }

    fn run_text(&mut self, text: &str) -> Result<QueryResponse, ClientError> {
        Client::run_text(self, text)
    }
}
