//! TCP client for ShinyDB.
//!
//! Speaks length-prefixed rmp-serde frames. Query results come back as raw
//! wire-document bytes in [`QueryResponse::body`]; decoding them is the
//! caller's business (see the `shiny-wire` crate).

mod client;
mod execute;
pub mod protocol;

pub use client::{Client, ClientError};
pub use execute::Execute;
pub use protocol::QueryResponse;
