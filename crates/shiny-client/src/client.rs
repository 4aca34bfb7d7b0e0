use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use shiny_query::Query;

use crate::protocol::{QueryResponse, Request, Response};

#[derive(Debug)]
pub enum ClientError {
    Io(std::io::Error),
    Serialization(String),
    Server(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Io(e) => write!(f, "io error: {e}"),
            ClientError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            ClientError::Server(msg) => write!(f, "server error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e)
    }
}

impl From<rmp_serde::encode::Error> for ClientError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for ClientError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr)?;
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);
        Ok(Self { reader, writer })
    }

    fn request(&mut self, request: Request) -> Result<Response, ClientError> {
        let bytes = rmp_serde::to_vec(&request)?;
        let len = (bytes.len() as u32).to_be_bytes();
        self.writer.write_all(&len)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf)?;
        let len = u32::from_be_bytes(len_buf) as usize;

        let mut msg_buf = vec![0u8; len];
        self.reader.read_exact(&mut msg_buf)?;

        let response: Response = rmp_serde::from_slice(&msg_buf)?;
        Ok(response)
    }

    fn expect_ok(&mut self, request: Request) -> Result<(), ClientError> {
        match self.request(request)? {
            Response::Ok => Ok(()),
            Response::Error(e) => Err(ClientError::Server(e)),
            other => Err(ClientError::Server(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }

    fn expect_query(&mut self, request: Request) -> Result<QueryResponse, ClientError> {
        match self.request(request)? {
            Response::Query(r) => Ok(r),
            Response::Error(e) => Err(ClientError::Server(e)),
            other => Err(ClientError::Server(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }

    // ── Query execution ─────────────────────────────────────────

    pub fn run(&mut self, query: &Query) -> Result<QueryResponse, ClientError> {
        self.expect_query(Request::Query {
            query: query.clone(),
        })
    }

    pub fn run_text(&mut self, text: &str) -> Result<QueryResponse, ClientError> {
        self.expect_query(Request::QueryText {
            text: text.to_string(),
        })
    }

    // ── Insert operations ───────────────────────────────────────

    pub fn insert_many(
        &mut self,
        space: &str,
        store: &str,
        docs: Vec<bson::Document>,
    ) -> Result<u64, ClientError> {
        match self.request(Request::InsertMany {
            space: space.to_string(),
            store: store.to_string(),
            docs,
        })? {
            Response::Inserted(n) => Ok(n),
            Response::Error(e) => Err(ClientError::Server(e)),
            other => Err(ClientError::Server(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }

    // ── Schema operations ───────────────────────────────────────

    pub fn create_space(&mut self, space: &str) -> Result<(), ClientError> {
        self.expect_ok(Request::CreateSpace {
            space: space.to_string(),
        })
    }

    pub fn create_store(&mut self, space: &str, store: &str) -> Result<(), ClientError> {
        self.expect_ok(Request::CreateStore {
            space: space.to_string(),
            store: store.to_string(),
        })
    }

    pub fn drop_store(&mut self, space: &str, store: &str) -> Result<(), ClientError> {
        self.expect_ok(Request::DropStore {
            space: space.to_string(),
            store: store.to_string(),
        })
    }

    // ── Liveness ────────────────────────────────────────────────

    pub fn ping(&mut self) -> Result<(), ClientError> {
        match self.request(Request::Ping)? {
            Response::Pong => Ok(()),
            Response::Error(e) => Err(ClientError::Server(e)),
            other => Err(ClientError::Server(format!(
                "unexpected response: {other:?}"
            ))),
        }
    }
}
