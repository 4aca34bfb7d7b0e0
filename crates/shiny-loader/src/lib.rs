//! Reads the JSON fixture files and converts them to documents for bulk
//! insertion through `shiny-client`.

use std::fs;
use std::path::Path;

use bson::{Bson, Document};
use serde_json::Value;

/// Fixture files and the stores they populate, in load order.
pub const FIXTURES: &[(&str, &str)] = &[
    ("orders.json", "orders"),
    ("customers.json", "customers"),
    ("employees.json", "employees"),
    ("products.json", "products"),
    ("productcategories.json", "productcategories"),
    ("productsubcategories.json", "productsubcategories"),
    ("vendors.json", "vendors"),
    ("vendorproduct.json", "vendorproduct"),
];

/// Documents per `insert_many` call.
pub const BATCH_SIZE: usize = 500;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The file's top level is not a JSON array.
    NotAnArray(String),
    /// An array element is not a JSON object.
    NotAnObject(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "io error: {e}"),
            LoadError::Json(e) => write!(f, "json error: {e}"),
            LoadError::NotAnArray(file) => {
                write!(f, "{file}: expected a top-level JSON array")
            }
            LoadError::NotAnObject(file) => {
                write!(f, "{file}: array elements must be objects")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Convert a JSON value to its BSON counterpart.
///
/// Whole numbers land as Int32 when they fit and Int64 otherwise; anything
/// fractional becomes a Double. This mirrors how the fixtures were authored:
/// ids and flags stay integers, money stays floating point.
pub fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => match i32::try_from(i) {
                Ok(v) => Bson::Int32(v),
                Err(_) => Bson::Int64(i),
            },
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => {
            let mut doc = Document::new();
            for (key, item) in map {
                doc.insert(key.clone(), json_to_bson(item));
            }
            Bson::Document(doc)
        }
    }
}

/// Read one fixture file: a top-level JSON array of objects.
pub fn read_fixture(path: &Path) -> Result<Vec<Document>, LoadError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;

    let Value::Array(rows) = value else {
        return Err(LoadError::NotAnArray(name));
    };

    let mut docs = Vec::with_capacity(rows.len());
    for row in &rows {
        match json_to_bson(row) {
            Bson::Document(doc) => docs.push(doc),
            _ => return Err(LoadError::NotAnObject(name)),
        }
    }
    Ok(docs)
}
