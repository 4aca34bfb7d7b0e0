//! Reader for ShinyDB's binary wire document format.
//!
//! The server returns query results as raw encoded documents: a little-endian
//! i32 length prefix (inclusive of itself and a trailing 0x00 terminator),
//! followed by `(type tag, cstring name, payload)` entries. Bulk result sets
//! concatenate several such documents back-to-back, each self-delimiting.
//!
//! This crate decodes that format without a general-purpose BSON library.
//! It is a reader only and is deliberately lazy: lookups scan the raw bytes
//! on demand, sub-documents are borrowed slices of the parent buffer, and
//! nothing is parsed into an intermediate tree.
//!
//! Malformed input is never an error here. A truncated or corrupt buffer
//! exhausts the scan early and surfaces as [`FieldValue::NotFound`] or a
//! reduced frame count, so a bad server response can fail an assertion but
//! can never crash the caller.

pub mod access;
pub mod aggregate;
pub mod cursor;
mod value;

pub use access::{
    count_frames, nested_field, nth_frame, nth_frame_field, scalar_field, sub_document,
};
pub use aggregate::{GroupCountError, aggregate_field, group_count, scalar_count};
pub use value::FieldValue;
