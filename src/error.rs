//! Framework error type shared by all components
//!
//! Construction-time failures (oversized schemas, bad parameter types) are
//! fatal to the component that raised them. Per-call failures are logged at
//! the point of detection and surfaced as a failure indicator, leaving the
//! component usable for subsequent calls.

use crate::extract::JsonKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A fixed limit was exceeded: a query key over the maximum key length,
    /// a schema with more parameters than the loader holds, or a table
    /// registration beyond the registry's capacity.
    #[error("capacity exceeded: {requested} exceeds fixed maximum {max}")]
    CapacityExceeded { requested: usize, max: usize },

    /// No value matched the query key.
    #[error("no value found for query {key:?}")]
    NotFound { key: String },

    /// The matched value's kind differs from the descriptor's expected kind.
    #[error("query {key:?} expected a {expected} value but found {found}")]
    TypeMismatch {
        key: String,
        expected: JsonKind,
        found: JsonKind,
    },

    /// A string value is too long for its destination slot.
    #[error("string length {len} exceeds {key:?}'s maximum length {max}")]
    Overflow { key: String, len: usize, max: usize },

    /// A numeric value could not be converted to a signed 32-bit integer.
    #[error("number conversion error for query {key:?} value {value}")]
    Parse { key: String, value: String },

    #[error("error opening file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file's contents are not a well-formed JSON document.
    #[error("error validating file {}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A schema handed the configuration loader a type tag it does not know.
    #[error("invalid configuration parameter type {tag:?}")]
    UnknownParamType { tag: String },

    /// Fewer configuration parameters loaded than the schema defines.
    #[error("{loaded} of {total} configuration parameters processed")]
    PartialLoad { loaded: usize, total: usize },
}
