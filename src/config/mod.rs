//! Application configuration backed by a JSON file
//!
//! An application describes its parameters once, as a contiguous range of
//! ids with a name and type tag per id (the [`ConfigSchema`] contract), and
//! [`ConfigTable`] turns that description into an extraction schema, loads
//! the file, and serves type-checked reads for the life of the process.

pub mod loader;
pub mod schema;

pub use loader::ConfigTable;
pub use schema::{ConfigSchema, KEY_PREFIX, MAX_PARAMS, MAX_STR_LEN, TYPE_INT, TYPE_STR};
