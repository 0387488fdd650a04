//! # Ingot - JSON values cast into fixed, typed storage
//!
//! A small framework for applications that keep their configuration and
//! tables in JSON files but want declarative, type-checked binding into
//! fixed storage plus uniform load/dump command handling.
//!
//! ## Modules
//!
//! - **extract**: match field descriptors against a parsed document and
//!   fill typed, bounded slots
//! - **ingest**: the open-read-validate-callback pipeline that turns a
//!   file path into a validated in-memory document
//! - **config**: a schema-driven configuration table with typed getters
//! - **registry**: a bounded table registry routing load/dump commands to
//!   per-table handlers
//!
//! ## Quick Start
//!
//! ### Field extraction
//!
//! ```rust
//! use ingot::{extract_all, FieldDescriptor};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({"config": {"APP_NAME": "demo", "CYCLE_MS": 250}});
//!
//! let mut fields = vec![
//!     FieldDescriptor::string("config.APP_NAME", 32)?,
//!     FieldDescriptor::int("config.CYCLE_MS")?,
//! ];
//!
//! assert_eq!(extract_all(&mut fields, &doc), 2);
//! assert_eq!(fields[0].as_str(), Some("demo"));
//! assert_eq!(fields[1].as_int(), Some(250));
//! # Ok(())
//! # }
//! ```
//!
//! ### Table registration and dispatch
//!
//! ```rust
//! use ingot::{LoadMode, Table, TableRegistry};
//!
//! struct LimitsTable;
//!
//! impl Table for LimitsTable {
//!     fn load(&mut self, _mode: LoadMode, _filename: &str) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//!     fn dump(&mut self, _qualifier: u8, _filename: &str) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = TableRegistry::new(4);
//! let id = registry.register(Box::new(LimitsTable)).unwrap();
//! assert!(registry.load(id, LoadMode::Replace, "/boot/limits.json"));
//! assert!(registry.status(id).unwrap().loaded);
//! ```

use std::path::Path;

pub mod config;
pub mod error;
pub mod events;
pub mod extract;
pub mod fileutil;
pub mod ingest;
pub mod registry;

// Re-export commonly used types for convenience
pub use config::{ConfigSchema, ConfigTable};
pub use error::Error;
pub use extract::{extract_all, search, FieldDescriptor, FieldValue, JsonKind};
pub use ingest::{process_file, MAX_DOCUMENT_BYTES};
pub use registry::{
    DumpTableCmd, LoadMode, LoadTableCmd, Table, TableAction, TableRegistry, TableStatus,
};

/// Main entry point for table objects: ingest a JSON file and extract a
/// descriptor array against it in one call.
///
/// Returns how many descriptors loaded. Ingestion gate failures are
/// returned as errors; extraction shortfalls are visible in the count and
/// in each descriptor's `updated()` flag.
pub fn extract_file(
    path: impl AsRef<Path>,
    buf: &mut Vec<u8>,
    max_bytes: usize,
    descriptors: &mut [FieldDescriptor],
) -> Result<usize, Error> {
    let mut loaded = 0;
    ingest::process_file(path, buf, max_bytes, |doc, _len| {
        loaded = extract_all(descriptors, doc);
        true
    })?;
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"{"config": {"APP_NAME": "demo", "CYCLE_MS": 250}}"#).unwrap();

        let mut fields = vec![
            FieldDescriptor::string("config.APP_NAME", 32).unwrap(),
            FieldDescriptor::int("config.CYCLE_MS").unwrap(),
            FieldDescriptor::int("config.MISSING").unwrap().optional(),
        ];

        let mut buf = Vec::new();
        let loaded = extract_file(&path, &mut buf, MAX_DOCUMENT_BYTES, &mut fields).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(fields[0].as_str(), Some("demo"));
        assert_eq!(fields[1].as_int(), Some(250));
        assert!(!fields[2].updated());
    }
}
