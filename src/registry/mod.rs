//! Table registry and command dispatch
//!
//! Applications own an open set of tables, each knowing how to load itself
//! from a file and dump itself to one. The registry assigns each table a
//! numeric id at registration, routes load/dump commands to the right
//! handler by id, and keeps per-table bookkeeping of the last action and
//! its outcome for status telemetry.

pub mod manager;
pub mod types;

pub use manager::TableRegistry;
pub use types::{
    DumpTableCmd, LoadMode, LoadTableCmd, Table, TableAction, TableStatus, UNDEFINED_FILENAME,
};
