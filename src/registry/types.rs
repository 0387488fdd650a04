//! Table handler contract, status bookkeeping, and command shapes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename recorded for an entry before any load or dump names one.
pub const UNDEFINED_FILENAME: &str = "undefined";

/// How a load should treat existing table contents. The registry only
/// threads the mode through; whole-table overwrite versus sparse update
/// semantics belong to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadMode {
    Replace,
    Update,
}

impl LoadMode {
    /// Decode the command-message mode byte.
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(LoadMode::Replace),
            1 => Some(LoadMode::Update),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadMode::Replace => "replace",
            LoadMode::Update => "update",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The most recent action performed on a registry entry. "No action yet"
/// is the absence of a value, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableAction {
    Register,
    Load,
    Dump,
}

impl TableAction {
    pub fn label(self) -> &'static str {
        match self {
            TableAction::Register => "register",
            TableAction::Load => "load",
            TableAction::Dump => "dump",
        }
    }
}

/// A table that can load itself from a file and dump itself to one.
///
/// Implementations own their file format and validation; the registry
/// records only whether the handler succeeded. Error detail belongs in the
/// returned error, which the registry forwards to the diagnostic sink.
pub trait Table {
    fn load(&mut self, mode: LoadMode, filename: &str) -> anyhow::Result<()>;

    /// `qualifier` is an opaque, handler-defined dump option byte.
    fn dump(&mut self, qualifier: u8, filename: &str) -> anyhow::Result<()>;
}

/// Per-entry bookkeeping, readable through the registry's status lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatus {
    /// Assigned in registration order starting at 1; 0 is never assigned.
    pub id: u8,
    pub last_action: Option<TableAction>,
    pub last_result: bool,
    pub loaded: bool,
    /// The filename most recently associated with the entry.
    pub filename: String,
}

/// Load-table command as delivered by the command transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadTableCmd {
    pub table_id: u8,
    /// Wire encoding of [`LoadMode`].
    pub load_mode: u8,
    pub filename: String,
}

/// Dump-table command as delivered by the command transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpTableCmd {
    pub table_id: u8,
    /// Opaque handler-defined qualifier.
    pub dump_mode: u8,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mode_wire_decoding() {
        assert_eq!(LoadMode::from_wire(0), Some(LoadMode::Replace));
        assert_eq!(LoadMode::from_wire(1), Some(LoadMode::Update));
        assert_eq!(LoadMode::from_wire(2), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LoadMode::Replace.to_string(), "replace");
        assert_eq!(TableAction::Dump.label(), "dump");
    }

    #[test]
    fn test_command_round_trips_through_json() {
        let cmd = LoadTableCmd {
            table_id: 2,
            load_mode: 1,
            filename: "/boot/tables/limits.json".to_owned(),
        };
        let encoded = serde_json::to_string(&cmd).unwrap();
        let decoded: LoadTableCmd = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.table_id, 2);
        assert_eq!(LoadMode::from_wire(decoded.load_mode), Some(LoadMode::Update));
        assert_eq!(decoded.filename, cmd.filename);
    }
}
