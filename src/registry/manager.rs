//! The bounded registry that owns table handlers and routes commands

use crate::error::Error;
use crate::events::EventId;
use crate::fileutil;
use crate::registry::types::{
    DumpTableCmd, LoadMode, LoadTableCmd, Table, TableAction, TableStatus, UNDEFINED_FILENAME,
};

struct Entry {
    status: TableStatus,
    table: Box<dyn Table>,
}

/// Bounded collection of registered tables.
///
/// Capacity is fixed at construction and never grown; registration past it
/// is rejected. Ids are assigned sequentially from 1 in registration order
/// and are never reused, so an id is a stable handle for the life of the
/// registry. All operations run on the caller's thread with no locking;
/// one logical owner drives every call.
pub struct TableRegistry {
    capacity: usize,
    entries: Vec<Entry>,
    last_action_id: Option<u8>,
}

impl TableRegistry {
    pub fn new(capacity: usize) -> Self {
        TableRegistry {
            capacity,
            entries: Vec::with_capacity(capacity),
            last_action_id: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a table and return its assigned id.
    pub fn register(&mut self, table: Box<dyn Table>) -> Result<u8, Error> {
        if self.entries.len() >= self.capacity {
            tracing::error!(
                event = EventId::RegistryFull.code(),
                "table registration exceeds the registry capacity {}",
                self.capacity
            );
            return Err(Error::CapacityExceeded {
                requested: self.entries.len() + 1,
                max: self.capacity,
            });
        }

        let id = (self.entries.len() + 1) as u8;
        self.entries.push(Entry {
            status: TableStatus {
                id,
                last_action: Some(TableAction::Register),
                last_result: true,
                loaded: false,
                filename: UNDEFINED_FILENAME.to_owned(),
            },
            table,
        });
        self.last_action_id = Some(id);
        Ok(id)
    }

    /// Register a table, then immediately load it from `default_filename`
    /// with replace semantics.
    ///
    /// Registration and the initial load are independent outcomes: a failed
    /// load leaves the table registered, with the failure recorded in its
    /// status.
    pub fn register_with_default(
        &mut self,
        table: Box<dyn Table>,
        default_filename: &str,
    ) -> Result<u8, Error> {
        let id = self.register(table)?;
        self.load(id, LoadMode::Replace, default_filename);
        Ok(id)
    }

    /// Route a load to the table registered under `id`.
    ///
    /// Unknown ids are logged and answered with `false` without touching
    /// any entry. Otherwise the handler's verdict is recorded as the
    /// entry's last result and its loaded flag, and returned.
    pub fn load(&mut self, id: u8, mode: LoadMode, filename: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::error!(
                event = EventId::LoadIdErr.code(),
                "load table command received an invalid table id {id}"
            );
            return false;
        };

        let entry = &mut self.entries[index];
        let ok = match entry.table.load(mode, filename) {
            Ok(()) => {
                tracing::info!(
                    event = EventId::TableLoaded.code(),
                    "table {id} {mode} load from {filename} succeeded"
                );
                true
            }
            Err(err) => {
                tracing::error!(
                    event = EventId::TableLoadErr.code(),
                    "table {id} {mode} load from {filename} failed: {err:#}"
                );
                false
            }
        };

        entry.status.last_action = Some(TableAction::Load);
        entry.status.last_result = ok;
        entry.status.loaded = ok;
        entry.status.filename = filename.to_owned();
        self.last_action_id = Some(id);
        ok
    }

    /// Route a dump to the table registered under `id`.
    ///
    /// Symmetric with [`TableRegistry::load`] except that a dump never
    /// changes whether the table counts as loaded.
    pub fn dump(&mut self, id: u8, qualifier: u8, filename: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::error!(
                event = EventId::DumpIdErr.code(),
                "dump table command received an invalid table id {id}"
            );
            return false;
        };

        let entry = &mut self.entries[index];
        let ok = match entry.table.dump(qualifier, filename) {
            Ok(()) => {
                tracing::info!(
                    event = EventId::TableDumped.code(),
                    "table {id} dump to {filename} succeeded"
                );
                true
            }
            Err(err) => {
                tracing::error!(
                    event = EventId::TableDumpErr.code(),
                    "table {id} dump to {filename} failed: {err:#}"
                );
                false
            }
        };

        entry.status.last_action = Some(TableAction::Dump);
        entry.status.last_result = ok;
        entry.status.filename = filename.to_owned();
        self.last_action_id = Some(id);
        ok
    }

    pub fn status(&self, id: u8) -> Option<&TableStatus> {
        self.index_of(id).map(|index| &self.entries[index].status)
    }

    /// Status of the entry the most recent action touched, if any action
    /// has been recorded since construction or the last reset.
    pub fn last_status(&self) -> Option<&TableStatus> {
        self.last_action_id.and_then(|id| self.status(id))
    }

    /// Clear last-action bookkeeping for every entry. Ids, handler
    /// bindings, loaded flags, and filenames are untouched.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.status.last_action = None;
            entry.status.last_result = false;
        }
        self.last_action_id = None;
    }

    /// Command-message face of [`TableRegistry::load`]: decode the mode
    /// byte, sanity-check the filename, dispatch.
    pub fn handle_load_cmd(&mut self, cmd: &LoadTableCmd) -> bool {
        let Some(mode) = LoadMode::from_wire(cmd.load_mode) else {
            tracing::error!(
                event = EventId::CmdRejected.code(),
                "load table command has invalid mode byte {}",
                cmd.load_mode
            );
            return false;
        };
        if !fileutil::verify_filename(&cmd.filename) {
            tracing::error!(
                event = EventId::CmdRejected.code(),
                "load table command rejected for table id {}",
                cmd.table_id
            );
            return false;
        }
        self.load(cmd.table_id, mode, &cmd.filename)
    }

    /// Command-message face of [`TableRegistry::dump`].
    pub fn handle_dump_cmd(&mut self, cmd: &DumpTableCmd) -> bool {
        if !fileutil::verify_filename(&cmd.filename) {
            tracing::error!(
                event = EventId::CmdRejected.code(),
                "dump table command rejected for table id {}",
                cmd.table_id
            );
            return false;
        }
        self.dump(cmd.table_id, cmd.dump_mode, &cmd.filename)
    }

    /// Ids are 1-based and dense; 0 is the reserved undefined id.
    fn index_of(&self, id: u8) -> Option<usize> {
        if id == 0 {
            return None;
        }
        let index = usize::from(id) - 1;
        (index < self.entries.len()).then_some(index)
    }
}
