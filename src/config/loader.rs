//! Load a JSON configuration file against a schema and serve typed reads

use crate::config::schema::{ConfigSchema, KEY_PREFIX, MAX_PARAMS, MAX_STR_LEN, TYPE_INT, TYPE_STR};
use crate::error::Error;
use crate::events::EventId;
use crate::extract::{extract_all, FieldDescriptor, FieldValue, JsonKind};
use crate::ingest::{self, MAX_DOCUMENT_BYTES};
use std::path::Path;

/// An immutable table of typed configuration values.
///
/// Construction is all-or-nothing: every parameter the schema names must
/// load from the file, so a table that exists is fully populated. The
/// accessors therefore return plain values; a mismatched read is a caller
/// defect that is logged and answered with a zero value rather than
/// propagated.
pub struct ConfigTable {
    start: u16,
    end: u16,
    params: Vec<FieldDescriptor>,
}

impl ConfigTable {
    /// Build the extraction schema from `schema`, ingest `path`, and require
    /// every parameter to load.
    pub fn load(path: impl AsRef<Path>, schema: &dyn ConfigSchema) -> Result<Self, Error> {
        let total = schema.param_count();
        if total > MAX_PARAMS {
            tracing::error!(
                event = EventId::ConfigSizeErr.code(),
                "schema defines {total} parameters which is greater than the maximum {MAX_PARAMS}"
            );
            return Err(Error::CapacityExceeded {
                requested: total,
                max: MAX_PARAMS,
            });
        }

        let mut params = Vec::with_capacity(total);
        for id in schema.start() + 1..schema.end() {
            let key = format!("{KEY_PREFIX}{}", schema.name(id));
            let descriptor = match schema.type_tag(id) {
                TYPE_INT => FieldDescriptor::int(key)?,
                TYPE_STR => FieldDescriptor::string(key, MAX_STR_LEN)?,
                tag => {
                    tracing::error!(
                        event = EventId::ConfigTypeErr.code(),
                        "invalid parameter type {tag:?} for {key}"
                    );
                    return Err(Error::UnknownParamType {
                        tag: tag.to_owned(),
                    });
                }
            };
            params.push(descriptor);
        }

        let mut table = ConfigTable {
            start: schema.start(),
            end: schema.end(),
            params,
        };

        let mut buf = Vec::new();
        let mut loaded = 0;
        ingest::process_file(path, &mut buf, MAX_DOCUMENT_BYTES, |doc, _len| {
            loaded = extract_all(&mut table.params, doc);
            loaded == total
        })?;

        if loaded == total {
            tracing::info!(
                event = EventId::ConfigLoaded.code(),
                "configuration file processed with {total} parameters"
            );
            Ok(table)
        } else {
            tracing::error!(
                event = EventId::ConfigLoadErr.code(),
                "{loaded} of {total} configuration parameters processed"
            );
            Err(Error::PartialLoad { loaded, total })
        }
    }

    /// Integer parameter by id. Returns 0 and logs if the id is out of
    /// range or names a parameter of another type.
    pub fn get_int(&self, id: u16) -> i32 {
        match self.checked(id, JsonKind::Number) {
            Some(FieldValue::Int(value)) => *value,
            _ => 0,
        }
    }

    /// String parameter by id. Returns `""` and logs if the id is out of
    /// range or names a parameter of another type.
    pub fn get_str(&self, id: u16) -> &str {
        match self.checked(id, JsonKind::String) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    /// The single place the 1-based id range maps onto the zero-based
    /// parameter array. Id `start` is reserved and never resolves.
    fn slot(&self, id: u16) -> Option<&FieldDescriptor> {
        if id <= self.start || id >= self.end {
            return None;
        }
        self.params.get(usize::from(id - self.start - 1))
    }

    fn checked(&self, id: u16, want: JsonKind) -> Option<&FieldValue> {
        let Some(param) = self.slot(id) else {
            tracing::error!(
                event = EventId::ConfigAccessErr.code(),
                "parameter {id} is outside the range {} < id < {}",
                self.start,
                self.end
            );
            return None;
        };
        if !param.updated() {
            tracing::error!(
                event = EventId::ConfigAccessErr.code(),
                "parameter {id} ({}) was never loaded",
                param.key()
            );
            return None;
        }
        if param.kind() != want {
            tracing::error!(
                event = EventId::ConfigAccessErr.code(),
                "parameter {} requested as {want} but loaded as {}",
                param.key(),
                param.kind()
            );
            return None;
        }
        param.value()
    }
}
