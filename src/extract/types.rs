//! Descriptor and value types for schema-driven extraction

use crate::error::Error;
use crate::events::EventId;
use serde_json::Value;
use std::fmt;

/// Maximum byte length of a dotted query key.
pub const MAX_KEY_LEN: usize = 64;

/// The kind of a JSON value, one tag per `serde_json::Value` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value extracted into a descriptor's slot.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Text(String),
}

/// One schema entry: a query key, an expected kind, and a destination slot.
///
/// The slot starts empty and is filled only by a successful extraction;
/// [`FieldDescriptor::updated`] reports whether that has happened.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub(crate) key: String,
    pub(crate) kind: JsonKind,
    pub(crate) capacity: usize,
    pub(crate) required: bool,
    pub(crate) value: Option<FieldValue>,
}

impl FieldDescriptor {
    /// Build a descriptor for an arbitrary expected kind.
    ///
    /// `capacity` bounds the accepted value length for string descriptors
    /// and is ignored for kinds that never bind a slot.
    pub fn new(key: impl Into<String>, kind: JsonKind, capacity: usize) -> Result<Self, Error> {
        let key = key.into();
        if key.len() > MAX_KEY_LEN {
            tracing::error!(
                event = EventId::FieldKeyTooLong.code(),
                "query key {} exceeds maximum key length {}",
                key,
                MAX_KEY_LEN
            );
            return Err(Error::CapacityExceeded {
                requested: key.len(),
                max: MAX_KEY_LEN,
            });
        }
        Ok(FieldDescriptor {
            key,
            kind,
            capacity,
            required: true,
            value: None,
        })
    }

    /// Descriptor for a signed 32-bit integer value.
    pub fn int(key: impl Into<String>) -> Result<Self, Error> {
        Self::new(key, JsonKind::Number, std::mem::size_of::<i32>())
    }

    /// Descriptor for a string value of at most `capacity - 1` bytes.
    pub fn string(key: impl Into<String>, capacity: usize) -> Result<Self, Error> {
        Self::new(key, JsonKind::String, capacity)
    }

    /// Mark the key as optional: its absence is not reported.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> JsonKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// True once a value has been extracted into the slot.
    pub fn updated(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            Some(FieldValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}
