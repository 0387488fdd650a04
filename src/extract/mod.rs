//! Value extraction - copy JSON values into typed, bounded slots
//!
//! A [`FieldDescriptor`] binds one dotted query key and an expected value
//! kind to a destination slot. The engine walks a parsed document, matches
//! each descriptor independently, and fills the slots that match, so a
//! caller can bind an arbitrary storage layout without the engine knowing
//! anything about it.

pub mod engine;
pub mod types;

pub use engine::{extract_all, search};
pub use types::{FieldDescriptor, FieldValue, JsonKind, MAX_KEY_LEN};
