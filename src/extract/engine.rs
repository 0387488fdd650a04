//! The extraction engine: match descriptors against a parsed document

use crate::error::Error;
use crate::events::EventId;
use crate::extract::types::{FieldDescriptor, FieldValue, JsonKind};
use serde_json::Value;

/// Bytes of raw sub-document logged per event when tracing objects/arrays.
const SUBDOC_SEGMENT_BYTES: usize = 100;

/// Resolve a dotted query key against a parsed document.
///
/// `"config.APP_NAME"` walks into the `"config"` object and returns its
/// `"APP_NAME"` member. Every segment but the last must be an object.
pub fn search<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    let mut node = doc;
    for segment in key.split('.') {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Extract every descriptor against the same document.
///
/// Each descriptor is attempted regardless of earlier failures so callers
/// can report partial success. Returns the number that loaded.
pub fn extract_all(descriptors: &mut [FieldDescriptor], doc: &Value) -> usize {
    let mut loaded = 0;
    for descriptor in descriptors.iter_mut() {
        if descriptor.extract(doc) {
            loaded += 1;
        }
    }
    loaded
}

impl FieldDescriptor {
    /// Search the document for this descriptor's key and, on a well-typed
    /// match, copy the value into the slot.
    ///
    /// The slot is cleared first, so after any failure `updated()` is false.
    /// Object and array kinds are diagnostic only and never load a slot.
    pub fn extract(&mut self, doc: &Value) -> bool {
        self.value = None;

        let Some(found) = search(doc, &self.key) else {
            if self.required {
                let err = Error::NotFound {
                    key: self.key.clone(),
                };
                tracing::info!(event = EventId::FieldNotFound.code(), "{err}");
            }
            return false;
        };

        tracing::debug!(
            event = EventId::FieldLoaded.code(),
            "query {} matched {} value {}",
            self.key,
            JsonKind::of(found),
            found
        );

        match self.kind {
            JsonKind::String | JsonKind::Number => match self.load_scalar(found) {
                Ok(()) => true,
                Err(err) => {
                    self.report(&err);
                    false
                }
            },
            JsonKind::Object | JsonKind::Array => {
                if JsonKind::of(found) == self.kind {
                    self.trace_subdocument(found);
                } else {
                    self.report(&self.mismatch(found));
                }
                false
            }
            JsonKind::Bool | JsonKind::Null => {
                tracing::error!(
                    event = EventId::FieldUnsupportedKind.code(),
                    "unsupported kind {} for query {}",
                    self.kind,
                    self.key
                );
                false
            }
        }
    }

    fn load_scalar(&mut self, found: &Value) -> Result<(), Error> {
        match self.kind {
            JsonKind::String => {
                let text = found.as_str().ok_or_else(|| self.mismatch(found))?;
                if text.len() >= self.capacity {
                    return Err(Error::Overflow {
                        key: self.key.clone(),
                        len: text.len(),
                        max: self.capacity,
                    });
                }
                self.value = Some(FieldValue::Text(text.to_owned()));
                Ok(())
            }
            JsonKind::Number => {
                let Value::Number(number) = found else {
                    return Err(self.mismatch(found));
                };
                let int = number
                    .as_i64()
                    .and_then(|wide| i32::try_from(wide).ok())
                    .ok_or_else(|| Error::Parse {
                        key: self.key.clone(),
                        value: number.to_string(),
                    })?;
                self.value = Some(FieldValue::Int(int));
                Ok(())
            }
            _ => unreachable!("load_scalar is only called for string and number kinds"),
        }
    }

    fn mismatch(&self, found: &Value) -> Error {
        Error::TypeMismatch {
            key: self.key.clone(),
            expected: self.kind,
            found: JsonKind::of(found),
        }
    }

    fn report(&self, err: &Error) {
        let event = match err {
            Error::Overflow { .. } => EventId::FieldOverflow,
            Error::Parse { .. } => EventId::FieldParseErr,
            _ => EventId::FieldTypeMismatch,
        };
        tracing::error!(event = event.code(), "{err}");
    }

    /// Log an object or array value in bounded segments, the way the host
    /// console expects its output chunked.
    fn trace_subdocument(&self, found: &Value) {
        let raw = found.to_string();
        tracing::info!(
            event = EventId::FieldSubDocument.code(),
            "{} {} value, len = {}",
            self.key,
            self.kind,
            raw.len()
        );
        for segment in raw.as_bytes().chunks(SUBDOC_SEGMENT_BYTES) {
            tracing::info!("{}", String::from_utf8_lossy(segment));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "config": {
                "APP_NAME": "ingot",
                "CYCLE_MS": 250,
                "RATIO": 2.5,
                "BIG": 4294967296i64,
                "LIMITS": {"rate": 10},
                "IDS": [1, 2, 3]
            }
        })
    }

    #[test]
    fn test_search_dotted_path() {
        let doc = doc();
        assert_eq!(search(&doc, "config.CYCLE_MS"), Some(&json!(250)));
        assert_eq!(search(&doc, "config.LIMITS.rate"), Some(&json!(10)));
    }

    #[test]
    fn test_search_missing_key() {
        let doc = doc();
        assert_eq!(search(&doc, "config.MISSING"), None);
        assert_eq!(search(&doc, "other.APP_NAME"), None);
    }

    #[test]
    fn test_string_extraction() {
        let mut field = FieldDescriptor::string("config.APP_NAME", 16).unwrap();
        assert!(field.extract(&doc()));
        assert!(field.updated());
        assert_eq!(field.as_str(), Some("ingot"));
    }

    #[test]
    fn test_int_extraction() {
        let mut field = FieldDescriptor::int("config.CYCLE_MS").unwrap();
        assert!(field.extract(&doc()));
        assert_eq!(field.as_int(), Some(250));
    }

    #[test]
    fn test_string_one_under_capacity_fits() {
        // "ingot" is 5 bytes; a 6-byte slot leaves room for it.
        let mut field = FieldDescriptor::string("config.APP_NAME", 6).unwrap();
        assert!(field.extract(&doc()));
        assert_eq!(field.as_str(), Some("ingot"));
    }

    #[test]
    fn test_string_at_capacity_overflows() {
        let mut field = FieldDescriptor::string("config.APP_NAME", 5).unwrap();
        assert!(!field.extract(&doc()));
        assert!(!field.updated());
    }

    #[test]
    fn test_non_integer_number_fails_parse() {
        let mut field = FieldDescriptor::int("config.RATIO").unwrap();
        assert!(!field.extract(&doc()));
        assert_eq!(field.as_int(), None);
    }

    #[test]
    fn test_out_of_range_number_fails_parse() {
        let mut field = FieldDescriptor::int("config.BIG").unwrap();
        assert!(!field.extract(&doc()));
        assert!(!field.updated());
    }

    #[test]
    fn test_kind_mismatch_fails() {
        let mut field = FieldDescriptor::int("config.APP_NAME").unwrap();
        assert!(!field.extract(&doc()));
        assert!(!field.updated());
    }

    #[test]
    fn test_missing_required_key_fails() {
        let mut field = FieldDescriptor::int("config.MISSING").unwrap();
        assert!(!field.extract(&doc()));
    }

    #[test]
    fn test_missing_optional_key_fails_silently() {
        let mut field = FieldDescriptor::int("config.MISSING").unwrap().optional();
        assert!(!field.extract(&doc()));
        assert!(!field.updated());
    }

    #[test]
    fn test_object_kind_is_diagnostic_only() {
        let mut field = FieldDescriptor::new("config.LIMITS", JsonKind::Object, 0).unwrap();
        assert!(!field.extract(&doc()));
        assert!(!field.updated());
    }

    #[test]
    fn test_array_kind_is_diagnostic_only() {
        let mut field = FieldDescriptor::new("config.IDS", JsonKind::Array, 0).unwrap();
        assert!(!field.extract(&doc()));
    }

    #[test]
    fn test_extract_clears_stale_slot() {
        let mut field = FieldDescriptor::int("config.CYCLE_MS").unwrap();
        assert!(field.extract(&doc()));
        assert!(!field.extract(&json!({})));
        assert!(!field.updated());
    }

    #[test]
    fn test_extract_all_counts_partial_success() {
        let doc = doc();
        let mut fields = vec![
            FieldDescriptor::string("config.APP_NAME", 16).unwrap(),
            FieldDescriptor::int("config.CYCLE_MS").unwrap(),
            FieldDescriptor::int("config.MISSING").unwrap(),
        ];
        assert_eq!(extract_all(&mut fields, &doc), 2);
        assert!(fields[0].updated());
        assert!(fields[1].updated());
        assert!(!fields[2].updated());
    }
}
