//! File ingestion pipeline - open, read, validate, hand off
//!
//! Turns a file path into a validated in-memory JSON document and hands
//! that document to a caller callback. Each step is a hard gate: a failure
//! is logged once, the matching [`Error`] is returned, and nothing is
//! retried. Retry, if wanted, is the caller invoking the pipeline again.

use crate::error::Error;
use crate::events::EventId;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default byte budget for one ingested document.
pub const MAX_DOCUMENT_BYTES: usize = 8192;

/// Open `path`, read at most `max_bytes` into `buf`, validate the bytes as
/// JSON, and invoke `on_document` with the parsed document and byte count.
///
/// `buf` is caller-owned so it can be reused across loads; it is cleared
/// before the read. A short read is not checked here: a truncated document
/// fails the validation gate instead. The callback's verdict is returned as
/// `Ok(verdict)`.
pub fn process_file<F>(
    path: impl AsRef<Path>,
    buf: &mut Vec<u8>,
    max_bytes: usize,
    on_document: F,
) -> Result<bool, Error>
where
    F: FnOnce(&Value, usize) -> bool,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            tracing::error!(
                event = EventId::FileOpenErr.code(),
                "error opening file {}: {}",
                path.display(),
                source
            );
            return Err(Error::Open {
                path: path.to_owned(),
                source,
            });
        }
    };

    buf.clear();
    let bytes_read = match file.take(max_bytes as u64).read_to_end(buf) {
        Ok(bytes_read) => bytes_read,
        Err(source) => {
            tracing::error!(
                event = EventId::FileReadErr.code(),
                "error reading file {}: {}",
                path.display(),
                source
            );
            return Err(Error::Read {
                path: path.to_owned(),
                source,
            });
        }
    };

    let doc: Value = match serde_json::from_slice(buf) {
        Ok(doc) => doc,
        Err(source) => {
            tracing::error!(
                event = EventId::FileValidateErr.code(),
                "error validating file {}: {}",
                path.display(),
                source
            );
            return Err(Error::Validation {
                path: path.to_owned(),
                source,
            });
        }
    };

    Ok(on_document(&doc, bytes_read))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let mut buf = Vec::new();
        let result = process_file("/no/such/file.json", &mut buf, MAX_DOCUMENT_BYTES, |_, _| true);
        assert!(matches!(result, Err(Error::Open { .. })));
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", "{\"config\": ");
        let mut buf = Vec::new();
        let result = process_file(&path, &mut buf, MAX_DOCUMENT_BYTES, |_, _| true);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_valid_file_reaches_callback() {
        let dir = tempfile::tempdir().unwrap();
        let contents = r#"{"config": {"APP_NAME": "demo"}}"#;
        let path = write_file(&dir, "good.json", contents);
        let mut buf = Vec::new();
        let result = process_file(&path, &mut buf, MAX_DOCUMENT_BYTES, |doc, len| {
            assert_eq!(len, contents.len());
            assert_eq!(doc["config"]["APP_NAME"], json!("demo"));
            true
        });
        assert!(matches!(result, Ok(true)));
    }

    #[test]
    fn test_callback_verdict_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "good.json", "{}");
        let mut buf = Vec::new();
        let result = process_file(&path, &mut buf, MAX_DOCUMENT_BYTES, |_, _| false);
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn test_truncated_read_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "big.json", r#"{"config": {"APP_NAME": "demo"}}"#);
        let mut buf = Vec::new();
        let result = process_file(&path, &mut buf, 10, |_, _| true);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_buffer_is_reused_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(&dir, "a.json", r#"{"a": 1}"#);
        let second = write_file(&dir, "b.json", "{}");
        let mut buf = Vec::new();
        process_file(&first, &mut buf, MAX_DOCUMENT_BYTES, |_, _| true).unwrap();
        process_file(&second, &mut buf, MAX_DOCUMENT_BYTES, |_, len| {
            assert_eq!(len, 2);
            true
        })
        .unwrap();
        assert_eq!(buf, b"{}");
    }
}
