//! JSONL file writer for transcript events.
//!
//! Each [`TranscriptEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use buddy_application::{TranscriptEvent, TranscriptLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file so
/// transcripts from earlier runs are kept. Flushes on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the transcript at `path`.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("transcript.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "user": "anonymous", "text": "hello" }),
        ));
        logger.log(TranscriptEvent::new(
            "bot_reply",
            serde_json::json!({ "user": "anonymous", "text": "Hi! How are you?" }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "user_message");
        assert_eq!(lines[0]["text"], "hello");
        assert_eq!(lines[1]["type"], "bot_reply");
        for line in &lines {
            assert!(line["timestamp"].as_str().unwrap().ends_with('Z'));
        }
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");

        for _ in 0..2 {
            let logger = JsonlTranscriptLogger::new(&path).unwrap();
            logger.log(TranscriptEvent::new(
                "conversation_cleared",
                serde_json::json!({ "user": "u" }),
            ));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }
}
