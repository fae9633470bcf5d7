//! Append-only JSONL evidence log.
//!
//! One complete record per line, written with a single append-and-flush so a
//! write never interleaves into a prior entry. Entries are never rewritten
//! or reordered; append order is chronological order.

use crate::error::StorageError;
use loadplan_core::EvidenceEvent;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Append a single evidence event to the log at `path`.
///
/// Creates the file and any parent directories on first use. Existing
/// entries are never touched.
pub fn append_event(event: &EvidenceEvent, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    let line = serde_json::to_string(event).map_err(|e| StorageError::Serialize {
        message: e.to_string(),
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StorageError::io(path, e))?;
    file.write_all(line.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .and_then(|_| file.flush())
        .map_err(|e| StorageError::io(path, e))?;

    debug!(service = %event.service, path = %path.display(), "evidence event appended");
    Ok(())
}

/// Read every event from the log at `path`.
///
/// A missing file is an empty log. Malformed lines are skipped with a
/// warning rather than failing the read.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<EvidenceEvent>, StorageError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let mut events = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<EvidenceEvent>(line) {
            Ok(event) => events.push(event),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping malformed evidence line"),
        }
    }
    Ok(events)
}
