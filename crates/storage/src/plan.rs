//! Generated plan writing.

use crate::error::StorageError;
use loadplan_core::LoadTestPlan;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write a plan as pretty-printed JSON, newline-terminated.
pub fn write_plan(plan: &LoadTestPlan, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let json = plan
        .to_json()
        .map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;
    fs::write(path, json + "\n").map_err(|e| StorageError::io(path, e))?;
    debug!(service = %plan.service, path = %path.display(), "plan written");
    Ok(())
}
