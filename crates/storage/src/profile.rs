//! Service profile loading (YAML or JSON).

use crate::error::StorageError;
use loadplan_core::profile::{validate, RawProfile, ServiceProfile};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load and validate a service profile file.
///
/// The format is chosen by extension: `.yaml`/`.yml` or `.json`. A file that
/// fails to parse is a [`StorageError::Parse`]; a parsed file that violates
/// schema or range rules is a [`StorageError::Validation`] carrying every
/// field problem.
pub fn load_profile(path: impl AsRef<Path>) -> Result<ServiceProfile, StorageError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StorageError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let raw = parse_raw(path, &content)?;
    let profile = validate(raw)?;
    debug!(service = %profile.service, path = %path.display(), "profile loaded");
    Ok(profile)
}

fn parse_raw(path: &Path, content: &str) -> Result<RawProfile, StorageError> {
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(content).map_err(|e| StorageError::parse(path, e.to_string()))
        }
        Some("json") => {
            serde_json::from_str(content).map_err(|e| StorageError::parse(path, e.to_string()))
        }
        _ => Err(StorageError::UnsupportedFormat {
            path: path.to_path_buf(),
            expected: ".yaml, .yml, or .json",
        }),
    }
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
