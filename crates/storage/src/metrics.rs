//! Metrics summary loading (JSON object or CSV with a header row).

use crate::error::StorageError;
use crate::profile::extension;
use loadplan_core::MetricsSummary;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a metrics summary file.
///
/// Returns the summary plus a warning per recognized field that was absent
/// or non-numeric; those fields stay unset and the dependent checks report
/// `indeterminate` downstream. Unknown extra fields are ignored. For CSV the
/// first data row is used; a header-only file is a parse error.
pub fn load_metrics(path: impl AsRef<Path>) -> Result<(MetricsSummary, Vec<String>), StorageError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StorageError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let (summary, warnings) = match extension(path).as_deref() {
        Some("json") => from_json(path, &content)?,
        Some("csv") => from_csv(path, &content)?,
        _ => {
            return Err(StorageError::UnsupportedFormat {
                path: path.to_path_buf(),
                expected: ".json or .csv",
            })
        }
    };
    debug!(path = %path.display(), warnings = warnings.len(), "metrics summary loaded");
    Ok((summary, warnings))
}

enum FieldValue {
    Missing,
    Invalid(String),
    Number(f64),
}

fn from_json(path: &Path, content: &str) -> Result<(MetricsSummary, Vec<String>), StorageError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| StorageError::parse(path, e.to_string()))?;
    let map = value
        .as_object()
        .ok_or_else(|| StorageError::parse(path, "metrics JSON must be an object at the top level"))?;

    Ok(assemble(|field| match map.get(field) {
        None => FieldValue::Missing,
        Some(v) => match v.as_f64() {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Invalid(v.to_string()),
        },
    }))
}

fn from_csv(path: &Path, content: &str) -> Result<(MetricsSummary, Vec<String>), StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| StorageError::parse(path, e.to_string()))?
        .clone();
    let record = reader
        .records()
        .next()
        .ok_or_else(|| StorageError::parse(path, "CSV file has no data rows"))?
        .map_err(|e| StorageError::parse(path, e.to_string()))?;

    let row: HashMap<&str, &str> = headers.iter().zip(record.iter()).collect();

    Ok(assemble(|field| match row.get(field) {
        None => FieldValue::Missing,
        Some(cell) => match cell.parse::<f64>() {
            Ok(n) => FieldValue::Number(n),
            Err(_) => FieldValue::Invalid((*cell).to_string()),
        },
    }))
}

fn assemble(lookup: impl Fn(&str) -> FieldValue) -> (MetricsSummary, Vec<String>) {
    let mut summary = MetricsSummary::default();
    let mut warnings = Vec::new();
    for field in MetricsSummary::field_names() {
        match lookup(field) {
            FieldValue::Number(value) => {
                summary.set(field, value);
            }
            FieldValue::Missing => warnings.push(format!("missing field: {field}")),
            FieldValue::Invalid(observed) => {
                warnings.push(format!("non-numeric value for {field}: {observed}"))
            }
        }
    }
    (summary, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "metrics.json",
            r#"{"p50_ms": 120, "p90_ms": 280, "p95_ms": 350, "p99_ms": 700,
                "error_rate": 0.005, "throughput_rps": 195,
                "cpu_percent": 55, "memory_percent": 62}"#,
        );
        let (summary, warnings) = load_metrics(&path).unwrap();
        assert_eq!(summary.p95_ms, Some(350.0));
        assert_eq!(summary.error_rate, Some(0.005));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_fields_warn_but_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.json", r#"{"p95_ms": 350}"#);
        let (summary, warnings) = load_metrics(&path).unwrap();
        assert_eq!(summary.p95_ms, Some(350.0));
        assert!(warnings.iter().any(|w| w.contains("p99_ms")));
        assert!(warnings.iter().any(|w| w.contains("error_rate")));
    }

    #[test]
    fn test_unknown_extra_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "metrics.json",
            r#"{"p95_ms": 350, "gc_pause_ms": 120}"#,
        );
        let (summary, warnings) = load_metrics(&path).unwrap();
        assert_eq!(summary.p95_ms, Some(350.0));
        assert!(!warnings.iter().any(|w| w.contains("gc_pause_ms")));
    }

    #[test]
    fn test_non_numeric_value_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.json", r#"{"p95_ms": "fast"}"#);
        let (summary, warnings) = load_metrics(&path).unwrap();
        assert_eq!(summary.p95_ms, None);
        assert!(warnings.iter().any(|w| w.contains("non-numeric") && w.contains("p95_ms")));
    }

    #[test]
    fn test_load_csv_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "metrics.csv",
            "p50_ms, p95_ms, error_rate\n130, 380, 0.008\n999, 999, 0.9\n",
        );
        let (summary, warnings) = load_metrics(&path).unwrap();
        assert_eq!(summary.p50_ms, Some(130.0));
        assert_eq!(summary.p95_ms, Some(380.0));
        assert_eq!(summary.error_rate, Some(0.008));
        assert!(warnings.iter().any(|w| w.contains("p99_ms")));
    }

    #[test]
    fn test_header_only_csv_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.csv", "p50_ms,p95_ms\n");
        let err = load_metrics(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.json", "{bad}");
        let err = load_metrics(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn test_non_object_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.json", "[1, 2]");
        let err = load_metrics(&path).unwrap_err();
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "metrics.xml", "<metrics/>");
        let err = load_metrics(&path).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_metrics("/nonexistent/metrics.json").unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
