// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! The metrics summary record scored by the interpreter.
//!
//! Every field is optional: the interpreter degrades to `indeterminate`
//! findings rather than failing when values are absent. Loaders populate the
//! summary by field name via [`MetricsSummary::set`] so that the recognized
//! field list lives in exactly one place.

use serde::{Deserialize, Serialize};

/// Fields a summary must carry for a full evaluation.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "p50_ms",
    "p90_ms",
    "p95_ms",
    "p99_ms",
    "error_rate",
    "throughput_rps",
];

/// Fields that enrich risk detection when present.
pub const OPTIONAL_FIELDS: [&str; 2] = ["cpu_percent", "memory_percent"];

/// A parsed metrics summary. Unknown input fields are ignored by loaders;
/// absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Median latency in milliseconds.
    pub p50_ms: Option<f64>,
    /// 90th percentile latency in milliseconds.
    pub p90_ms: Option<f64>,
    /// 95th percentile latency in milliseconds.
    pub p95_ms: Option<f64>,
    /// 99th percentile latency in milliseconds.
    pub p99_ms: Option<f64>,
    /// Observed error rate as a fraction in `[0, 1]`.
    pub error_rate: Option<f64>,
    /// Observed throughput in requests per second.
    pub throughput_rps: Option<f64>,
    /// CPU utilization percentage.
    pub cpu_percent: Option<f64>,
    /// Memory utilization percentage.
    pub memory_percent: Option<f64>,
}

impl MetricsSummary {
    /// All recognized field names: required first, then optional.
    pub fn field_names() -> impl Iterator<Item = &'static str> {
        REQUIRED_FIELDS.into_iter().chain(OPTIONAL_FIELDS)
    }

    /// Set a field by its wire name. Returns `false` for unrecognized names,
    /// which callers treat as ignorable extra input.
    pub fn set(&mut self, field: &str, value: f64) -> bool {
        let slot = match field {
            "p50_ms" => &mut self.p50_ms,
            "p90_ms" => &mut self.p90_ms,
            "p95_ms" => &mut self.p95_ms,
            "p99_ms" => &mut self.p99_ms,
            "error_rate" => &mut self.error_rate,
            "throughput_rps" => &mut self.throughput_rps,
            "cpu_percent" => &mut self.cpu_percent,
            "memory_percent" => &mut self.memory_percent,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Whether no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.p50_ms.is_none()
            && self.p90_ms.is_none()
            && self.p95_ms.is_none()
            && self.p99_ms.is_none()
            && self.error_rate.is_none()
            && self.throughput_rps.is_none()
            && self.cpu_percent.is_none()
            && self.memory_percent.is_none()
    }
}
