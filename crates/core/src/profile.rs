// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Service profile records and the profile validator.
//!
//! A profile arrives as a [`RawProfile`] - the shape produced by parsing a
//! YAML or JSON file, where everything is optional. [`validate`] turns it
//! into a fully-populated [`ServiceProfile`] or rejects it with the complete
//! list of field problems. Downstream components (generator, interpreter)
//! only ever see the validated form and never branch on "field absent":
//! defaults are applied exactly once, here.

use crate::error::{FieldProblem, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default burst factor applied when the profile does not specify one.
pub const DEFAULT_BURST_FACTOR: f64 = 3.0;

/// Default error-rate SLO applied when the profile does not specify one.
pub const DEFAULT_ERROR_RATE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Raw (unvalidated) records
// ---------------------------------------------------------------------------

/// A service profile exactly as parsed, before any validation.
///
/// Every field is optional so that parsing never enforces schema rules;
/// structural problems are a parse error, field problems are collected by
/// [`validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    /// Service identifier.
    pub service: Option<String>,
    /// Free-text description.
    pub summary: Option<String>,
    /// Traffic shape block.
    pub traffic: Option<RawTraffic>,
    /// SLO block.
    pub slo: Option<RawSlo>,
    /// Endpoint list; may be absent or empty.
    #[serde(default)]
    pub endpoints: Vec<RawEndpoint>,
    /// Downstream service names (informational only).
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Data-handling block.
    pub data: Option<RawData>,
}

/// Unvalidated traffic shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTraffic {
    /// Normal-operation request rate.
    pub baseline_rps: Option<f64>,
    /// Expected peak request rate.
    pub peak_rps: Option<f64>,
    /// Multiplier applied to peak for burst scenarios.
    pub burst_factor: Option<f64>,
}

/// Unvalidated SLO block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSlo {
    /// Latency percentile targets in milliseconds.
    pub latency_ms: Option<RawLatency>,
    /// Acceptable error rate as a fraction in `[0, 1]`.
    pub error_rate: Option<f64>,
}

/// Unvalidated latency targets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLatency {
    /// 95th percentile target in milliseconds.
    pub p95: Option<f64>,
    /// 99th percentile target in milliseconds.
    pub p99: Option<f64>,
}

/// Unvalidated endpoint entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEndpoint {
    /// Request path.
    #[serde(default)]
    pub path: String,
    /// HTTP method; defaults to GET when absent.
    pub method: Option<String>,
    /// Whether the endpoint is business-critical; defaults to false.
    pub critical: Option<bool>,
}

/// Unvalidated data-handling block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawData {
    /// Whether the service may touch production data.
    pub uses_production_data: Option<bool>,
    /// Free-text data-handling notes.
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated records
// ---------------------------------------------------------------------------

/// A validated, fully-populated service profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProfile {
    /// Non-empty service identifier.
    pub service: String,
    /// Free-text description (empty when not provided).
    pub summary: String,
    /// Traffic shape.
    pub traffic: TrafficShape,
    /// SLO targets.
    pub slo: Slo,
    /// Endpoints in profile order; may be empty.
    pub endpoints: Vec<Endpoint>,
    /// Downstream service names (informational only).
    pub dependencies: Vec<String>,
    /// Data-handling constraints.
    pub data: DataConstraints,
}

impl ServiceProfile {
    /// Endpoints flagged as business-critical, in profile order.
    pub fn critical_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter().filter(|e| e.critical)
    }
}

/// Validated traffic shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficShape {
    /// Normal-operation request rate; always positive.
    pub baseline_rps: f64,
    /// Expected peak request rate; always >= `baseline_rps`.
    pub peak_rps: f64,
    /// Burst multiplier; always >= 1.
    pub burst_factor: f64,
}

/// Validated SLO targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slo {
    /// Latency percentile targets in milliseconds.
    pub latency_ms: LatencyTargets,
    /// Acceptable error rate; always within `[0, 1]`.
    pub error_rate: f64,
}

/// Validated latency targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyTargets {
    /// 95th percentile target; always positive.
    pub p95: f64,
    /// 99th percentile target; always >= `p95`.
    pub p99: f64,
}

/// A validated endpoint entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Non-empty request path.
    pub path: String,
    /// Recognized HTTP method.
    pub method: HttpMethod,
    /// Whether the endpoint is business-critical.
    pub critical: bool,
}

/// Recognized HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        };
        f.write_str(name)
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(()),
        }
    }
}

/// Validated data-handling constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConstraints {
    /// Whether the service may touch production data.
    pub uses_production_data: bool,
    /// Free-text data-handling notes (empty when not provided).
    pub notes: String,
}

impl Default for DataConstraints {
    fn default() -> Self {
        Self {
            uses_production_data: false,
            notes: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validate a raw profile into a [`ServiceProfile`].
///
/// Pure function: collects every field problem across all blocks and fails
/// with the full list, so the caller can fix the input in one pass. On
/// success the returned profile has every default applied.
pub fn validate(raw: RawProfile) -> Result<ServiceProfile, ValidationError> {
    let mut problems = Vec::new();

    let service = match raw.service.as_deref() {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        Some(_) | None => {
            problems.push(FieldProblem::new(
                "service",
                "is required and must be a non-empty string",
            ));
            String::new()
        }
    };

    let traffic = validate_traffic(raw.traffic, &mut problems);
    let slo = validate_slo(raw.slo, &mut problems);
    let endpoints = validate_endpoints(&raw.endpoints, &mut problems);

    let data = raw
        .data
        .map(|d| DataConstraints {
            uses_production_data: d.uses_production_data.unwrap_or(false),
            notes: d.notes.unwrap_or_default(),
        })
        .unwrap_or_default();

    if !problems.is_empty() {
        return Err(ValidationError::new(problems));
    }

    Ok(ServiceProfile {
        service,
        summary: raw.summary.unwrap_or_default(),
        traffic,
        slo,
        endpoints,
        dependencies: raw.dependencies,
        data,
    })
}

fn validate_traffic(raw: Option<RawTraffic>, problems: &mut Vec<FieldProblem>) -> TrafficShape {
    let Some(raw) = raw else {
        problems.push(FieldProblem::new("traffic", "block is required"));
        return TrafficShape {
            baseline_rps: 0.0,
            peak_rps: 0.0,
            burst_factor: DEFAULT_BURST_FACTOR,
        };
    };

    let baseline = match raw.baseline_rps {
        Some(v) if v > 0.0 => v,
        Some(v) => {
            problems.push(FieldProblem::observed(
                "traffic.baseline_rps",
                "must be a positive number",
                v,
            ));
            0.0
        }
        None => {
            problems.push(FieldProblem::new("traffic.baseline_rps", "is required"));
            0.0
        }
    };

    let peak = match raw.peak_rps {
        Some(v) => {
            // Only meaningful to compare when the baseline itself was usable.
            if raw.baseline_rps.is_some() && v < baseline {
                problems.push(FieldProblem::observed(
                    "traffic.peak_rps",
                    format!("must be >= traffic.baseline_rps ({baseline})"),
                    v,
                ));
            }
            v
        }
        None => {
            problems.push(FieldProblem::new("traffic.peak_rps", "is required"));
            0.0
        }
    };

    let burst_factor = match raw.burst_factor {
        Some(v) if v >= 1.0 => v,
        Some(v) => {
            problems.push(FieldProblem::observed(
                "traffic.burst_factor",
                "must be >= 1",
                v,
            ));
            DEFAULT_BURST_FACTOR
        }
        None => DEFAULT_BURST_FACTOR,
    };

    TrafficShape {
        baseline_rps: baseline,
        peak_rps: peak,
        burst_factor,
    }
}

fn validate_slo(raw: Option<RawSlo>, problems: &mut Vec<FieldProblem>) -> Slo {
    let Some(raw) = raw else {
        problems.push(FieldProblem::new("slo", "block is required"));
        return Slo {
            latency_ms: LatencyTargets { p95: 0.0, p99: 0.0 },
            error_rate: DEFAULT_ERROR_RATE,
        };
    };

    let latency = raw.latency_ms.unwrap_or_else(|| {
        problems.push(FieldProblem::new("slo.latency_ms", "block is required"));
        RawLatency::default()
    });

    let p95 = match latency.p95 {
        Some(v) if v > 0.0 => v,
        Some(v) => {
            problems.push(FieldProblem::observed(
                "slo.latency_ms.p95",
                "must be a positive number",
                v,
            ));
            0.0
        }
        None => {
            problems.push(FieldProblem::new("slo.latency_ms.p95", "is required"));
            0.0
        }
    };

    let p99 = match latency.p99 {
        Some(v) => {
            if latency.p95.is_some() && v < p95 {
                problems.push(FieldProblem::observed(
                    "slo.latency_ms.p99",
                    format!("must be >= slo.latency_ms.p95 ({p95})"),
                    v,
                ));
            }
            v
        }
        None => {
            problems.push(FieldProblem::new("slo.latency_ms.p99", "is required"));
            0.0
        }
    };

    let error_rate = match raw.error_rate {
        Some(v) if (0.0..=1.0).contains(&v) => v,
        Some(v) => {
            problems.push(FieldProblem::observed(
                "slo.error_rate",
                "must be within [0, 1]",
                v,
            ));
            DEFAULT_ERROR_RATE
        }
        None => DEFAULT_ERROR_RATE,
    };

    Slo {
        latency_ms: LatencyTargets { p95, p99 },
        error_rate,
    }
}

fn validate_endpoints(raw: &[RawEndpoint], problems: &mut Vec<FieldProblem>) -> Vec<Endpoint> {
    let mut endpoints = Vec::with_capacity(raw.len());
    for (i, ep) in raw.iter().enumerate() {
        if ep.path.trim().is_empty() {
            problems.push(FieldProblem::new(
                format!("endpoints[{i}].path"),
                "is required and must be non-empty",
            ));
        }
        let method = match ep.method.as_deref() {
            None => HttpMethod::Get,
            Some(m) => match m.parse() {
                Ok(method) => method,
                Err(()) => {
                    problems.push(FieldProblem::observed(
                        format!("endpoints[{i}].method"),
                        "must be a recognized HTTP method",
                        m,
                    ));
                    HttpMethod::Get
                }
            },
        };
        endpoints.push(Endpoint {
            path: ep.path.clone(),
            method,
            critical: ep.critical.unwrap_or(false),
        });
    }
    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_checkout_profile() -> RawProfile {
        RawProfile {
            service: Some("checkout-api".to_string()),
            summary: Some("Order checkout flow".to_string()),
            traffic: Some(RawTraffic {
                baseline_rps: Some(50.0),
                peak_rps: Some(200.0),
                burst_factor: Some(3.0),
            }),
            slo: Some(RawSlo {
                latency_ms: Some(RawLatency {
                    p95: Some(400.0),
                    p99: Some(800.0),
                }),
                error_rate: Some(0.01),
            }),
            endpoints: vec![
                RawEndpoint {
                    path: "/checkout".to_string(),
                    method: Some("POST".to_string()),
                    critical: Some(true),
                },
                RawEndpoint {
                    path: "/cart".to_string(),
                    method: None,
                    critical: None,
                },
            ],
            dependencies: vec!["payments-service".to_string()],
            data: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        let profile = validate(raw_checkout_profile()).unwrap();
        assert_eq!(profile.service, "checkout-api");
        assert_eq!(profile.traffic.baseline_rps, 50.0);
        assert_eq!(profile.slo.latency_ms.p99, 800.0);
    }

    #[test]
    fn test_defaults_applied_once() {
        let profile = validate(raw_checkout_profile()).unwrap();
        // Absent method defaults to GET, absent critical to false, absent
        // data block to a fully-populated default.
        assert_eq!(profile.endpoints[1].method, HttpMethod::Get);
        assert!(!profile.endpoints[1].critical);
        assert!(!profile.data.uses_production_data);
        assert!(profile.data.notes.is_empty());
    }

    #[test]
    fn test_missing_service_rejected() {
        let mut raw = raw_checkout_profile();
        raw.service = Some("   ".to_string());
        let err = validate(raw).unwrap_err();
        assert!(err.problems.iter().any(|p| p.field == "service"));
    }

    #[test]
    fn test_all_range_violations_collected() {
        let mut raw = raw_checkout_profile();
        raw.traffic = Some(RawTraffic {
            baseline_rps: Some(100.0),
            peak_rps: Some(50.0),
            burst_factor: Some(0.5),
        });
        raw.slo = Some(RawSlo {
            latency_ms: Some(RawLatency {
                p95: Some(400.0),
                p99: Some(200.0),
            }),
            error_rate: Some(1.5),
        });
        let err = validate(raw).unwrap_err();
        let fields: Vec<&str> = err.problems.iter().map(|p| p.field.as_str()).collect();
        assert!(fields.contains(&"traffic.peak_rps"));
        assert!(fields.contains(&"traffic.burst_factor"));
        assert!(fields.contains(&"slo.latency_ms.p99"));
        assert!(fields.contains(&"slo.error_rate"));
        assert_eq!(err.problems.len(), 4);
    }

    #[test]
    fn test_zero_baseline_rejected() {
        let mut raw = raw_checkout_profile();
        raw.traffic = Some(RawTraffic {
            baseline_rps: Some(0.0),
            peak_rps: Some(10.0),
            burst_factor: None,
        });
        let err = validate(raw).unwrap_err();
        assert!(err.problems.iter().any(|p| p.field == "traffic.baseline_rps"));
    }

    #[test]
    fn test_missing_blocks_reported_together() {
        let raw = RawProfile::default();
        let err = validate(raw).unwrap_err();
        let fields: Vec<&str> = err.problems.iter().map(|p| p.field.as_str()).collect();
        assert!(fields.contains(&"service"));
        assert!(fields.contains(&"traffic"));
        assert!(fields.contains(&"slo"));
    }

    #[test]
    fn test_unrecognized_method_rejected() {
        let mut raw = raw_checkout_profile();
        raw.endpoints[0].method = Some("FETCH".to_string());
        let err = validate(raw).unwrap_err();
        let problem = err
            .problems
            .iter()
            .find(|p| p.field == "endpoints[0].method")
            .unwrap();
        assert_eq!(problem.observed.as_deref(), Some("FETCH"));
    }

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        let mut raw = raw_checkout_profile();
        raw.endpoints[0].method = Some("delete".to_string());
        let profile = validate(raw).unwrap();
        assert_eq!(profile.endpoints[0].method, HttpMethod::Delete);
    }

    #[test]
    fn test_empty_endpoint_path_rejected() {
        let mut raw = raw_checkout_profile();
        raw.endpoints.push(RawEndpoint::default());
        let err = validate(raw).unwrap_err();
        assert!(err.problems.iter().any(|p| p.field == "endpoints[2].path"));
    }

    #[test]
    fn test_zero_endpoints_is_valid() {
        let mut raw = raw_checkout_profile();
        raw.endpoints.clear();
        let profile = validate(raw).unwrap();
        assert!(profile.endpoints.is_empty());
    }

    #[test]
    fn test_burst_factor_defaults() {
        let mut raw = raw_checkout_profile();
        raw.traffic.as_mut().unwrap().burst_factor = None;
        let profile = validate(raw).unwrap();
        assert_eq!(profile.traffic.burst_factor, DEFAULT_BURST_FACTOR);
    }

    #[test]
    fn test_production_data_flag_validates_successfully() {
        let mut raw = raw_checkout_profile();
        raw.data = Some(RawData {
            uses_production_data: Some(true),
            notes: Some("read replicas only".to_string()),
        });
        let profile = validate(raw).unwrap();
        assert!(profile.data.uses_production_data);
        assert_eq!(profile.data.notes, "read replicas only");
    }

    #[test]
    fn test_critical_endpoints_iterator() {
        let profile = validate(raw_checkout_profile()).unwrap();
        let critical: Vec<&str> = profile
            .critical_endpoints()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(critical, vec!["/checkout"]);
    }
}
