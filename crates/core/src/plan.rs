// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Load test plan records: scenarios, stages, and SLO-derived checks.
//!
//! A plan is created fresh per invocation and is immutable once returned.
//! Nothing in here carries a timestamp, so serializing the same plan twice
//! yields byte-identical output.

use crate::profile::Slo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The top-level generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTestPlan {
    /// Service identifier, copied from the source profile.
    pub service: String,
    /// Exactly the three mandatory scenarios, in order: steady, burst, soak.
    pub scenarios: Vec<Scenario>,
    /// Data-handling and isolation guidance derived from the profile.
    pub safety_notes: Vec<String>,
}

impl LoadTestPlan {
    /// Serialize the plan as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Names of the generated scenarios, in plan order.
    pub fn scenario_names(&self) -> Vec<String> {
        self.scenarios.iter().map(|s| s.name.to_string()).collect()
    }
}

/// One named load stage-set within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: ScenarioName,
    /// What this scenario exists to validate.
    pub description: String,
    /// Ordered load stages.
    pub stages: Vec<Stage>,
    /// SLO-derived pass/fail checks for this scenario.
    pub checks: Vec<Check>,
    /// Metric names worth watching while this scenario runs, in a fixed
    /// deterministic order.
    pub metrics_to_watch: Vec<String>,
}

/// The mandatory scenario names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioName {
    /// Sustained baseline traffic.
    Steady,
    /// Short spike beyond steady peak.
    Burst,
    /// Long-duration baseline run.
    Soak,
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Steady => "steady",
            Self::Burst => "burst",
            Self::Soak => "soak",
        };
        f.write_str(name)
    }
}

/// A time-bounded phase of a scenario with a target request rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Which phase of the scenario this stage is.
    pub phase: StagePhase,
    /// Stage length in seconds; always positive.
    pub duration_seconds: u64,
    /// Request rate to drive during this stage; non-negative.
    pub target_rps: f64,
}

/// Phases a stage can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StagePhase {
    /// Ramp from the previous rate up to the stage target.
    RampUp,
    /// Hold the stage target.
    Hold,
    /// Ramp back down to zero.
    RampDown,
}

/// A single SLO-derived pass/fail check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// The metric this check constrains.
    pub metric: CheckMetric,
    /// How the observed value is compared against the threshold.
    pub comparator: Comparator,
    /// The threshold, traceable to a value in the source profile's SLO.
    pub threshold: f64,
    /// Present only when the threshold deviates from the SLO value, e.g. the
    /// documented burst error-rate relaxation. Never silent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Metrics a check can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckMetric {
    /// 95th percentile latency in milliseconds.
    LatencyP95,
    /// 99th percentile latency in milliseconds.
    LatencyP99,
    /// Error rate as a fraction in `[0, 1]`.
    ErrorRate,
}

impl fmt::Display for CheckMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LatencyP95 => "latency-p95",
            Self::LatencyP99 => "latency-p99",
            Self::ErrorRate => "error-rate",
        };
        f.write_str(name)
    }
}

/// Comparison operator for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Observed value must be less than or equal to the threshold.
    #[serde(rename = "<=")]
    Le,
    /// Observed value must be strictly less than the threshold.
    #[serde(rename = "<")]
    Lt,
}

impl Comparator {
    /// Whether `observed` satisfies this comparator against `threshold`.
    pub fn holds(self, observed: f64, threshold: f64) -> bool {
        match self {
            Self::Le => observed <= threshold,
            Self::Lt => observed < threshold,
        }
    }
}

/// The three checks every scenario derives from a profile SLO, in plan order:
/// `latency-p95`, `latency-p99`, `error-rate`, all compared with `<=`.
///
/// Thresholds are the SLO values themselves; scenario-specific relaxations
/// (burst error-rate) are layered on top by the generator and carry a note.
pub fn slo_checks(slo: &Slo) -> Vec<Check> {
    vec![
        Check {
            metric: CheckMetric::LatencyP95,
            comparator: Comparator::Le,
            threshold: slo.latency_ms.p95,
            note: None,
        },
        Check {
            metric: CheckMetric::LatencyP99,
            comparator: Comparator::Le,
            threshold: slo.latency_ms.p99,
            note: None,
        },
        Check {
            metric: CheckMetric::ErrorRate,
            comparator: Comparator::Le,
            threshold: slo.error_rate,
            note: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LatencyTargets;

    fn slo() -> Slo {
        Slo {
            latency_ms: LatencyTargets {
                p95: 400.0,
                p99: 800.0,
            },
            error_rate: 0.01,
        }
    }

    #[test]
    fn test_slo_checks_order_and_thresholds() {
        let checks = slo_checks(&slo());
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].metric, CheckMetric::LatencyP95);
        assert_eq!(checks[0].threshold, 400.0);
        assert_eq!(checks[1].metric, CheckMetric::LatencyP99);
        assert_eq!(checks[1].threshold, 800.0);
        assert_eq!(checks[2].metric, CheckMetric::ErrorRate);
        assert_eq!(checks[2].threshold, 0.01);
        assert!(checks.iter().all(|c| c.comparator == Comparator::Le));
        assert!(checks.iter().all(|c| c.note.is_none()));
    }

    #[test]
    fn test_comparator_holds() {
        assert!(Comparator::Le.holds(1.0, 1.0));
        assert!(!Comparator::Lt.holds(1.0, 1.0));
        assert!(Comparator::Lt.holds(0.9, 1.0));
    }

    #[test]
    fn test_wire_names_are_kebab_case() {
        let check = Check {
            metric: CheckMetric::LatencyP95,
            comparator: Comparator::Le,
            threshold: 400.0,
            note: None,
        };
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["metric"], "latency-p95");
        assert_eq!(json["comparator"], "<=");
        // The note field is omitted entirely when absent.
        assert!(json.get("note").is_none());

        let phase = serde_json::to_value(StagePhase::RampUp).unwrap();
        assert_eq!(phase, "ramp-up");
    }

    #[test]
    fn test_scenario_name_display_matches_wire_form() {
        for name in [ScenarioName::Steady, ScenarioName::Burst, ScenarioName::Soak] {
            let wire = serde_json::to_value(name).unwrap();
            assert_eq!(wire, name.to_string());
        }
    }
}
