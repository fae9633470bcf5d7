// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plan generation: derive steady, burst, and soak scenarios from a
//! validated service profile.
//!
//! Generation is a total function over validated profiles - it never fails
//! and never re-validates. It is also deterministic: there are no randomized
//! elements, so the same profile always produces a byte-identical plan. Any
//! future randomized element (e.g. stage jitter) must take an explicit seed
//! and record it on the evidence event.

use crate::plan::{slo_checks, Check, CheckMetric, LoadTestPlan, Scenario, ScenarioName, Stage, StagePhase};
use crate::policy;
use crate::profile::ServiceProfile;

/// Generate a load test plan from a validated profile.
///
/// Scenarios are always `steady`, `burst`, `soak`, in that order. Every
/// check threshold traces back to the profile's SLO block; the only
/// deviation is the burst error-rate relaxation, which is documented on the
/// check itself.
pub fn generate(profile: &ServiceProfile) -> LoadTestPlan {
    LoadTestPlan {
        service: profile.service.clone(),
        scenarios: vec![
            steady_scenario(profile),
            burst_scenario(profile),
            soak_scenario(profile),
        ],
        safety_notes: safety_notes(profile),
    }
}

fn steady_scenario(profile: &ServiceProfile) -> Scenario {
    let baseline = profile.traffic.baseline_rps;
    let ramp = policy::ramp_seconds(baseline);
    Scenario {
        name: ScenarioName::Steady,
        description: format!(
            "Sustain baseline traffic at {baseline} rps for {} seconds to validate \
             normal-operation SLOs.",
            policy::STEADY_HOLD_SECS
        ),
        stages: vec![
            Stage {
                phase: StagePhase::RampUp,
                duration_seconds: ramp,
                target_rps: baseline,
            },
            Stage {
                phase: StagePhase::Hold,
                duration_seconds: policy::STEADY_HOLD_SECS,
                target_rps: baseline,
            },
            Stage {
                phase: StagePhase::RampDown,
                duration_seconds: ramp,
                target_rps: 0.0,
            },
        ],
        checks: slo_checks(&profile.slo),
        metrics_to_watch: watch_list(profile, &[]),
    }
}

fn burst_scenario(profile: &ServiceProfile) -> Scenario {
    let peak = profile.traffic.peak_rps;
    let requested = peak * profile.traffic.burst_factor;
    let cap = policy::BURST_CAP_FACTOR * peak;
    let target = requested.min(cap);

    let description = if requested > cap {
        format!(
            "Spike to {target} rps for {} seconds (requested {requested} rps, capped at \
             {}x peak) to validate survival of sudden demand beyond steady peak.",
            policy::BURST_HOLD_SECS,
            policy::BURST_CAP_FACTOR
        )
    } else {
        format!(
            "Spike to {target} rps ({peak} rps peak x {} burst factor) for {} seconds to \
             validate survival of sudden demand beyond steady peak.",
            profile.traffic.burst_factor,
            policy::BURST_HOLD_SECS
        )
    };

    Scenario {
        name: ScenarioName::Burst,
        description,
        stages: vec![
            Stage {
                phase: StagePhase::RampUp,
                duration_seconds: policy::BURST_RAMP_SECS,
                target_rps: peak,
            },
            Stage {
                phase: StagePhase::Hold,
                duration_seconds: policy::BURST_HOLD_SECS,
                target_rps: target,
            },
            Stage {
                phase: StagePhase::RampDown,
                duration_seconds: policy::BURST_RAMP_SECS,
                target_rps: 0.0,
            },
        ],
        checks: burst_checks(profile),
        metrics_to_watch: watch_list(profile, &["error-class-breakdown"]),
    }
}

fn soak_scenario(profile: &ServiceProfile) -> Scenario {
    let baseline = profile.traffic.baseline_rps;
    let ramp = policy::ramp_seconds(baseline);
    Scenario {
        name: ScenarioName::Soak,
        description: format!(
            "Hold {baseline} rps for {} seconds to surface slow leaks, connection \
             exhaustion, and resource saturation that short runs miss.",
            policy::SOAK_HOLD_SECS
        ),
        stages: vec![
            Stage {
                phase: StagePhase::RampUp,
                duration_seconds: ramp,
                target_rps: baseline,
            },
            Stage {
                phase: StagePhase::Hold,
                duration_seconds: policy::SOAK_HOLD_SECS,
                target_rps: baseline,
            },
            Stage {
                phase: StagePhase::RampDown,
                duration_seconds: ramp,
                target_rps: 0.0,
            },
        ],
        checks: slo_checks(&profile.slo),
        // Saturation indicators are always watched during soak, whether or
        // not the profile provides a signal for them.
        metrics_to_watch: watch_list(profile, &["cpu-percent", "memory-percent", "queue-depth"]),
    }
}

/// Burst checks: identical to the SLO checks except that the error-rate
/// threshold is relaxed by [`policy::BURST_ERROR_RELAX_FACTOR`] (clamped to
/// 1.0), with the relaxation stated explicitly on the check.
fn burst_checks(profile: &ServiceProfile) -> Vec<Check> {
    slo_checks(&profile.slo)
        .into_iter()
        .map(|check| {
            if check.metric == CheckMetric::ErrorRate {
                let relaxed = (check.threshold * policy::BURST_ERROR_RELAX_FACTOR).min(1.0);
                Check {
                    threshold: relaxed,
                    note: Some(format!(
                        "relaxed from the {} SLO by a factor of {} for burst traffic",
                        check.threshold,
                        policy::BURST_ERROR_RELAX_FACTOR
                    )),
                    ..check
                }
            } else {
                check
            }
        })
        .collect()
}

const BASE_WATCH: [&str; 6] = [
    "latency-p50",
    "latency-p90",
    "latency-p95",
    "latency-p99",
    "error-rate",
    "throughput-rps",
];

/// Service-level watch metrics, scenario extras, then one latency entry per
/// critical endpoint in profile order. With zero endpoints the list stays
/// service-level.
fn watch_list(profile: &ServiceProfile, extras: &[&str]) -> Vec<String> {
    let mut watch: Vec<String> = BASE_WATCH.iter().map(|m| m.to_string()).collect();
    watch.extend(extras.iter().map(|m| m.to_string()));
    for endpoint in profile.critical_endpoints() {
        watch.push(format!("{} {} latency", endpoint.method, endpoint.path));
    }
    watch
}

fn safety_notes(profile: &ServiceProfile) -> Vec<String> {
    let mut notes = Vec::new();

    if profile.data.uses_production_data {
        notes.push(
            "HIGH SEVERITY: the profile declares production data in use. Mask or \
             tokenize PII before any scenario runs and never replay raw production \
             payloads against this service."
                .to_string(),
        );
    } else {
        notes.push(
            "Use synthetic or anonymized test data only; do not point load generators \
             at production data stores."
                .to_string(),
        );
    }

    if !profile.data.notes.is_empty() {
        notes.push(format!("Data handling: {}", profile.data.notes));
    }

    let deps = if profile.dependencies.is_empty() {
        "none listed".to_string()
    } else {
        profile.dependencies.join(", ")
    };
    notes.push(format!(
        "Run against an isolated environment; downstream dependencies ({deps}) should \
         be stubbed or provisioned in test mode."
    ));

    let critical: Vec<String> = profile
        .critical_endpoints()
        .map(|e| format!("{} {}", e.method, e.path))
        .collect();
    if !critical.is_empty() {
        notes.push(format!(
            "Critical endpoints ({}) mutate state under load; isolate their backing \
             stores and clean up generated records after each scenario.",
            critical.join(", ")
        ));
    }

    notes
}
