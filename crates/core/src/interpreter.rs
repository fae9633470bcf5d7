// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metrics interpretation: score a summary against a profile's SLO
//! thresholds and produce a deterministic verdict.
//!
//! Interpretation is a pure evaluation over two immutable inputs. It never
//! fails: a missing observed value marks the dependent finding
//! `indeterminate`, and a summary with no usable fields yields an
//! `indeterminate` overall status rather than an error. Risk notes are
//! collected independently of the pass/fail status.

use crate::metrics::MetricsSummary;
use crate::plan::{slo_checks, CheckMetric};
use crate::policy;
use crate::profile::ServiceProfile;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Outcome of a single check or of the whole interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The check (or every evaluated check) held.
    Pass,
    /// The check (or at least one check) was violated.
    Fail,
    /// Not enough data to decide.
    Indeterminate,
}

/// One evaluated check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The metric that was checked.
    pub check: CheckMetric,
    /// The observed value, when the summary provided one.
    pub observed: Option<f64>,
    /// The SLO-derived threshold the observation was compared against.
    pub threshold: f64,
    /// Outcome for this check.
    pub result: Verdict,
}

/// The verdict produced by [`interpret`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    /// Aggregate status: `fail` if any check failed, `pass` if at least one
    /// evaluated and none failed, otherwise `indeterminate`.
    pub status: Verdict,
    /// Per-check findings, in plan-check order.
    pub findings: Vec<Finding>,
    /// Free-text risk notes, independent of `status`.
    pub risks: Vec<String>,
}

impl InterpretationResult {
    /// Render the deterministic narrative form of this result.
    ///
    /// The summary is passed back in so the narrative can report observed
    /// throughput, which is informational and never part of a check.
    pub fn narrative(&self, summary: &MetricsSummary) -> String {
        let mut out = String::new();
        match self.status {
            Verdict::Pass => out.push_str("All SLO checks passed."),
            Verdict::Fail => {
                let failed: Vec<&Finding> = self
                    .findings
                    .iter()
                    .filter(|f| f.result == Verdict::Fail)
                    .collect();
                let _ = write!(out, "SLO VIOLATION: {} check(s) failed.", failed.len());
                for finding in failed {
                    let _ = write!(
                        out,
                        "\n  - {}: observed {} (threshold {})",
                        finding.check,
                        finding.observed.unwrap_or_default(),
                        finding.threshold
                    );
                }
            }
            Verdict::Indeterminate => {
                out.push_str("Not enough metrics were provided to evaluate any SLO check.")
            }
        }

        let skipped = self
            .findings
            .iter()
            .filter(|f| f.result == Verdict::Indeterminate)
            .count();
        if skipped > 0 && self.status != Verdict::Indeterminate {
            let _ = write!(out, "\n{skipped} check(s) could not be evaluated.");
        }

        if let Some(throughput) = summary.throughput_rps {
            let _ = write!(out, "\nObserved throughput: {throughput} rps");
        }

        if !self.risks.is_empty() {
            out.push_str("\nRisks:");
            for risk in &self.risks {
                let _ = write!(out, "\n  - {risk}");
            }
        }

        out
    }
}

/// Evaluate a metrics summary against a profile's SLO thresholds.
///
/// The checks evaluated are exactly the SLO-derived checks a generated plan
/// carries ([`slo_checks`]): `latency-p95`, `latency-p99`, and `error-rate`,
/// each compared with the check's own comparator.
pub fn interpret(profile: &ServiceProfile, summary: &MetricsSummary) -> InterpretationResult {
    let mut findings = Vec::new();
    for check in slo_checks(&profile.slo) {
        let observed = observed_value(check.metric, summary);
        let result = match observed {
            Some(value) if check.comparator.holds(value, check.threshold) => Verdict::Pass,
            Some(_) => Verdict::Fail,
            None => Verdict::Indeterminate,
        };
        findings.push(Finding {
            check: check.metric,
            observed,
            threshold: check.threshold,
            result,
        });
    }

    let any_fail = findings.iter().any(|f| f.result == Verdict::Fail);
    let any_evaluated = findings.iter().any(|f| f.result != Verdict::Indeterminate);
    let status = if any_fail {
        Verdict::Fail
    } else if any_evaluated {
        Verdict::Pass
    } else {
        Verdict::Indeterminate
    };

    let risks = collect_risks(profile, summary, &findings);

    InterpretationResult {
        status,
        findings,
        risks,
    }
}

fn observed_value(metric: CheckMetric, summary: &MetricsSummary) -> Option<f64> {
    match metric {
        CheckMetric::LatencyP95 => summary.p95_ms,
        CheckMetric::LatencyP99 => summary.p99_ms,
        CheckMetric::ErrorRate => summary.error_rate,
    }
}

/// Near-threshold margin for a metric. The p99 tail gets the wider band; see
/// `policy` for the pinned values.
fn near_margin(metric: CheckMetric) -> f64 {
    match metric {
        CheckMetric::LatencyP99 => policy::NEAR_THRESHOLD_MARGIN_P99,
        _ => policy::NEAR_THRESHOLD_MARGIN,
    }
}

fn collect_risks(
    profile: &ServiceProfile,
    summary: &MetricsSummary,
    findings: &[Finding],
) -> Vec<String> {
    let mut risks = Vec::new();

    for finding in findings.iter().filter(|f| f.result == Verdict::Pass) {
        let Some(observed) = finding.observed else {
            continue;
        };
        let margin = near_margin(finding.check);
        if observed >= finding.threshold * (1.0 - margin) {
            risks.push(format!(
                "near-threshold: {} at {observed} is within {:.0}% of its {} threshold",
                finding.check,
                margin * 100.0,
                finding.threshold
            ));
        }
    }

    if let Some(error_rate) = summary.error_rate {
        let budget = profile.slo.error_rate;
        if error_rate <= budget && error_rate > budget * policy::ERROR_BUDGET_RISK_FRACTION {
            risks.push(format!(
                "elevated error rate: {error_rate} consumes more than half of the {budget} \
                 error budget"
            ));
        }
    }

    if let Some(cpu) = summary.cpu_percent {
        if cpu > policy::SATURATION_RISK_PCT {
            risks.push(format!("high CPU utilization: {cpu}%"));
        }
    }
    if let Some(memory) = summary.memory_percent {
        if memory > policy::SATURATION_RISK_PCT {
            risks.push(format!("high memory utilization: {memory}%"));
        }
    }

    risks
}
