// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed policy constants for plan generation and risk detection.
//!
//! These values are pinned so that generation stays deterministic and the
//! reference scenarios in the test suite have exact expectations. Changing
//! any of these changes generated plans for every profile.

/// Minimum ramp-up (and ramp-down) duration in seconds.
pub const RAMP_FLOOR_SECS: u64 = 30;

/// Maximum ramp-up (and ramp-down) duration in seconds. Keeps the hold stage
/// the longest stage of every scenario regardless of target rate.
pub const RAMP_CAP_SECS: u64 = 120;

/// Ramp steepness: request rate gained per second of ramp-up.
///
/// Ramp duration is `ceil(target_rps / RAMP_RPS_PER_SEC)` clamped to
/// `[RAMP_FLOOR_SECS, RAMP_CAP_SECS]`.
pub const RAMP_RPS_PER_SEC: f64 = 5.0;

/// Steady-scenario hold duration in seconds.
pub const STEADY_HOLD_SECS: u64 = 300;

/// Burst-scenario ramp-up duration in seconds. Kept short so the spike
/// arrives abruptly.
pub const BURST_RAMP_SECS: u64 = 30;

/// Burst-scenario hold duration in seconds.
pub const BURST_HOLD_SECS: u64 = 90;

/// Cap on the burst hold target, expressed as a multiple of `peak_rps`.
///
/// Burst hold target = `min(peak_rps * burst_factor, BURST_CAP_FACTOR * peak_rps)`.
/// When the cap bites, the burst scenario description states the capped
/// value.
pub const BURST_CAP_FACTOR: f64 = 5.0;

/// Relaxation factor applied to the error-rate threshold during burst.
///
/// Spikes are expected to stress error budgets; the relaxed threshold is
/// clamped to 1.0 and always carried with an explicit note on the check.
pub const BURST_ERROR_RELAX_FACTOR: f64 = 2.0;

/// Soak-scenario hold duration in seconds.
pub const SOAK_HOLD_SECS: u64 = 1800;

/// Near-threshold risk margin for `latency-p95` and `error-rate`: a passing
/// check whose observed value is within this fraction of its threshold
/// (inclusive) is flagged as a risk.
pub const NEAR_THRESHOLD_MARGIN: f64 = 0.10;

/// Near-threshold risk margin for `latency-p99`. The tail percentile gets a
/// wider early-warning band than p95.
pub const NEAR_THRESHOLD_MARGIN_P99: f64 = 0.15;

/// Fraction of the error-rate SLO above which an otherwise-passing error
/// rate is flagged as consuming too much of the error budget (strict).
pub const ERROR_BUDGET_RISK_FRACTION: f64 = 0.5;

/// CPU/memory utilization percentage above which a saturation risk is
/// flagged (strict).
pub const SATURATION_RISK_PCT: f64 = 80.0;

/// Ramp-up duration for a given target rate, in seconds.
pub fn ramp_seconds(target_rps: f64) -> u64 {
    let proportional = (target_rps / RAMP_RPS_PER_SEC).ceil() as u64;
    proportional.clamp(RAMP_FLOOR_SECS, RAMP_CAP_SECS)
}
