// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core planning and interpretation logic for loadplan.
//!
//! This crate holds the three components that make up the pipeline:
//!
//! - [`profile`] - the validated service profile and the validator that
//!   produces it from raw parsed input.
//! - [`generator`] - derives a [`plan::LoadTestPlan`] (steady, burst, and
//!   soak scenarios with SLO-aligned checks) from a validated profile.
//! - [`interpreter`] - scores a [`metrics::MetricsSummary`] against the same
//!   SLO thresholds and produces a pass/fail/indeterminate verdict.
//!
//! Everything here is pure and synchronous: no file I/O, no network, no
//! shared state. File loading and the evidence log live in
//! `loadplan-storage`; the command surface lives in `loadplan-cli`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod evidence;
pub mod generator;
pub mod interpreter;
pub mod metrics;
pub mod plan;
pub mod policy;
pub mod profile;

pub use error::{FieldProblem, ValidationError};
pub use evidence::{EvidenceEvent, Outcome};
pub use generator::generate;
pub use interpreter::{interpret, Finding, InterpretationResult, Verdict};
pub use metrics::MetricsSummary;
pub use plan::{Check, CheckMetric, Comparator, LoadTestPlan, Scenario, ScenarioName, Stage, StagePhase};
pub use profile::{validate, RawProfile, ServiceProfile};
