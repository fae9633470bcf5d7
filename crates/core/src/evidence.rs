// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Append-only evidence event records.
//!
//! One event is appended per CLI invocation that requests logging. Events
//! are never mutated or removed once appended; append order is
//! chronological order. The log file mechanics live in `loadplan-storage`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// High-level outcome of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// A plan was generated; no interpretation ran.
    PlanGenerated,
    /// A plan was generated and the metrics interpretation did not fail.
    PlanAndInterpretationGenerated,
    /// The metrics interpretation failed at least one check.
    IssuesDetected,
}

/// A single audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEvent {
    /// When the invocation happened (UTC).
    pub ts: DateTime<Utc>,
    /// Service the plan was generated for.
    pub service: String,
    /// Path or identifier of the source profile.
    pub profile: String,
    /// Names of the scenarios that were generated.
    pub scenarios: Vec<String>,
    /// Whether a metrics interpretation also ran.
    pub interpretation: bool,
    /// High-level outcome label.
    pub outcome: Outcome,
}

impl EvidenceEvent {
    /// Build an event stamped with the current UTC time.
    pub fn new(
        service: impl Into<String>,
        profile: impl Into<String>,
        scenarios: Vec<String>,
        interpretation: bool,
        outcome: Outcome,
    ) -> Self {
        Self {
            ts: Utc::now(),
            service: service.into(),
            profile: profile.into(),
            scenarios,
            interpretation,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamped_on_creation() {
        let event = EvidenceEvent::new(
            "checkout-api",
            "profiles/checkout.yaml",
            vec!["steady".to_string(), "burst".to_string(), "soak".to_string()],
            false,
            Outcome::PlanGenerated,
        );
        assert!(event.ts <= Utc::now());
        assert_eq!(event.service, "checkout-api");
        assert!(!event.interpretation);
    }

    #[test]
    fn test_outcome_wire_names() {
        assert_eq!(
            serde_json::to_value(Outcome::PlanGenerated).unwrap(),
            "plan-generated"
        );
        assert_eq!(
            serde_json::to_value(Outcome::PlanAndInterpretationGenerated).unwrap(),
            "plan-and-interpretation-generated"
        );
        assert_eq!(
            serde_json::to_value(Outcome::IssuesDetected).unwrap(),
            "issues-detected"
        );
    }

    #[test]
    fn test_event_roundtrip() {
        let event = EvidenceEvent::new(
            "checkout-api",
            "profiles/checkout.yaml",
            vec!["steady".to_string()],
            true,
            Outcome::IssuesDetected,
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: EvidenceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
