// Copyright 2025 Loadplan Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation error types.
//!
//! Validation collects every field-level problem before failing, so a caller
//! sees the complete list of constraint violations in one pass rather than
//! fixing them one re-run at a time.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProblem {
    /// Dotted path of the offending field, e.g. `traffic.peak_rps`.
    pub field: String,
    /// The constraint that was violated, in plain language.
    pub constraint: String,
    /// The observed value, when one was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,
}

impl FieldProblem {
    /// Create a problem for a field with no usable observed value.
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            observed: None,
        }
    }

    /// Create a problem that records the observed value.
    pub fn observed(
        field: impl Into<String>,
        constraint: impl Into<String>,
        observed: impl fmt::Display,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            observed: Some(observed.to_string()),
        }
    }
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.observed {
            Some(observed) => {
                write!(f, "{}: {} (observed: {})", self.field, self.constraint, observed)
            }
            None => write!(f, "{}: {}", self.field, self.constraint),
        }
    }
}

/// Raised when a raw profile violates one or more schema or range rules.
///
/// Carries the full collected list of [`FieldProblem`]s, never just the
/// first.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("profile validation failed:{}", format_problems(.problems))]
pub struct ValidationError {
    /// Every constraint violation found, in field order.
    pub problems: Vec<FieldProblem>,
}

impl ValidationError {
    /// Wrap a non-empty list of problems.
    pub fn new(problems: Vec<FieldProblem>) -> Self {
        Self { problems }
    }
}

fn format_problems(problems: &[FieldProblem]) -> String {
    let mut out = String::new();
    for problem in problems {
        out.push_str("\n  - ");
        out.push_str(&problem.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_problem_display_with_observed() {
        let problem = FieldProblem::observed("traffic.peak_rps", "must be >= baseline_rps", 10);
        assert_eq!(
            problem.to_string(),
            "traffic.peak_rps: must be >= baseline_rps (observed: 10)"
        );
    }

    #[test]
    fn test_field_problem_display_without_observed() {
        let problem = FieldProblem::new("service", "is required and must be non-empty");
        assert_eq!(problem.to_string(), "service: is required and must be non-empty");
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = ValidationError::new(vec![
            FieldProblem::new("service", "is required"),
            FieldProblem::observed("slo.error_rate", "must be within [0, 1]", 1.5),
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("service: is required"));
        assert!(rendered.contains("slo.error_rate"));
        assert!(rendered.contains("1.5"));
    }
}
