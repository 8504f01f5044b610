//! Core types and data structures for the reconciliation engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation finding
///
/// Severities form a fixed total order: `Info < Warning < Critical`.
/// Critical findings block sign-off, Warnings require review, Info findings
/// are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Advisory - never affects the overall outcome
    Info,
    /// Requires review, does not block sign-off by default
    Warning,
    /// Blocks sign-off
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// Overall outcome of a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallStatus {
    /// No blocking findings
    Pass,
    /// At least one blocking finding exists
    Fail,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Pass => write!(f, "Pass"),
            OverallStatus::Fail => write!(f, "Fail"),
        }
    }
}

/// One rule violation discovered by a check
///
/// A finding is produced by exactly one check and is immutable afterwards.
/// The aggregator only collects findings; it never merges or rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable error code, e.g. `BAL-001`
    pub code: String,
    /// Severity of the violation
    pub severity: Severity,
    /// Human-readable message carrying the exact values that triggered it
    pub message: String,
    /// Transaction IDs this finding applies to, in input order, deduplicated
    pub record_ids: Vec<String>,
}

impl Finding {
    /// Create a finding for a single record
    pub fn for_record(code: &str, severity: Severity, message: String, record_id: &str) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message,
            record_ids: vec![record_id.to_string()],
        }
    }

    /// Create a finding spanning multiple records
    pub fn for_records(
        code: &str,
        severity: Severity,
        message: String,
        record_ids: Vec<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message,
            record_ids,
        }
    }
}

/// Errors that can occur in the reconciliation engine
///
/// These are structural failures only: the input could not be interpreted as
/// the required table shape, so no record set exists to validate. Rule
/// violations in well-formed input are never errors - they are [`Finding`]s.
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("required column '{0}' is missing from the input table")]
    MissingColumn(String),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_total_order() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(
            [Severity::Warning, Severity::Info, Severity::Critical]
                .iter()
                .max(),
            Some(&Severity::Critical)
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
        assert_eq!(Severity::Warning.to_string(), "Warning");
        assert_eq!(Severity::Info.to_string(), "Info");
    }

    #[test]
    fn test_structural_error_messages() {
        let err = ReconError::MissingColumn("Debit".to_string());
        assert_eq!(
            err.to_string(),
            "required column 'Debit' is missing from the input table"
        );

        let err = ReconError::RaggedRow {
            row: 3,
            expected: 6,
            found: 4,
        };
        assert_eq!(err.to_string(), "row 3 has 4 cells, expected 6");
    }
}
