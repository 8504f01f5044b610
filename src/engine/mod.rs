//! Aggregator: runs the check suite and assembles the report
//!
//! The engine processes one batch synchronously to completion. It holds no
//! resources beyond in-memory immutable data for the duration of one call,
//! and identical input always yields a byte-identical findings sequence.

use std::collections::HashSet;

use crate::checks::{standard_checks, Check};
use crate::record::{RawTable, TransactionRecord};
use crate::report::ReconciliationReport;
use crate::types::{Finding, OverallStatus, ReconResult, Severity};

/// Which severities flip the overall outcome to `Fail`
///
/// The default matches the business definition: only Critical findings block
/// sign-off. The stricter policy is an explicit opt-in, never a hidden
/// default. Info findings never block under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// `Pass` iff there are zero Critical findings
    #[default]
    CriticalBlocks,
    /// Warnings also fail the batch
    WarningBlocks,
}

impl StatusPolicy {
    /// Whether a finding at this severity blocks an overall `Pass`
    pub fn blocks(&self, severity: Severity) -> bool {
        match self {
            StatusPolicy::CriticalBlocks => severity == Severity::Critical,
            StatusPolicy::WarningBlocks => severity >= Severity::Warning,
        }
    }
}

/// The reconciliation engine: eight checks plus deterministic aggregation
pub struct ReconciliationEngine {
    checks: Vec<Box<dyn Check>>,
    policy: StatusPolicy,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Create an engine with the standard checks and the default policy
    pub fn new() -> Self {
        Self::with_policy(StatusPolicy::default())
    }

    /// Create an engine with an explicit pass/fail policy
    pub fn with_policy(policy: StatusPolicy) -> Self {
        Self {
            checks: standard_checks(),
            policy,
        }
    }

    /// Validate a raw table end to end
    ///
    /// Structural validation runs first and fails fast: if the table cannot
    /// be interpreted as the required columns over rectangular rows, no check
    /// runs and no partial report exists.
    pub fn reconcile(&self, table: &RawTable) -> ReconResult<ReconciliationReport> {
        let records = table.parse()?;
        Ok(self.reconcile_records(&records))
    }

    /// Validate an already-typed batch
    ///
    /// Checks run in fixed declaration order and their findings are
    /// concatenated untouched, so output ordering is reproducible for
    /// identical input.
    pub fn reconcile_records(&self, records: &[TransactionRecord]) -> ReconciliationReport {
        let mut findings: Vec<Finding> = Vec::new();
        for check in &self.checks {
            findings.extend(check.run(records));
        }

        debug_assert!(
            {
                let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
                findings
                    .iter()
                    .flat_map(|f| &f.record_ids)
                    .all(|id| known.contains(id.as_str()))
            },
            "a check referenced a record ID that is not in the batch"
        );

        let overall_status = if findings.iter().any(|f| self.policy.blocks(f.severity)) {
            OverallStatus::Fail
        } else {
            OverallStatus::Pass
        };

        let record_ids = records.iter().map(|r| r.id.clone()).collect();
        ReconciliationReport::new(record_ids, findings, overall_status)
    }
}
