//! Report model: immutable output of a reconciliation run
//!
//! The report is plain data plus read-only views. External renderers (tabular
//! annotation writers, narrative report writers) consume it as-is; nothing
//! here mutates after construction, so the report is safe to share across
//! concurrent consumers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::types::{Finding, OverallStatus, Severity};

/// Complete result of validating one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Number of input rows
    pub total_records: usize,
    /// Record IDs in original input order, for joining findings back to rows
    pub record_ids: Vec<String>,
    /// Every finding from every check, in check-declaration order, then by
    /// first referenced record, then by discovery order within the check
    pub findings: Vec<Finding>,
    /// Finding counts per severity; all three severities are always present
    pub severity_counts: BTreeMap<Severity, usize>,
    /// Overall pass/fail outcome
    pub overall_status: OverallStatus,
}

/// Annotation for one original row, for tabular rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAnnotation {
    /// The row's transaction ID
    pub record_id: String,
    /// Worst severity touching this row, `None` when the row is clean
    pub severity: Option<Severity>,
    /// Error codes of every finding referencing this row, in finding order
    pub codes: Vec<String>,
    /// Full messages aligned with `codes`
    pub messages: Vec<String>,
}

/// Per-check summary line, for the narrative breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Stable error code
    pub code: String,
    /// Severity of the code
    pub severity: Severity,
    /// Number of findings carrying the code
    pub finding_count: usize,
    /// Number of distinct records those findings reference
    pub record_count: usize,
}

impl ReconciliationReport {
    /// Assemble a report; only the aggregator constructs reports
    pub(crate) fn new(
        record_ids: Vec<String>,
        findings: Vec<Finding>,
        overall_status: OverallStatus,
    ) -> Self {
        let mut severity_counts = BTreeMap::new();
        severity_counts.insert(Severity::Info, 0);
        severity_counts.insert(Severity::Warning, 0);
        severity_counts.insert(Severity::Critical, 0);
        for finding in &findings {
            *severity_counts.entry(finding.severity).or_insert(0) += 1;
        }

        Self {
            total_records: record_ids.len(),
            record_ids,
            findings,
            severity_counts,
            overall_status,
        }
    }

    /// Whether the batch passed overall
    pub fn is_pass(&self) -> bool {
        self.overall_status == OverallStatus::Pass
    }

    /// Finding count at a given severity
    pub fn count_at(&self, severity: Severity) -> usize {
        self.severity_counts.get(&severity).copied().unwrap_or(0)
    }

    /// All findings referencing a given record, in report order
    pub fn findings_for(&self, record_id: &str) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.record_ids.iter().any(|id| id == record_id))
            .collect()
    }

    /// One annotation per original row, in input order
    ///
    /// A finding spanning several records appears on each of its rows, so a
    /// tabular renderer can annotate every affected row by joining on the ID.
    pub fn row_annotations(&self) -> Vec<RowAnnotation> {
        self.record_ids
            .iter()
            .map(|record_id| {
                let findings = self.findings_for(record_id);
                RowAnnotation {
                    record_id: record_id.clone(),
                    severity: findings.iter().map(|f| f.severity).max(),
                    codes: findings.iter().map(|f| f.code.clone()).collect(),
                    messages: findings.iter().map(|f| f.message.clone()).collect(),
                }
            })
            .collect()
    }

    /// One summary per error code with at least one finding, in order of
    /// first appearance (which is check-declaration order)
    pub fn check_breakdown(&self) -> Vec<CheckSummary> {
        let mut summaries: Vec<CheckSummary> = Vec::new();
        let mut touched: Vec<HashSet<&str>> = Vec::new();
        for finding in &self.findings {
            let slot = match summaries.iter().position(|s| s.code == finding.code) {
                Some(slot) => slot,
                None => {
                    summaries.push(CheckSummary {
                        code: finding.code.clone(),
                        severity: finding.severity,
                        finding_count: 0,
                        record_count: 0,
                    });
                    touched.push(HashSet::new());
                    summaries.len() - 1
                }
            };
            summaries[slot].finding_count += 1;
            for id in &finding.record_ids {
                touched[slot].insert(id.as_str());
            }
        }
        for (summary, ids) in summaries.iter_mut().zip(&touched) {
            summary.record_count = ids.len();
        }
        summaries
    }
}
