//! # Reconciliation Core
//!
//! A reconciliation engine for batches of double-entry transaction records:
//! eight independent validation checks, stable error codes, severity-ranked
//! findings, and a deterministic report model.
//!
//! ## Features
//!
//! - **Typed ingestion**: raw rows become immutable records with explicit
//!   unparseable-date and invalid-amount sentinels, never silent defaults
//! - **Exact money**: fixed-point decimal amounts rounded half-up to 2 places
//!   once at parse time; no floating point anywhere
//! - **Pure checks**: balance, duplicate, account code, date, amount, and
//!   description rules as independent, order-free, idempotent functions
//! - **Deterministic reports**: findings in fixed check order with severity
//!   counts, overall pass/fail, and read-only renderer views
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{RawTable, ReconciliationEngine};
//!
//! let table = RawTable {
//!     columns: ["Transaction ID", "Date", "Account Code", "Description", "Debit", "Credit"]
//!         .map(String::from)
//!         .to_vec(),
//!     rows: vec![
//!         ["T1", "2024-01-05", "1000", "Opening balance", "250.00", "0.00"]
//!             .map(String::from)
//!             .to_vec(),
//!         ["T2", "2024-01-05", "3000", "Opening balance", "0.00", "250.00"]
//!             .map(String::from)
//!             .to_vec(),
//!     ],
//! };
//!
//! let report = ReconciliationEngine::new().reconcile(&table).unwrap();
//! assert!(report.is_pass());
//! ```

pub mod checks;
pub mod engine;
pub mod record;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use checks::{standard_checks, Check};
pub use engine::{ReconciliationEngine, StatusPolicy};
pub use record::{AmountField, DateField, RawRow, RawTable, TransactionRecord};
pub use report::{CheckSummary, ReconciliationReport, RowAnnotation};
pub use types::{Finding, OverallStatus, ReconError, ReconResult, Severity};
