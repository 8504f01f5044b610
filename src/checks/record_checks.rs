//! Per-record checks: account code, date, amount, and description rules

use bigdecimal::BigDecimal;

use crate::checks::Check;
use crate::record::{DateField, TransactionRecord};
use crate::types::{Finding, Severity};

/// A record's account code is either missing (ACC-001) or present; only a
/// present code is subject to the format rule (ACC-002). The two codes are
/// mutually exclusive per record.
fn account_code_missing(record: &TransactionRecord) -> bool {
    record.account_code.trim().is_empty()
}

/// Missing account code (ACC-001)
///
/// Fires when the account code is empty or whitespace-only. The trim here is
/// for the check only; the stored value stays raw.
pub struct MissingAccountCodeCheck;

impl Check for MissingAccountCodeCheck {
    fn code(&self) -> &'static str {
        "ACC-001"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn description(&self) -> &'static str {
        "Every record must carry an account code"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        batch
            .iter()
            .filter(|record| account_code_missing(record))
            .map(|record| {
                Finding::for_record(
                    self.code(),
                    self.severity(),
                    format!("Account code is missing or blank (found {:?})", record.account_code),
                    &record.id,
                )
            })
            .collect()
    }
}

/// Account code format (ACC-002)
///
/// Fires when a present account code is not exactly 4 characters or contains
/// a non-digit. The raw value is examined, whitespace included, so a padded
/// code like `" 1234"` is malformed. Never fires on a record ACC-001 already
/// covers.
pub struct AccountCodeFormatCheck;

impl Check for AccountCodeFormatCheck {
    fn code(&self) -> &'static str {
        "ACC-002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Account codes must be exactly 4 digits"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        batch
            .iter()
            .filter(|record| !account_code_missing(record))
            .filter(|record| {
                record.account_code.chars().count() != 4
                    || record.account_code.chars().any(|c| !c.is_ascii_digit())
            })
            .map(|record| {
                Finding::for_record(
                    self.code(),
                    self.severity(),
                    format!("Account code {:?} must be exactly 4 digits", record.account_code),
                    &record.id,
                )
            })
            .collect()
    }
}

/// Date validation (DATE-001)
pub struct DateValidityCheck;

impl Check for DateValidityCheck {
    fn code(&self) -> &'static str {
        "DATE-001"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn description(&self) -> &'static str {
        "Every record must carry a parseable calendar date"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        batch
            .iter()
            .filter_map(|record| match &record.date {
                DateField::Parsed(_) => None,
                DateField::Unparseable(raw) => Some(Finding::for_record(
                    self.code(),
                    self.severity(),
                    format!("Date {:?} could not be parsed as a calendar date", raw),
                    &record.id,
                )),
            })
            .collect()
    }
}

/// Negative value detection (VAL-001)
///
/// One finding per offending column: a record with both columns negative
/// produces two findings, each naming its column.
pub struct NegativeAmountCheck;

impl Check for NegativeAmountCheck {
    fn code(&self) -> &'static str {
        "VAL-001"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Debit and credit amounts must not be negative"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        let zero = BigDecimal::from(0);
        let mut findings = Vec::new();
        for record in batch {
            for (column, amount) in [("Debit", &record.debit), ("Credit", &record.credit)] {
                if let Some(value) = amount.value() {
                    if *value < zero {
                        findings.push(Finding::for_record(
                            self.code(),
                            self.severity(),
                            format!("{} amount {} is negative", column, value),
                            &record.id,
                        ));
                    }
                }
            }
        }
        findings
    }
}

/// Zero amount (VAL-002)
///
/// Fires only when both amounts parsed as numeric and both are exactly zero;
/// a missing or unparseable amount is not a zero.
pub struct ZeroAmountCheck;

impl Check for ZeroAmountCheck {
    fn code(&self) -> &'static str {
        "VAL-002"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &'static str {
        "Records should not carry a zero debit and a zero credit"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        let zero = BigDecimal::from(0);
        batch
            .iter()
            .filter(|record| {
                matches!(
                    (record.debit.value(), record.credit.value()),
                    (Some(debit), Some(credit)) if *debit == zero && *credit == zero
                )
            })
            .map(|record| {
                Finding::for_record(
                    self.code(),
                    self.severity(),
                    "Both debit and credit are 0.00".to_string(),
                    &record.id,
                )
            })
            .collect()
    }
}

/// Missing description (DESC-001)
pub struct MissingDescriptionCheck;

impl Check for MissingDescriptionCheck {
    fn code(&self) -> &'static str {
        "DESC-001"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &'static str {
        "Every record should carry a description"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        batch
            .iter()
            .filter(|record| record.description.trim().is_empty())
            .map(|record| {
                Finding::for_record(
                    self.code(),
                    self.severity(),
                    "Description is empty or whitespace-only".to_string(),
                    &record.id,
                )
            })
            .collect()
    }
}
