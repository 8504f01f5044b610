//! Balance verification (BAL-001)

use bigdecimal::BigDecimal;

use crate::checks::{group_by_key, Check};
use crate::record::{DateField, TransactionRecord};
use crate::types::{Finding, Severity};

/// Verifies that debits and credits sum equal within each exact
/// `(Description, Date)` group
///
/// Sums use exact decimal arithmetic over the scale-2 parsed amounts;
/// "balanced" means equal to the cent. Amounts in the invalid sentinel state
/// contribute nothing to either sum. The grouping key is exact: unparseable
/// dates group by their raw text, descriptions are not normalized.
pub struct BalanceCheck;

impl Check for BalanceCheck {
    fn code(&self) -> &'static str {
        "BAL-001"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn description(&self) -> &'static str {
        "Debits and credits must balance within each (description, date) group"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        let groups = group_by_key(batch, |record| {
            (record.description.clone(), record.date.clone())
        });

        let mut findings = Vec::new();
        for ((description, date), members) in groups {
            let debit_total: BigDecimal = members
                .iter()
                .filter_map(|record| record.debit.value())
                .sum();
            let credit_total: BigDecimal = members
                .iter()
                .filter_map(|record| record.credit.value())
                .sum();

            if debit_total != credit_total {
                let record_ids = members.iter().map(|record| record.id.clone()).collect();
                findings.push(Finding::for_records(
                    self.code(),
                    self.severity(),
                    format!(
                        "Debits total {} but credits total {} for '{}' on {}",
                        debit_total.with_scale(2),
                        credit_total.with_scale(2),
                        description,
                        date_label(&date),
                    ),
                    record_ids,
                ));
            }
        }
        findings
    }
}

fn date_label(date: &DateField) -> String {
    match date {
        DateField::Parsed(_) => date.to_string(),
        DateField::Unparseable(raw) => format!("'{}'", raw),
    }
}
