//! Duplicate detection (DUP-001)

use crate::checks::{group_by_key, Check};
use crate::record::{AmountField, TransactionRecord};
use crate::types::{Finding, Severity};

/// Flags sets of records sharing the exact
/// `(Date, Account Code, Description, Debit, Credit)` tuple
///
/// All records sharing a key form one duplicate set: three identical rows
/// yield a single finding with three IDs, never pairwise combinations.
pub struct DuplicateCheck;

impl Check for DuplicateCheck {
    fn code(&self) -> &'static str {
        "DUP-001"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Records must not repeat the same date, account code, description, and amounts"
    }

    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding> {
        let groups = group_by_key(batch, |record| {
            (
                record.date.clone(),
                record.account_code.clone(),
                record.description.clone(),
                amount_key(&record.debit),
                amount_key(&record.credit),
            )
        });

        let mut findings = Vec::new();
        for ((date, account_code, description, _, _), members) in groups {
            if members.len() < 2 {
                continue;
            }
            let record_ids: Vec<String> =
                members.iter().map(|record| record.id.clone()).collect();
            findings.push(Finding::for_records(
                self.code(),
                self.severity(),
                format!(
                    "{} identical records with date {}, account code '{}', description '{}'",
                    members.len(),
                    date,
                    account_code,
                    description,
                ),
                record_ids,
            ));
        }
        findings
    }
}

/// Canonical grouping key for an amount field
///
/// Parsed values are already at scale 2, so their display form is canonical;
/// sentinel values key on their raw text, prefixed so they can never collide
/// with a numeric rendering.
fn amount_key(amount: &AmountField) -> String {
    match amount {
        AmountField::Value(value) => value.to_string(),
        AmountField::Invalid(raw) => format!("?{}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::record;

    #[test]
    fn test_two_identical_records_form_one_set() {
        let batch = vec![
            record("T1", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
            record("T2", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
        ];

        let findings = DuplicateCheck.run(&batch);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].record_ids, vec!["T1", "T2"]);
        assert!(findings[0].message.starts_with("2 identical records"));
    }

    #[test]
    fn test_three_identical_records_are_one_set_not_pairs() {
        let batch = vec![
            record("T1", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
            record("T2", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
            record("T3", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
        ];

        let findings = DuplicateCheck.run(&batch);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].record_ids, vec!["T1", "T2", "T3"]);
        assert!(findings[0].message.starts_with("3 identical records"));
    }

    #[test]
    fn test_any_differing_field_breaks_the_set() {
        let batch = vec![
            record("T1", "2024-01-05", "1234", "Coffee", "25.00", "25.00"),
            record("T2", "2024-01-05", "1234", "Coffee", "25.00", "26.00"),
            record("T3", "2024-01-05", "1234", "Coffee ", "25.00", "25.00"),
            record("T4", "2024-01-06", "1234", "Coffee", "25.00", "25.00"),
        ];

        assert!(DuplicateCheck.run(&batch).is_empty());
    }

    #[test]
    fn test_amounts_compare_at_scale_two() {
        // 25 and 25.00 parse to the same exact value, so these are duplicates.
        let batch = vec![
            record("T1", "2024-01-05", "1234", "Coffee", "25", "25.00"),
            record("T2", "2024-01-05", "1234", "Coffee", "25.00", "25"),
        ];

        let findings = DuplicateCheck.run(&batch);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_sentinel_amounts_group_by_raw_text() {
        let batch = vec![
            record("T1", "2024-01-05", "1234", "Coffee", "n/a", "25.00"),
            record("T2", "2024-01-05", "1234", "Coffee", "n/a", "25.00"),
        ];

        let findings = DuplicateCheck.run(&batch);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].record_ids.len(), 2);
    }
}
