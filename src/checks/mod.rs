//! Check library: the eight validation rules
//!
//! Every check is a pure function of the record batch. Checks share no
//! state, may run in any order, and yield identical findings on identical
//! input. [`standard_checks`] fixes the declaration order used for report
//! output.

pub mod balance;
pub mod duplicate;
pub mod record_checks;

use std::collections::HashMap;
use std::hash::Hash;

use crate::record::TransactionRecord;
use crate::types::{Finding, Severity};

pub use balance::BalanceCheck;
pub use duplicate::DuplicateCheck;
pub use record_checks::{
    AccountCodeFormatCheck, DateValidityCheck, MissingAccountCodeCheck, MissingDescriptionCheck,
    NegativeAmountCheck, ZeroAmountCheck,
};

/// A single validation rule over a record batch
///
/// Implementations must be pure: no side effects, no dependence on other
/// checks, and stable output for a given batch.
pub trait Check: Send + Sync {
    /// Stable error code this check emits, e.g. `BAL-001`
    fn code(&self) -> &'static str;

    /// Severity of every finding this check produces
    fn severity(&self) -> Severity;

    /// Short human-readable description of the rule
    fn description(&self) -> &'static str;

    /// Run the rule against the full batch
    fn run(&self, batch: &[TransactionRecord]) -> Vec<Finding>;
}

/// The eight standard checks in fixed declaration order
///
/// The order is purely for reproducible report output; no check depends on
/// another's result.
pub fn standard_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(BalanceCheck),
        Box::new(DuplicateCheck),
        Box::new(MissingAccountCodeCheck),
        Box::new(AccountCodeFormatCheck),
        Box::new(DateValidityCheck),
        Box::new(NegativeAmountCheck),
        Box::new(ZeroAmountCheck),
        Box::new(MissingDescriptionCheck),
    ]
}

/// Group records by a key, preserving first-occurrence order of groups and
/// input order of members within each group
pub(crate) fn group_by_key<'a, K, F>(
    batch: &'a [TransactionRecord],
    key_of: F,
) -> Vec<(K, Vec<&'a TransactionRecord>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&TransactionRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&TransactionRecord>)> = Vec::new();
    for record in batch {
        let key = key_of(record);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }
    groups
}
