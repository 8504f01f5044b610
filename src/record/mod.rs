//! Record model: raw input rows and their typed, immutable form
//!
//! Ingestion classifies malformed fields instead of rejecting them. A date
//! that fails to parse or an amount that is blank/non-numeric becomes an
//! explicit sentinel on the record, so every check sees a consistent shape
//! and malformed data surfaces as findings rather than ingestion errors.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{ReconError, ReconResult};

/// Date formats accepted at ingestion, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Column headers the input table must provide
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Transaction ID",
    "Date",
    "Account Code",
    "Description",
    "Debit",
    "Credit",
];

/// A transaction date, or the raw text that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateField {
    /// Successfully parsed calendar date
    Parsed(NaiveDate),
    /// Raw input that could not be parsed; kept verbatim for messages
    Unparseable(String),
}

impl DateField {
    /// Parse raw cell text, falling back to the unparseable sentinel
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return DateField::Parsed(date);
            }
        }
        DateField::Unparseable(raw.to_string())
    }

    /// Whether this field holds a parsed calendar date
    pub fn is_parsed(&self) -> bool {
        matches!(self, DateField::Parsed(_))
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateField::Unparseable(raw) => write!(f, "{}", raw),
        }
    }
}

/// A monetary amount with 2-digit scale, or the raw text that was blank or
/// non-numeric
///
/// There is no null state: a numeric cell always yields an exact scale-2
/// value (zero is exactly `0.00`), and anything else is the invalid sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountField {
    /// Exact decimal value, rounded half-up to 2 places once at parse time
    Value(BigDecimal),
    /// Blank or non-numeric input, kept verbatim
    Invalid(String),
}

impl AmountField {
    /// Parse raw cell text into an exact scale-2 decimal
    ///
    /// Leading/trailing whitespace and thousands commas are tolerated by the
    /// lexer; blank or otherwise non-numeric input yields the sentinel, never
    /// a coerced zero.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AmountField::Invalid(raw.to_string());
        }
        let cleaned = trimmed.replace(',', "");
        match BigDecimal::from_str(&cleaned) {
            Ok(value) => AmountField::Value(value.with_scale_round(2, RoundingMode::HalfUp)),
            Err(_) => AmountField::Invalid(raw.to_string()),
        }
    }

    /// The parsed value, if this field is numeric
    pub fn value(&self) -> Option<&BigDecimal> {
        match self {
            AmountField::Value(value) => Some(value),
            AmountField::Invalid(_) => None,
        }
    }

    /// Whether this field holds the missing/unparseable sentinel
    pub fn is_invalid(&self) -> bool {
        matches!(self, AmountField::Invalid(_))
    }
}

/// One raw input row as supplied by an external table reader
///
/// Cells are passed through verbatim; all classification happens in
/// [`TransactionRecord::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub transaction_id: String,
    pub date: String,
    pub account_code: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
}

/// Canonical in-memory representation of one transaction row
///
/// Constructed once at ingestion and never mutated. Text fields keep their
/// raw, untrimmed form so checks can examine whitespace-only values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque unique identifier, assumed unique within the batch
    pub id: String,
    /// Transaction date or the unparseable sentinel
    pub date: DateField,
    /// Raw account code, untrimmed
    pub account_code: String,
    /// Raw description, untrimmed
    pub description: String,
    /// Debit amount or the invalid sentinel
    pub debit: AmountField,
    /// Credit amount or the invalid sentinel
    pub credit: AmountField,
}

impl TransactionRecord {
    /// Build a typed record from a raw row; pure, never fails
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            id: row.transaction_id.clone(),
            date: DateField::parse(&row.date),
            account_code: row.account_code.clone(),
            description: row.description.clone(),
            debit: AmountField::parse(&row.debit),
            credit: AmountField::parse(&row.credit),
        }
    }
}

/// Rectangular table of raw cells, the engine's outermost input form
///
/// Header resolution and the rectangularity check are the only structural
/// gate in the system: once a batch of [`TransactionRecord`]s exists, nothing
/// downstream can fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers as supplied
    pub columns: Vec<String>,
    /// Data rows; each row must have one cell per column
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Resolve a required column by trimmed, case-insensitive header match
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(name))
    }

    /// Interpret the table as an ordered batch of transaction records
    ///
    /// Fails fast with a structural error if any required column is absent
    /// or any row is not rectangular; no partial batch is ever produced.
    /// Cell values are never normalized here.
    pub fn parse(&self) -> ReconResult<Vec<TransactionRecord>> {
        let mut indices = [0usize; 6];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = self
                .column_index(name)
                .ok_or_else(|| ReconError::MissingColumn(name.to_string()))?;
        }
        let [id_col, date_col, account_col, description_col, debit_col, credit_col] = indices;

        let width = self.columns.len();
        let mut records = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(ReconError::RaggedRow {
                    row: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            records.push(TransactionRecord::from_raw(&RawRow {
                transaction_id: row[id_col].clone(),
                date: row[date_col].clone(),
                account_code: row[account_col].clone(),
                description: row[description_col].clone(),
                debit: row[debit_col].clone(),
                credit: row[credit_col].clone(),
            }));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rounds_half_up_to_two_places() {
        let amount = AmountField::parse("123.456");
        assert_eq!(amount.value().unwrap().to_string(), "123.46");

        let amount = AmountField::parse("123.454");
        assert_eq!(amount.value().unwrap().to_string(), "123.45");

        let amount = AmountField::parse("500");
        assert_eq!(amount.value().unwrap().to_string(), "500.00");
    }

    #[test]
    fn test_amount_blank_and_non_numeric_are_sentinels() {
        assert!(AmountField::parse("").is_invalid());
        assert!(AmountField::parse("   ").is_invalid());
        assert!(AmountField::parse("N/A").is_invalid());
        assert!(AmountField::parse("12.3.4").is_invalid());
    }

    #[test]
    fn test_amount_tolerates_whitespace_and_commas() {
        let amount = AmountField::parse(" 1,234.50 ");
        assert_eq!(amount.value().unwrap().to_string(), "1234.50");

        let amount = AmountField::parse("-42.125");
        assert_eq!(amount.value().unwrap().to_string(), "-42.13");
    }

    #[test]
    fn test_date_formats() {
        let expected = DateField::Parsed(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(DateField::parse("2024-03-15"), expected);
        assert_eq!(DateField::parse("15/03/2024"), expected);
        assert_eq!(DateField::parse("15-03-2024"), expected);
        assert_eq!(DateField::parse(" 2024-03-15 "), expected);
    }

    #[test]
    fn test_date_sentinel_keeps_raw_text() {
        match DateField::parse("not-a-date") {
            DateField::Unparseable(raw) => assert_eq!(raw, "not-a-date"),
            other => panic!("expected sentinel, got {:?}", other),
        }
        assert!(!DateField::parse("2024-13-40").is_parsed());
    }

    #[test]
    fn test_record_keeps_raw_text_fields() {
        let record = TransactionRecord::from_raw(&RawRow {
            transaction_id: "T1".to_string(),
            date: "2024-01-01".to_string(),
            account_code: " 1234 ".to_string(),
            description: "  ".to_string(),
            debit: "10".to_string(),
            credit: "".to_string(),
        });

        assert_eq!(record.account_code, " 1234 ");
        assert_eq!(record.description, "  ");
        assert!(record.credit.is_invalid());
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_table_parse_preserves_row_order() {
        let table = table(
            &[
                "Transaction ID",
                "Date",
                "Account Code",
                "Description",
                "Debit",
                "Credit",
            ],
            &[
                &["T1", "2024-01-01", "1000", "Opening", "100.00", "0.00"],
                &["T2", "2024-01-02", "2000", "Rent", "0.00", "100.00"],
            ],
        );

        let records = table.parse().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "T1");
        assert_eq!(records[1].id, "T2");
    }

    #[test]
    fn test_table_headers_match_case_insensitively() {
        let table = table(
            &[
                " transaction id ",
                "DATE",
                "account code",
                "Description",
                "debit",
                "Credit",
            ],
            &[&["T1", "2024-01-01", "1000", "Opening", "100.00", "100.00"]],
        );

        assert_eq!(table.parse().unwrap().len(), 1);
    }

    #[test]
    fn test_table_missing_column_is_structural() {
        let table = table(
            &["Transaction ID", "Date", "Account Code", "Description", "Debit"],
            &[],
        );

        match table.parse() {
            Err(ReconError::MissingColumn(name)) => assert_eq!(name, "Credit"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_table_ragged_row_is_structural() {
        let table = table(
            &[
                "Transaction ID",
                "Date",
                "Account Code",
                "Description",
                "Debit",
                "Credit",
            ],
            &[
                &["T1", "2024-01-01", "1000", "Opening", "100.00", "100.00"],
                &["T2", "2024-01-02", "2000"],
            ],
        );

        match table.parse() {
            Err(ReconError::RaggedRow {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(expected, 6);
                assert_eq!(found, 3);
            }
            other => panic!("expected ragged row, got {:?}", other),
        }
    }
}
