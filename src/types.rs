//! Core types and data structures for the analytics system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analyzer::calendar;

/// Raw transaction as handed over by an external loader.
///
/// Field names follow the upstream export format, so a loader can
/// deserialize straight into this struct from JSON, CSV, or any other
/// serde-supported source. Amounts may arrive as numbers or as numeric
/// strings; numbers are read in their shortest decimal form, so `0.1`
/// stays `0.1` rather than the binary expansion of the float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub transaction_id: String,
    pub transaction_date: String,
    #[serde(deserialize_with = "amount_format::deserialize")]
    pub transaction_amount: BigDecimal,
    pub transaction_type: String,
    pub transaction_description: String,
    pub merchant_name: String,
    pub card_type: String,
}

mod amount_format {
    use bigdecimal::BigDecimal;
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;
    use std::str::FromStr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = BigDecimal;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(value))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<BigDecimal, E> {
            if !value.is_finite() {
                return Err(E::custom(format!("amount {} is not finite", value)));
            }
            // Display prints the shortest string that round-trips
            BigDecimal::from_str(&value.to_string()).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<BigDecimal, E> {
            BigDecimal::from_str(value.trim()).map_err(E::custom)
        }
    }
}

/// A single immutable transaction entry
///
/// All fields are fixed at construction. Nothing is validated here:
/// an empty id or an unparseable date is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    id: String,
    date: String,
    amount: BigDecimal,
    kind: String,
    description: String,
    merchant: String,
    card_type: String,
}

impl TransactionRecord {
    /// Create a new record
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        amount: BigDecimal,
        kind: impl Into<String>,
        description: impl Into<String>,
        merchant: impl Into<String>,
        card_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            kind: kind.into(),
            description: description.into(),
            merchant: merchant.into(),
            card_type: card_type.into(),
        }
    }

    /// Identifier, assumed unique
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Date string exactly as ingested
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    /// Transaction kind, conventionally "debit" or "credit"
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    /// Parse the stored date as written, returning `None` for invalid dates.
    ///
    /// This is the wall-clock reading used for month and day matching.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        calendar::parse_date(&self.date)
    }

    /// The stored date as a UTC instant, used for ordering comparisons
    pub fn parsed_instant(&self) -> Option<NaiveDateTime> {
        calendar::parse_instant(&self.date)
    }

    /// Canonical single-line encoding naming every field.
    ///
    /// Meant for logs and debugging output; it is not a persistence format
    /// and there is no parser for it.
    pub fn canonical_string(&self) -> String {
        self.to_string()
    }
}

impl From<RawRecord> for TransactionRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.transaction_id,
            date: raw.transaction_date,
            amount: raw.transaction_amount,
            kind: raw.transaction_type,
            description: raw.transaction_description,
            merchant: raw.merchant_name,
            card_type: raw.card_type,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} date={} amount={} kind={} description={} merchant={} card_type={}",
            self.id,
            self.date,
            self.amount,
            self.kind,
            self.description,
            self.merchant,
            self.card_type
        )
    }
}

/// Outcome of comparing debit and credit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantKind {
    /// More debit records than credit records
    Debit,
    /// More credit records than debit records
    Credit,
    /// Same number of each, including none at all
    Equal,
}

impl DominantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantKind::Debit => "debit",
            DominantKind::Credit => "credit",
            DominantKind::Equal => "equal",
        }
    }
}

impl fmt::Display for DominantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the opt-in strict ingestion path
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
