//! Headline report over an analyzer's records

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::DominantKind;

/// Serializable snapshot of the main aggregates, for presenters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub record_count: usize,
    pub total_amount: BigDecimal,
    /// `None` when there were no records
    pub average_amount: Option<BigDecimal>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    pub dominant_type: DominantKind,
    /// Busiest calendar month (1-12), years merged
    pub most_transactions_month: Option<u32>,
    pub most_debit_month: Option<u32>,
    pub unique_types: Vec<String>,
}

impl AnalyticsSummary {
    /// Net of credits minus debits
    pub fn net_flow(&self) -> BigDecimal {
        &self.total_credit - &self.total_debit
    }
}
