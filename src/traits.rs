//! Traits for pluggable record validation

use tracing::warn;

use crate::types::*;
use crate::utils::validation::{validate_record_date, validate_record_id};

/// Trait for implementing custom record validation rules
///
/// The analyzer stores whatever it is given; validators are only consulted
/// on the `try_*` ingestion path and decide whether a record may enter.
pub trait RecordValidator {
    /// Validate a record before it is stored
    fn validate_record(&self, record: &TransactionRecord) -> AnalyticsResult<()>;
}

/// Default validator: reports problems but never rejects a record
#[derive(Debug, Clone, Copy, Default)]
pub struct TolerantValidator;

impl TolerantValidator {
    /// Log every problem found in the record without rejecting it
    pub fn report(&self, record: &TransactionRecord) {
        for issue in [validate_record_id(record.id()), validate_record_date(record.date())]
            .into_iter()
            .filter_map(Result::err)
        {
            warn!(record_id = record.id(), "storing record as-is: {}", issue);
        }
    }
}

impl RecordValidator for TolerantValidator {
    fn validate_record(&self, record: &TransactionRecord) -> AnalyticsResult<()> {
        self.report(record);
        Ok(())
    }
}

/// Validator that rejects records with an empty id or an unusable date
///
/// Every rejection is reported as `AnalyticsError::InvalidRecord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictValidator;

impl RecordValidator for StrictValidator {
    fn validate_record(&self, record: &TransactionRecord) -> AnalyticsResult<()> {
        validate_record_id(record.id())
            .and_then(|_| validate_record_date(record.date()))
            .map_err(|e| {
                AnalyticsError::InvalidRecord(format!("record '{}': {}", record.id(), e))
            })
    }
}
