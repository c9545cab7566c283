//! Validation utilities

use crate::analyzer::calendar;
use crate::types::*;

/// Validate that a record id is present
pub fn validate_record_id(id: &str) -> AnalyticsResult<()> {
    if id.trim().is_empty() {
        return Err(AnalyticsError::Validation(
            "Record ID cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a record date is present and parses
pub fn validate_record_date(date: &str) -> AnalyticsResult<()> {
    if date.trim().is_empty() {
        return Err(AnalyticsError::Validation(
            "Record date cannot be empty".to_string(),
        ));
    }

    if calendar::parse_date(date).is_none() {
        return Err(AnalyticsError::Validation(format!(
            "Record date '{}' is not a recognised ISO date",
            date
        )));
    }

    Ok(())
}
