//! # Transaction Analytics
//!
//! An in-memory analytics library over financial transaction records:
//! filtering, aggregation, and grouping by calendar month and by kind.
//!
//! ## Features
//!
//! - **Immutable records**: transactions are fixed at construction and never mutated
//! - **Filters**: by kind, merchant, amount range, date range, and cutoff date
//! - **Aggregates**: totals, averages, debit/credit totals, and per-date sums
//! - **Grouping**: busiest calendar month overall and for debits only
//! - **Tolerant ingestion**: bad input degrades to exclusion, never to a panic
//! - **Pluggable validation**: opt-in strict ingestion through `RecordValidator`
//!
//! ## Quick Start
//!
//! ```rust
//! use transaction_analytics::{DominantKind, RawRecord, TransactionAnalyzer};
//! use bigdecimal::BigDecimal;
//!
//! let raw = RawRecord {
//!     transaction_id: "1".to_string(),
//!     transaction_date: "2019-01-05".to_string(),
//!     transaction_amount: BigDecimal::from(50),
//!     transaction_type: "debit".to_string(),
//!     transaction_description: "Groceries".to_string(),
//!     merchant_name: "Corner Store".to_string(),
//!     card_type: "Visa".to_string(),
//! };
//!
//! let analyzer = TransactionAnalyzer::new(vec![raw]);
//! assert_eq!(analyzer.total_amount(), BigDecimal::from(50));
//! assert_eq!(analyzer.most_transactions_month(), Some(1));
//! assert_eq!(analyzer.dominant_type(), DominantKind::Debit);
//! ```

pub mod analyzer;
pub mod config;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use analyzer::*;
pub use config::*;
pub use traits::*;
pub use types::*;
