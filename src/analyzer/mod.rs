//! Analyzer module containing the record collection and its queries

pub mod calendar;
pub mod core;
pub mod summary;

pub use calendar::DateParts;
pub use self::core::*;
pub use summary::*;
