//! Main analyzer that owns the record collection and answers queries over it

use bigdecimal::BigDecimal;
use std::collections::{BTreeMap, HashSet};
use std::slice;
use tracing::{debug, trace};

use crate::analyzer::calendar::{self, DateParts};
use crate::analyzer::summary::AnalyticsSummary;
use crate::config::AnalyzerConfig;
use crate::traits::*;
use crate::types::*;

/// In-memory analyzer over an ordered collection of transaction records
///
/// Records keep their ingestion order. The only mutation is appending;
/// every query is a single pass over the collection. Malformed records are
/// logged and stored unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransactionAnalyzer {
    records: Vec<TransactionRecord>,
    config: AnalyzerConfig,
}

impl TransactionAnalyzer {
    /// Create an analyzer from raw records, preserving their order
    pub fn new<I>(raw_records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::with_config(raw_records, AnalyzerConfig::default())
    }

    /// Create an analyzer with custom debit/credit labels
    pub fn with_config<I>(raw_records: I, config: AnalyzerConfig) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut analyzer = Self {
            records: Vec::new(),
            config,
        };
        analyzer.extend(raw_records);
        debug!(records = analyzer.len(), "analyzer constructed");
        analyzer
    }

    /// Create an analyzer, running every record through a validator first.
    ///
    /// Stops at the first rejected record.
    pub fn try_new<I>(raw_records: I, validator: &dyn RecordValidator) -> AnalyticsResult<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::try_with_config(raw_records, AnalyzerConfig::default(), validator)
    }

    /// Validated construction with custom debit/credit labels
    pub fn try_with_config<I>(
        raw_records: I,
        config: AnalyzerConfig,
        validator: &dyn RecordValidator,
    ) -> AnalyticsResult<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut analyzer = Self {
            records: Vec::new(),
            config,
        };
        for raw in raw_records {
            analyzer.try_append(raw, validator)?;
        }
        debug!(records = analyzer.len(), "analyzer constructed with validation");
        Ok(analyzer)
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Append a single raw record
    pub fn append(&mut self, raw: RawRecord) {
        let record = TransactionRecord::from(raw);
        TolerantValidator.report(&record);
        self.records.push(record);
        trace!(records = self.records.len(), "record appended");
    }

    /// Append a raw record if the validator accepts it.
    ///
    /// On rejection the collection is left untouched.
    pub fn try_append(
        &mut self,
        raw: RawRecord,
        validator: &dyn RecordValidator,
    ) -> AnalyticsResult<()> {
        let record = TransactionRecord::from(raw);
        validator.validate_record(&record)?;
        self.records.push(record);
        Ok(())
    }

    /// All records in ingestion order
    pub fn all(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct kinds, in the order they first appear
    pub fn unique_types(&self) -> Vec<&str> {
        first_seen(self.records.iter().map(TransactionRecord::kind))
    }

    /// Distinct merchants, in the order they first appear
    pub fn merchants(&self) -> Vec<&str> {
        first_seen(self.records.iter().map(TransactionRecord::merchant))
    }

    /// Sum of every amount, zero for an empty collection
    pub fn total_amount(&self) -> BigDecimal {
        self.records.iter().map(TransactionRecord::amount).sum()
    }

    /// Records of the given kind
    pub fn by_type(&self, kind: &str) -> Vec<&TransactionRecord> {
        self.filter(|r| r.kind() == kind)
    }

    /// Records with the given merchant
    pub fn by_merchant(&self, merchant: &str) -> Vec<&TransactionRecord> {
        self.filter(|r| r.merchant() == merchant)
    }

    /// Mean amount, or `None` when there are no records to average
    pub fn average_amount(&self) -> Option<BigDecimal> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.total_amount() / BigDecimal::from(self.records.len() as u64))
    }

    /// First record with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&TransactionRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Sum of amounts over debit records
    pub fn total_debit(&self) -> BigDecimal {
        self.sum_where(|r| self.config.is_debit(r.kind()))
    }

    /// Sum of amounts over credit records
    pub fn total_credit(&self) -> BigDecimal {
        self.sum_where(|r| self.config.is_credit(r.kind()))
    }

    /// Every description in order, duplicates kept
    pub fn descriptions(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(TransactionRecord::description)
            .collect()
    }

    /// Records dated within `[start, end]`.
    ///
    /// The bounds are parsed once and compared as UTC instants. If either
    /// bound or a record's date is invalid the comparison fails and the
    /// record is left out.
    pub fn in_date_range(&self, start: &str, end: &str) -> Vec<&TransactionRecord> {
        let (Some(start), Some(end)) =
            (calendar::parse_instant(start), calendar::parse_instant(end))
        else {
            trace!("unparseable date range bound");
            return Vec::new();
        };

        self.filter(|r| r.parsed_instant().is_some_and(|d| start <= d && d <= end))
    }

    /// Records with an amount within `[min, max]`
    pub fn by_amount_range(&self, min: &BigDecimal, max: &BigDecimal) -> Vec<&TransactionRecord> {
        self.filter(|r| min <= r.amount() && r.amount() <= max)
    }

    /// Records dated strictly before `cutoff`
    pub fn before_date(&self, cutoff: &str) -> Vec<&TransactionRecord> {
        let Some(cutoff) = calendar::parse_instant(cutoff) else {
            return Vec::new();
        };

        self.filter(|r| r.parsed_instant().is_some_and(|d| d < cutoff))
    }

    /// Record count per calendar month, years merged
    pub fn count_by_month(&self) -> BTreeMap<u32, usize> {
        calendar::month_counts(&self.records)
    }

    /// Debit record count per calendar month, years merged
    pub fn debit_count_by_month(&self) -> BTreeMap<u32, usize> {
        calendar::month_counts(
            self.records
                .iter()
                .filter(|r| self.config.is_debit(r.kind())),
        )
    }

    /// Calendar month (1-12) with the most records.
    ///
    /// Months of different years share a bucket. Ties go to the earliest
    /// month; `None` when no record has a valid date.
    pub fn most_transactions_month(&self) -> Option<u32> {
        calendar::busiest_month(&self.count_by_month())
    }

    /// Calendar month (1-12) with the most debit records
    pub fn most_debit_month(&self) -> Option<u32> {
        calendar::busiest_month(&self.debit_count_by_month())
    }

    /// Whether debits or credits are more numerous. Other kinds are ignored.
    pub fn dominant_type(&self) -> DominantKind {
        let (debits, credits) =
            self.records
                .iter()
                .fold((0usize, 0usize), |(debits, credits), r| {
                    if self.config.is_debit(r.kind()) {
                        (debits + 1, credits)
                    } else if self.config.is_credit(r.kind()) {
                        (debits, credits + 1)
                    } else {
                        (debits, credits)
                    }
                });

        trace!(debits, credits, "counted debit and credit records");
        match debits.cmp(&credits) {
            std::cmp::Ordering::Greater => DominantKind::Debit,
            std::cmp::Ordering::Less => DominantKind::Credit,
            std::cmp::Ordering::Equal => DominantKind::Equal,
        }
    }

    /// Sum of amounts for records matching every provided date component.
    ///
    /// `month` is 1-indexed. Passing `None` for all three sums everything.
    pub fn total_amount_by_date(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> BigDecimal {
        self.total_amount_for(&DateParts::new(year, month, day))
    }

    /// Sum of amounts for records matching the given date parts
    pub fn total_amount_for(&self, parts: &DateParts) -> BigDecimal {
        self.sum_where(|r| parts.matches(r.parsed_date()))
    }

    /// Snapshot of the headline figures
    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            record_count: self.len(),
            total_amount: self.total_amount(),
            average_amount: self.average_amount(),
            total_debit: self.total_debit(),
            total_credit: self.total_credit(),
            dominant_type: self.dominant_type(),
            most_transactions_month: self.most_transactions_month(),
            most_debit_month: self.most_debit_month(),
            unique_types: self
                .unique_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn filter<P>(&self, predicate: P) -> Vec<&TransactionRecord>
    where
        P: Fn(&TransactionRecord) -> bool,
    {
        let matched: Vec<&TransactionRecord> =
            self.records.iter().filter(|&r| predicate(r)).collect();
        trace!(matched = matched.len(), of = self.records.len(), "filtered records");
        matched
    }

    fn sum_where<P>(&self, predicate: P) -> BigDecimal
    where
        P: Fn(&TransactionRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|&r| predicate(r))
            .map(TransactionRecord::amount)
            .sum()
    }
}

impl FromIterator<RawRecord> for TransactionAnalyzer {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<RawRecord> for TransactionAnalyzer {
    /// Append many raw records in order
    fn extend<I: IntoIterator<Item = RawRecord>>(&mut self, iter: I) {
        self.records.extend(iter.into_iter().map(|raw| {
            let record = TransactionRecord::from(raw);
            TolerantValidator.report(&record);
            record
        }));
    }
}

impl<'a> IntoIterator for &'a TransactionAnalyzer {
    type Item = &'a TransactionRecord;
    type IntoIter = slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Deduplicate while keeping first-seen order
fn first_seen<'a, I>(values: I) -> Vec<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
