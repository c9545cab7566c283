//! Integration tests for transaction-analytics

use bigdecimal::BigDecimal;
use pretty_assertions::assert_eq;
use transaction_analytics::{
    utils::validate_record_date, AnalyticsError, AnalyzerConfig, DateParts, DominantKind,
    RawRecord, StrictValidator, TransactionAnalyzer, TransactionRecord,
};

const FIXTURE: &str = r#"[
    {
        "transaction_id": "1",
        "transaction_date": "2019-01-05",
        "transaction_amount": 50,
        "transaction_type": "debit",
        "transaction_description": "Groceries",
        "merchant_name": "Corner Store",
        "card_type": "Visa"
    },
    {
        "transaction_id": "2",
        "transaction_date": "2019-01-20",
        "transaction_amount": 100,
        "transaction_type": "credit",
        "transaction_description": "Salary top-up",
        "merchant_name": "Acme Payroll",
        "card_type": "Mastercard"
    },
    {
        "transaction_id": "3",
        "transaction_date": "2019-02-01",
        "transaction_amount": 30,
        "transaction_type": "debit",
        "transaction_description": "Groceries",
        "merchant_name": "Corner Store",
        "card_type": "Visa"
    }
]"#;

fn fixture() -> Vec<RawRecord> {
    serde_json::from_str(FIXTURE).unwrap()
}

fn raw(id: &str, date: &str, amount: i64, kind: &str) -> RawRecord {
    RawRecord {
        transaction_id: id.to_string(),
        transaction_date: date.to_string(),
        transaction_amount: BigDecimal::from(amount),
        transaction_type: kind.to_string(),
        transaction_description: format!("txn {id}"),
        merchant_name: "Market".to_string(),
        card_type: "Amex".to_string(),
    }
}

fn ids(records: &[&TransactionRecord]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

fn mixed() -> Vec<RawRecord> {
    vec![
        raw("a", "2019-03-01", 12, "debit"),
        raw("b", "2019-03-15T09:00:00", -4, "credit"),
        raw("c", "2020-07-04", 250, "transfer"),
        raw("d", "not-a-date", 7, "debit"),
        raw("e", "2018-11-30 23:59:59", 0, "credit"),
        raw("f", "2019-03-02", 19, "fee"),
    ]
}

#[test]
fn test_fixture_scenario() {
    let analyzer = TransactionAnalyzer::new(fixture());

    assert_eq!(analyzer.len(), 3);
    assert_eq!(analyzer.total_amount(), BigDecimal::from(180));
    assert_eq!(analyzer.by_type("debit").len(), 2);
    assert_eq!(
        analyzer.most_transactions_month().map(|m| m.to_string()),
        Some("1".to_string())
    );
    assert_eq!(analyzer.dominant_type().to_string(), "debit");
    assert_eq!(
        analyzer.total_amount_by_date(Some(2019), Some(1), None),
        BigDecimal::from(150)
    );
    assert_eq!(
        ids(&analyzer.by_amount_range(&BigDecimal::from(50), &BigDecimal::from(100))),
        vec!["1", "2"]
    );
    assert_eq!(analyzer.by_merchant("Corner Store").len(), 2);
    assert_eq!(
        analyzer.descriptions(),
        vec!["Groceries", "Salary top-up", "Groceries"]
    );
    assert_eq!(analyzer.total_debit(), BigDecimal::from(80));
}

#[test]
fn test_empty_scenario() {
    let analyzer = TransactionAnalyzer::new(Vec::<RawRecord>::new());

    assert_eq!(analyzer.average_amount(), None);
    assert_eq!(analyzer.most_transactions_month(), None);
    assert_eq!(analyzer.total_amount(), BigDecimal::from(0));
    assert!(analyzer.unique_types().is_empty());
    assert!(analyzer.find_by_id("1").is_none());
}

#[test]
fn test_decimal_amounts_from_strings() {
    let json = r#"{
        "transaction_id": "9",
        "transaction_date": "2019-06-01",
        "transaction_amount": "12.50",
        "transaction_type": "debit",
        "transaction_description": "Coffee",
        "merchant_name": "Cafe",
        "card_type": "Visa"
    }"#;
    let one: RawRecord = serde_json::from_str(json).unwrap();
    let analyzer = TransactionAnalyzer::new(vec![one.clone(), one.clone(), one]);

    assert_eq!(analyzer.total_amount(), "37.5".parse::<BigDecimal>().unwrap());
    assert_eq!(
        analyzer.average_amount(),
        Some("12.5".parse::<BigDecimal>().unwrap())
    );
}

#[test]
fn test_fractional_number_amounts_stay_exact() {
    let json = r#"[
        {"transaction_id": "1", "transaction_date": "2019-01-01", "transaction_amount": 0.1,
         "transaction_type": "debit", "transaction_description": "", "merchant_name": "",
         "card_type": ""},
        {"transaction_id": "2", "transaction_date": "2019-01-02", "transaction_amount": 0.2,
         "transaction_type": "credit", "transaction_description": "", "merchant_name": "",
         "card_type": ""}
    ]"#;
    let raw: Vec<RawRecord> = serde_json::from_str(json).unwrap();
    let analyzer = TransactionAnalyzer::new(raw);
    let tenth = "0.1".parse::<BigDecimal>().unwrap();

    assert_eq!(analyzer.total_amount(), "0.3".parse::<BigDecimal>().unwrap());
    assert_eq!(analyzer.total_amount().to_string(), "0.3");
    assert_eq!(ids(&analyzer.by_amount_range(&tenth, &tenth)), vec!["1"]);
    assert_eq!(
        analyzer.average_amount(),
        Some("0.15".parse::<BigDecimal>().unwrap())
    );
}

#[test]
fn test_total_amount_is_order_independent() {
    let records = mixed();
    let expected = TransactionAnalyzer::new(records.clone()).total_amount();

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(TransactionAnalyzer::new(reversed).total_amount(), expected);

    for shift in 1..records.len() {
        let mut rotated = records.clone();
        rotated.rotate_left(shift);
        assert_eq!(TransactionAnalyzer::new(rotated).total_amount(), expected);
    }

    let manual: BigDecimal = records.iter().map(|r| &r.transaction_amount).sum();
    assert_eq!(expected, manual);
}

#[test]
fn test_by_type_partitions_collection() {
    let analyzer = TransactionAnalyzer::new(mixed());

    let mut seen = Vec::new();
    for kind in analyzer.unique_types() {
        let group = analyzer.by_type(kind);
        assert!(group.iter().all(|r| r.kind() == kind));
        seen.extend(ids(&group));
    }

    seen.sort();
    let mut all: Vec<String> = analyzer.iter().map(|r| r.id().to_string()).collect();
    all.sort();
    assert_eq!(seen, all);
}

#[test]
fn test_find_by_id_matches_query_or_none() {
    let analyzer = TransactionAnalyzer::new(mixed());

    for id in ["a", "b", "c", "d", "e", "f", "z", ""] {
        match analyzer.find_by_id(id) {
            Some(record) => assert_eq!(record.id(), id),
            None => assert!(analyzer.iter().all(|r| r.id() != id)),
        }
    }
}

#[test]
fn test_in_date_range_is_idempotent() {
    let analyzer = TransactionAnalyzer::new(mixed());
    let once = analyzer.in_date_range("2019-01-01", "2019-12-31");

    let twice = TransactionAnalyzer::new(
        once.iter()
            .map(|r| raw(r.id(), r.date(), 0, r.kind()))
            .collect::<Vec<_>>(),
    );
    let twice = twice.in_date_range("2019-01-01", "2019-12-31");

    assert_eq!(ids(&once), vec!["a", "b", "f"]);
    assert_eq!(ids(&twice), ids(&once));
}

#[test]
fn test_before_date_excludes_cutoff_and_invalid_dates() {
    let analyzer = TransactionAnalyzer::new(mixed());

    assert_eq!(ids(&analyzer.before_date("2019-03-02")), vec!["a", "e"]);
}

#[test]
fn test_date_comparisons_across_offsets() {
    let analyzer = TransactionAnalyzer::new(vec![
        raw("late", "2019-01-01T23:00:00-05:00", 1, "debit"),
        raw("utc", "2019-01-02T02:00:00Z", 1, "debit"),
        raw("tokyo", "2019-01-02T08:00:00+09:00", 1, "credit"),
    ]);

    // instants: tokyo 23:00Z Jan 1, utc 02:00Z Jan 2, late 04:00Z Jan 2
    assert_eq!(ids(&analyzer.before_date("2019-01-02T00:00:00Z")), vec!["tokyo"]);
    assert_eq!(
        ids(&analyzer.in_date_range("2019-01-02T00:00:00Z", "2019-01-02T12:00:00Z")),
        vec!["late", "utc"]
    );
    assert_eq!(
        ids(&analyzer.in_date_range("2019-01-01T18:00:00-05:00", "2019-01-01T23:00:00-05:00")),
        vec!["late", "utc", "tokyo"]
    );
}

#[test]
fn test_partial_iso_dates_take_part_in_queries() {
    let analyzer = TransactionAnalyzer::new(vec![
        raw("month", "2019-07", 5, "debit"),
        raw("year", "2019", 3, "debit"),
    ]);

    assert_eq!(
        ids(&analyzer.in_date_range("2019-01-01", "2019-07-01")),
        vec!["month", "year"]
    );
    assert_eq!(
        analyzer.count_by_month().into_iter().collect::<Vec<_>>(),
        vec![(1, 1), (7, 1)]
    );
    assert_eq!(
        analyzer.total_amount_by_date(Some(2019), Some(7), Some(1)),
        BigDecimal::from(5)
    );
}

#[test]
fn test_dominant_type_is_symmetric() {
    fn swap(kind: &str) -> &str {
        match kind {
            "debit" => "credit",
            "credit" => "debit",
            other => other,
        }
    }

    let cases = vec![
        mixed(),
        TransactionAnalyzer::new(fixture())
            .iter()
            .map(|r| raw(r.id(), r.date(), 1, r.kind()))
            .collect(),
        vec![raw("x", "2019-01-01", 1, "credit")],
        Vec::new(),
    ];

    for records in cases {
        let original = TransactionAnalyzer::new(records.clone()).dominant_type();
        let swapped = TransactionAnalyzer::new(records.into_iter().map(|mut r| {
            r.transaction_type = swap(&r.transaction_type).to_string();
            r
        }))
        .dominant_type();

        let expected = match original {
            DominantKind::Debit => DominantKind::Credit,
            DominantKind::Credit => DominantKind::Debit,
            DominantKind::Equal => DominantKind::Equal,
        };
        assert_eq!(swapped, expected);
    }
}

#[test]
fn test_month_bucketing_merges_years() {
    let analyzer = TransactionAnalyzer::new(vec![
        raw("1", "2018-05-01", 1, "debit"),
        raw("2", "2019-05-01", 1, "credit"),
        raw("3", "2019-06-01", 1, "debit"),
        raw("4", "2019-06-02", 1, "debit"),
    ]);

    // May collects one record from each year, tying June; May is earlier.
    assert_eq!(analyzer.most_transactions_month(), Some(5));
    assert_eq!(analyzer.most_debit_month(), Some(6));
}

#[test]
fn test_total_amount_by_date_components() {
    let analyzer = TransactionAnalyzer::new(mixed());

    assert_eq!(
        analyzer.total_amount_by_date(Some(2019), None, None),
        BigDecimal::from(27)
    );
    assert_eq!(
        analyzer.total_amount_by_date(None, Some(3), Some(1)),
        BigDecimal::from(12)
    );
    assert_eq!(
        analyzer.total_amount_for(&DateParts::any().month(7)),
        BigDecimal::from(250)
    );
    assert_eq!(
        analyzer.total_amount_by_date(Some(2019), Some(13), None),
        BigDecimal::from(0)
    );
}

#[test]
fn test_strict_ingestion_path() {
    let err = TransactionAnalyzer::try_new(mixed(), &StrictValidator).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidRecord(_)));
    assert!(validate_record_date("not-a-date").is_err());

    let analyzer = TransactionAnalyzer::try_new(fixture(), &StrictValidator).unwrap();
    assert_eq!(analyzer.len(), 3);
}

#[test]
fn test_config_from_json() {
    let config: AnalyzerConfig =
        serde_json::from_str(r#"{"debit_kind": "out", "credit_kind": "in"}"#).unwrap();
    let analyzer = TransactionAnalyzer::with_config(
        vec![
            raw("1", "2019-01-01", 5, "out"),
            raw("2", "2019-01-02", 6, "in"),
            raw("3", "2019-02-01", 7, "in"),
        ],
        config,
    );

    assert_eq!(analyzer.total_debit(), BigDecimal::from(5));
    assert_eq!(analyzer.total_credit(), BigDecimal::from(13));
    assert_eq!(analyzer.dominant_type(), DominantKind::Credit);
    assert_eq!(analyzer.most_debit_month(), Some(1));
}
