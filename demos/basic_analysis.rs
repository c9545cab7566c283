//! Basic analysis example
//!
//! Plays the external loader (JSON) and presenter (console) around the
//! analyzer. Run with `RUST_LOG=debug` to see the library's log events.

use bigdecimal::BigDecimal;
use transaction_analytics::{DateParts, RawRecord, TransactionAnalyzer};

const TRANSACTIONS: &str = r#"[
    {"transaction_id": "t1", "transaction_date": "2019-01-05", "transaction_amount": "50.00",
     "transaction_type": "debit", "transaction_description": "Groceries",
     "merchant_name": "Corner Store", "card_type": "Visa"},
    {"transaction_id": "t2", "transaction_date": "2019-01-20", "transaction_amount": "100.00",
     "transaction_type": "credit", "transaction_description": "Refund",
     "merchant_name": "Bookshop", "card_type": "Mastercard"},
    {"transaction_id": "t3", "transaction_date": "2019-02-01T18:30:00", "transaction_amount": "30.00",
     "transaction_type": "debit", "transaction_description": "Groceries",
     "merchant_name": "Corner Store", "card_type": "Visa"},
    {"transaction_id": "t4", "transaction_date": "2019-02-14", "transaction_amount": "75.50",
     "transaction_type": "debit", "transaction_description": "Dinner",
     "merchant_name": "Trattoria", "card_type": "Amex"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("📊 Transaction Analytics - Basic Example\n");

    let raw: Vec<RawRecord> = serde_json::from_str(TRANSACTIONS)?;
    let mut analyzer = TransactionAnalyzer::new(raw);
    println!("Loaded {} transactions", analyzer.len());

    for record in &analyzer {
        println!("  {}", record);
    }

    let summary = analyzer.summary();
    println!("\nTotal amount:    {}", summary.total_amount);
    match &summary.average_amount {
        Some(avg) => println!("Average amount:  {}", avg.round(2)),
        None => println!("Average amount:  undefined"),
    }
    println!("Total debit:     {}", summary.total_debit);
    println!("Total credit:    {}", summary.total_credit);
    println!("Dominant type:   {}", summary.dominant_type);
    println!("Kinds seen:      {}", summary.unique_types.join(", "));

    match summary.most_transactions_month {
        Some(month) => println!("Busiest month:   {}", month),
        None => println!("Busiest month:   no data"),
    }
    match summary.most_debit_month {
        Some(month) => println!("Busiest debits:  {}", month),
        None => println!("Busiest debits:  no data"),
    }

    println!("\nCorner Store visits: {}", analyzer.by_merchant("Corner Store").len());
    println!(
        "Spent in February 2019: {}",
        analyzer.total_amount_for(&DateParts::any().year(2019).month(2))
    );

    let mid_range = analyzer.by_amount_range(&BigDecimal::from(40), &BigDecimal::from(80));
    println!("Between 40 and 80: {}", mid_range.len());

    analyzer.append(RawRecord {
        transaction_id: "t5".to_string(),
        transaction_date: "sometime".to_string(),
        transaction_amount: BigDecimal::from(5),
        transaction_type: "fee".to_string(),
        transaction_description: "Card fee".to_string(),
        merchant_name: "Bank".to_string(),
        card_type: "Visa".to_string(),
    });
    println!(
        "\nAfter appending an undated fee: {} records, {} in January 2019",
        analyzer.len(),
        analyzer.in_date_range("2019-01-01", "2019-01-31").len()
    );

    match analyzer.find_by_id("t9") {
        Some(record) => println!("Found: {}", record.canonical_string()),
        None => println!("Transaction t9 not found"),
    }

    println!("\nSummary as JSON:\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
