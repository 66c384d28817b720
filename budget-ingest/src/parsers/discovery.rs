//! Discovery Bank transaction export parser (CSV)
//!
//! Expected header:
//!   Value Date,Value Time,Type,Description,Beneficiary or CardHolder,Amount
//!
//! Discovery exports are messy (stray quotes, short rows), so a row that
//! can't be read is dropped and the rest of the file still parses.

use anyhow::Result;
use budget_core::{Source, Transaction, TransactionType, parse_local_datetime};
use serde::Deserialize;

use crate::amount::normalize_amount;
use crate::types::ParseOptions;

/// Transaction type whose description gets the type prepended
const PREPAID_ELECTRICITY: &str = "Prepaid Electricity";

#[derive(Debug, Deserialize)]
struct DiscoveryRecord {
    #[serde(rename = "Value Date")]
    value_date: String,
    #[serde(rename = "Value Time")]
    value_time: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
}

fn to_transaction(record: &DiscoveryRecord, opts: &ParseOptions) -> Result<Transaction> {
    let kind = if record.amount.starts_with('-') {
        TransactionType::Expense
    } else {
        TransactionType::Income
    };
    let magnitude = normalize_amount(&record.amount)?;

    let stamp = format!("{}T{}", record.value_date, record.value_time);
    let datetime = parse_local_datetime(&stamp, opts.timezone)?;

    let description = if record.kind == PREPAID_ELECTRICITY {
        format!("{} {}", record.kind, record.description)
    } else {
        record.description.clone()
    };

    Ok(Transaction::new(datetime, description, magnitude, kind, Source::Discovery))
}

/// Parse a Discovery Bank CSV export into transactions dated after
/// `opts.cutoff`, skipping rows that fail to decode. Output keeps file order.
pub fn parse_discovery_csv(text: &str, opts: &ParseOptions) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    let mut skipped = 0usize;

    for (idx, result) in rdr.deserialize::<DiscoveryRecord>().enumerate() {
        let row = idx + 2;
        let txn = match result {
            Ok(record) => to_transaction(&record, opts),
            Err(e) => Err(e.into()),
        };

        match txn {
            Ok(txn) if opts.keeps(&txn) => out.push(txn),
            Ok(_) => {}
            Err(e) => {
                skipped += 1;
                tracing::warn!(row, error = %e, "skipping malformed Discovery row");
            }
        }
    }

    tracing::info!(count = out.len(), skipped, "Processed Discovery file");
    Ok(out)
}
