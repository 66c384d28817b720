//! Capitec account statement parser (CSV)
//!
//! Header-driven; the export looks like:
//!   Description,Money In,Money Out,Fee,Posting Date,Transaction Date
//!   Salary ACME,"R25,000.00",,,2024-06-25,2024-06-25 08:01:12
//!   Checkers (Pending),,-R312.45,,2024-06-26,2024-06-26 17:44:03
//!
//! Exactly one of Money In / Money Out / Fee is filled on a row. Any CSV or
//! amount error fails the whole file.

use anyhow::{Context, Result, bail};
use budget_core::{Source, Transaction, TransactionType, parse_local_datetime};
use serde::Deserialize;

use crate::amount::normalize_amount;
use crate::types::ParseOptions;

const REQUIRED_COLUMNS: [&str; 5] = ["Description", "Money In", "Money Out", "Fee", "Transaction Date"];

#[derive(Debug, Deserialize)]
struct CapitecRecord {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Money In")]
    money_in: Option<String>,
    #[serde(rename = "Money Out")]
    money_out: Option<String>,
    #[serde(rename = "Fee")]
    fee: Option<String>,
    #[serde(rename = "Transaction Date")]
    transaction_date: String,
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Returns `None` for rows whose timestamp can't be read; those never pass the cutoff.
fn to_transaction(record: &CapitecRecord, opts: &ParseOptions) -> Result<Option<Transaction>> {
    let description = record.description.replace("(Pending)", "").trim().to_string();

    let (raw_amount, kind) = if let Some(v) = filled(&record.money_in) {
        (v, TransactionType::Income)
    } else if let Some(v) = filled(&record.money_out) {
        (v, TransactionType::Expense)
    } else {
        (record.fee.as_deref().unwrap_or(""), TransactionType::Expense)
    };
    let magnitude = normalize_amount(raw_amount)?;

    let stamp = record.transaction_date.replacen(' ', "T", 1);
    let datetime = match parse_local_datetime(&stamp, opts.timezone) {
        Ok(dt) => dt,
        Err(e) => {
            tracing::debug!(error = %e, description = %description, "skipping Capitec row with unreadable date");
            return Ok(None);
        }
    };

    Ok(Some(Transaction::new(datetime, description, magnitude, kind, Source::Capitec)))
}

/// Parse a Capitec CSV export into transactions dated after `opts.cutoff`.
/// Output keeps file order.
pub fn parse_capitec_csv(text: &str, opts: &ParseOptions) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("reading Capitec header row")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("Capitec statement is missing the '{column}' column");
        }
    }

    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<CapitecRecord>().enumerate() {
        // 1-indexed, after the header
        let row = idx + 2;
        let record = result.with_context(|| format!("Failed to parse Capitec CSV row {row}"))?;
        let txn = to_transaction(&record, opts).with_context(|| format!("Capitec row {row}"))?;

        if let Some(txn) = txn.filter(|t| opts.keeps(t)) {
            out.push(txn);
        }
    }

    tracing::info!(count = out.len(), "Processed Capitec file");
    Ok(out)
}
