//! Where parsed statements go once the webhook is done with them.
//!
//! Transactions are not stored or forwarded anywhere yet. `DiscardSink` logs
//! the batch and drops it; a storage or notification step plugs in here.

use budget_core::Transaction;
use budget_ingest::StatementFormat;
use tracing::info;

/// One parsed attachment, sorted newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementBatch {
    pub filename: String,
    pub format: StatementFormat,
    pub transactions: Vec<Transaction>,
}

pub trait TransactionSink: Send + Sync {
    fn accept(&self, batch: StatementBatch);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl TransactionSink for DiscardSink {
    fn accept(&self, batch: StatementBatch) {
        info!(
            filename = %batch.filename,
            format = %batch.format,
            count = batch.transactions.len(),
            "Transactions processed"
        );
    }
}
