//! budget-email HTTP API: health check and the statement-email webhook.

pub mod callbacks;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod sink;

use std::sync::Arc;

use budget_ingest::ParseOptions;

pub use error::WebhookError;
pub use server::{create_router, start_server};
pub use sink::{DiscardSink, StatementBatch, TransactionSink};

/// Per-request dependencies. Cloned into every handler; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub options: ParseOptions,
    pub sink: Arc<dyn TransactionSink>,
}

impl AppState {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            options,
            sink: Arc::new(DiscardSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn TransactionSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }
}
