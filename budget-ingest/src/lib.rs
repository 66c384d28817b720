//! budget-ingest: statement formats, amount normalization and bank-specific CSV parsers.

pub mod amount;
pub mod parsers;
pub mod types;

pub use amount::normalize_amount;
pub use types::{ParseOptions, StatementFormat, DEFAULT_CUTOFF, DEFAULT_TIMEZONE};
