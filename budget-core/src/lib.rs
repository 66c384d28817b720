//! budget-core: Transaction model and time helpers for statement ingestion

pub mod sort;
pub mod time;
pub mod transaction;

pub use sort::sort_by_datetime_desc;
pub use time::{localize, parse_local_datetime, parse_local_naive, parse_timezone};
pub use transaction::{Source, Transaction, TransactionType};
