use crate::Transaction;

/// Order transactions newest first. Equal timestamps keep their input order.
pub fn sort_by_datetime_desc(txns: &mut [Transaction]) {
    txns.sort_by(|a, b| b.datetime.cmp(&a.datetime));
}
