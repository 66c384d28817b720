//! Amount normalization shared by both bank formats.
//!
//! Bank exports write amounts like "R1,234.56" or "-1 234.56". Every currency
//! marker, separator and sign is deleted and what remains is read as one
//! integer, so "R1,234.56" and "1234.56" both become 123456. The decimal
//! point is dropped rather than interpreted.

use anyhow::{Context, Result};

/// Characters removed from an amount string, in removal order.
const STRIPPED: [char; 5] = ['R', ',', '.', '-', ' '];

/// Strip an amount string down to its unsigned integer magnitude.
/// An empty remainder counts as zero.
pub fn normalize_amount(raw: &str) -> Result<u64> {
    let mut digits = raw.to_string();
    for c in STRIPPED {
        digits = digits.replace(c, "");
    }

    let digits = digits.trim();
    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse::<u64>()
        .with_context(|| format!("invalid amount '{raw}'"))
}
