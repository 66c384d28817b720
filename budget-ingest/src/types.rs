use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use budget_core::{Source, Transaction, localize, parse_local_naive, parse_timezone};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::parsers::{parse_capitec_csv, parse_discovery_csv};

/// Transactions on or before this local time are dropped.
pub const DEFAULT_CUTOFF: &str = "2024-06-24T00:00:00";
/// Zone bank timestamps (and the cutoff) are read in.
pub const DEFAULT_TIMEZONE: &str = "Africa/Johannesburg";

/// Settings shared by every parser. Fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    pub cutoff: DateTime<FixedOffset>,
    pub timezone: Tz,
}

impl ParseOptions {
    /// Resolve a local cutoff time in `timezone`.
    pub fn new(cutoff: NaiveDateTime, timezone: Tz) -> Result<Self> {
        Ok(Self {
            cutoff: localize(cutoff, timezone)?,
            timezone,
        })
    }

    /// Build from config strings like "2024-06-24T00:00:00" and "Africa/Johannesburg".
    pub fn from_strs(cutoff: &str, timezone: &str) -> Result<Self> {
        Self::new(parse_local_naive(cutoff)?, parse_timezone(timezone)?)
    }

    pub fn standard() -> Result<Self> {
        Self::from_strs(DEFAULT_CUTOFF, DEFAULT_TIMEZONE)
    }

    /// Strictly after the cutoff.
    pub fn keeps(&self, txn: &Transaction) -> bool {
        txn.datetime > self.cutoff
    }
}

/// Statement dialects we know how to read, keyed by attachment file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementFormat {
    #[serde(rename = "capitec")]
    Capitec,
    #[serde(rename = "discovery")]
    Discovery,
}

impl StatementFormat {
    pub const ALL: [StatementFormat; 2] = [StatementFormat::Capitec, StatementFormat::Discovery];

    /// File name prefix the bank uses for its statement exports
    pub fn filename_prefix(&self) -> &'static str {
        match self {
            StatementFormat::Capitec => "account_statement",
            StatementFormat::Discovery => "DiscoveryBank",
        }
    }

    /// Detect the format from an attachment file name. Unknown names yield `None`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| filename.starts_with(f.filename_prefix()))
    }

    pub fn source(&self) -> Source {
        match self {
            StatementFormat::Capitec => Source::Capitec,
            StatementFormat::Discovery => Source::Discovery,
        }
    }

    pub fn name(&self) -> &'static str {
        self.source().as_str()
    }

    /// Parse statement text into cutoff-filtered transactions (unsorted).
    pub fn parse(&self, text: &str, opts: &ParseOptions) -> Result<Vec<Transaction>> {
        match self {
            StatementFormat::Capitec => parse_capitec_csv(text, opts),
            StatementFormat::Discovery => parse_discovery_csv(text, opts),
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatementFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "capitec" => Ok(StatementFormat::Capitec),
            "discovery" => Ok(StatementFormat::Discovery),
            other => Err(anyhow::anyhow!("unknown statement format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::TransactionType;
    use chrono::Duration;

    #[test]
    fn test_detects_known_prefixes() {
        assert_eq!(
            StatementFormat::from_filename("account_statement_2024-07.csv"),
            Some(StatementFormat::Capitec)
        );
        assert_eq!(
            StatementFormat::from_filename("DiscoveryBank_Transactions.csv"),
            Some(StatementFormat::Discovery)
        );
    }

    #[test]
    fn test_rejects_unknown_names() {
        assert_eq!(StatementFormat::from_filename("statement.pdf"), None);
        assert_eq!(StatementFormat::from_filename("discoverybank.csv"), None);
        assert_eq!(StatementFormat::from_filename("my_account_statement.csv"), None);
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("Capitec".parse::<StatementFormat>().unwrap(), StatementFormat::Capitec);
        assert_eq!("discovery".parse::<StatementFormat>().unwrap(), StatementFormat::Discovery);
        assert!("fnb".parse::<StatementFormat>().is_err());
        assert_eq!(StatementFormat::Discovery.to_string(), "discovery");
    }

    #[test]
    fn test_standard_cutoff() {
        let opts = ParseOptions::standard().unwrap();
        assert_eq!(opts.cutoff.to_rfc3339(), "2024-06-24T00:00:00+02:00");
    }

    #[test]
    fn test_keeps_strictly_after_cutoff() {
        let opts = ParseOptions::standard().unwrap();
        let at = |dt| Transaction::new(dt, "x", 1, TransactionType::Expense, Source::Capitec);

        assert!(!opts.keeps(&at(opts.cutoff)));
        assert!(!opts.keeps(&at(opts.cutoff - Duration::seconds(1))));
        assert!(opts.keeps(&at(opts.cutoff + Duration::seconds(1))));
    }
}
