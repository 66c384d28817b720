//! Normalized transaction records shared by every statement parser

use anyhow::bail;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Direction of money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionType {
    /// Apply this direction's sign to an unsigned magnitude
    pub fn signed(&self, magnitude: i64) -> i64 {
        match self {
            TransactionType::Income => magnitude,
            TransactionType::Expense => -magnitude,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Bank a transaction was exported from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    #[serde(rename = "capitec")]
    Capitec,
    #[serde(rename = "discovery")]
    Discovery,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Capitec => "capitec",
            Source::Discovery => "discovery",
        }
    }
}

/// One statement line in bank-agnostic form.
///
/// `amount` is the integer left after stripping currency symbols and
/// separators from the bank's text. It carries no fixed unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    pub datetime: DateTime<FixedOffset>,
    pub description: String,
    /// Income is `>= 0`, expense is `<= 0`
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Unchecked wire shape; decoding goes through `TryFrom` so the sign rule holds.
#[derive(Deserialize)]
struct TransactionRecord {
    datetime: DateTime<FixedOffset>,
    description: String,
    amount: i64,
    #[serde(rename = "type")]
    kind: TransactionType,
    source: Source,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = anyhow::Error;

    fn try_from(r: TransactionRecord) -> anyhow::Result<Self> {
        let sign_ok = match r.kind {
            TransactionType::Income => r.amount >= 0,
            TransactionType::Expense => r.amount <= 0,
        };
        if !sign_ok {
            bail!("{} amount {} has the wrong sign", r.kind.as_str(), r.amount);
        }
        Ok(Self {
            datetime: r.datetime,
            description: r.description,
            amount: r.amount,
            kind: r.kind,
            source: r.source,
            category: r.category,
        })
    }
}

impl Transaction {
    /// Create a transaction from an unsigned magnitude; the sign follows `kind`.
    pub fn new(
        datetime: DateTime<FixedOffset>,
        description: impl Into<String>,
        magnitude: u64,
        kind: TransactionType,
        source: Source,
    ) -> Self {
        let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
        Self {
            datetime,
            description: description.into(),
            amount: kind.signed(magnitude),
            kind,
            source,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
