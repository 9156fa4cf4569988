use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};
use crate::parsers::wallet::types::{StatementDate, parse_amount};

pub(crate) const UNKNOWN: &str = "Unknown";

/// Structured content of one wallet statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub account_holder: String,
    pub account_number: String,
    pub opening_balance: String,
    pub closing_balance: String,
    pub statement_period: String,
    pub transactions: Vec<TransactionRecord>,
}

impl StatementRecord {
    /// Record with every field at its documented default, balances tagged with `currency`.
    pub fn empty(currency: &str) -> Self {
        Self {
            account_holder: UNKNOWN.to_string(),
            account_number: UNKNOWN.to_string(),
            opening_balance: format!("{currency} 0.00"),
            closing_balance: format!("{currency} 0.00"),
            statement_period: UNKNOWN.to_string(),
            transactions: Vec::new(),
        }
    }
}

impl Default for StatementRecord {
    fn default() -> Self {
        Self::empty("NGN")
    }
}

/// Label written into [`TransactionRecord::transaction_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Maps the credit condition to the label the wallet statement output carries.
    ///
    /// The condition "credit word present or amount above balance" is emitted as
    /// `Debit`, and its negation as `Credit`. This mirrors the existing output
    /// and stays until product confirms which way round the labels belong.
    pub fn from_credit_condition(is_credit: bool) -> Self {
        if is_credit {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Credit => f.write_str("Credit"),
            TransactionType::Debit => f.write_str("Debit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: String,
    pub balance: String,
    pub category: String,
    pub to_from: String,
    pub description: String,
    pub transaction_reference: String,
}

impl TransactionRecord {
    /// Calendar date of the transaction, read from the heading text or fallback date.
    pub fn posted_on(&self) -> StatementResult<NaiveDate> {
        StatementDate::from(self.date.as_str()).try_into()
    }

    pub fn amount_value(&self) -> StatementResult<Decimal> {
        money_value(&self.amount)
    }

    pub fn balance_value(&self) -> StatementResult<Decimal> {
        money_value(&self.balance)
    }
}

/// Numeric part of a `"<CUR> 1,234.56"` string.
fn money_value(money: &str) -> StatementResult<Decimal> {
    let digits = money
        .split_once(' ')
        .map(|(_, rest)| rest)
        .unwrap_or(money);

    parse_amount(digits.trim())
        .map_err(|_| StatementParseError::AmountInvalidFormat(money.to_string()))
}

/// A transaction-looking line that could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// 1-based position in the preprocessed line sequence
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Statement plus the lines that were skipped while building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub statement: StatementRecord,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
