//! Line recognisers for the wallet statement template.
//!
//! Metadata rules are independent predicate/extractor pairs: every rule is
//! tried on every line and a line may fire several of them. Transaction lines
//! depend on the currency tag and are matched through [`CurrencyPatterns`].

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::types::parse_amount;
use crate::errors::{LineError, StatementParseError};
use crate::types::UNKNOWN;

fn time_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{1,2}:[0-9]{2}:[0-9]{2}").expect("time regex"))
}

fn date_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]+ [0-9]{1,2}, [0-9]{4}$").expect("date heading regex")
    })
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digits regex"))
}

fn header_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9,]+\.[0-9]{2}").expect("header amount regex"))
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"TXT-([0-9]+)").expect("reference regex"))
}

/// A line and the one after it in the preprocessed sequence.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub line: &'a str,
    pub next: Option<&'a str>,
}

/// Metadata update produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    AccountHolder(String),
    AccountNumber(String),
    /// Amount text only, currency is added by the scanner
    OpeningBalance(String),
    ClosingBalance(String),
    StatementPeriod(String),
    DateHeading(String),
}

pub struct MetadataRule {
    pub name: &'static str,
    applies: fn(&str) -> bool,
    extract: fn(LineContext<'_>) -> Signal,
}

impl MetadataRule {
    pub fn apply(&self, ctx: LineContext<'_>) -> Option<Signal> {
        if (self.applies)(ctx.line) {
            Some((self.extract)(ctx))
        } else {
            None
        }
    }
}

fn next_line_or_unknown(ctx: LineContext<'_>) -> String {
    ctx.next
        .map(str::trim)
        .filter(|next| !next.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn header_amount(line: &str) -> String {
    header_amount_re()
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or("0.00")
        .to_string()
}

pub static METADATA_RULES: &[MetadataRule] = &[
    MetadataRule {
        name: "header",
        applies: |line| line.contains("Wallet Statement"),
        extract: |ctx| Signal::AccountHolder(next_line_or_unknown(ctx)),
    },
    MetadataRule {
        name: "account_number",
        applies: |line| line.contains("Account Number"),
        extract: |ctx| {
            Signal::AccountNumber(
                digits_re()
                    .find(ctx.line)
                    .map(|m| m.as_str())
                    .unwrap_or(UNKNOWN)
                    .to_string(),
            )
        },
    },
    MetadataRule {
        name: "opening_balance",
        applies: |line| line.contains("Opening Balance"),
        extract: |ctx| Signal::OpeningBalance(header_amount(ctx.line)),
    },
    MetadataRule {
        name: "closing_balance",
        applies: |line| line.contains("Closing Balance"),
        extract: |ctx| Signal::ClosingBalance(header_amount(ctx.line)),
    },
    MetadataRule {
        name: "statement_period",
        applies: |line| line.contains("Statement Period"),
        extract: |ctx| Signal::StatementPeriod(next_line_or_unknown(ctx)),
    },
    MetadataRule {
        name: "date_heading",
        applies: |line| date_heading_re().is_match(line),
        extract: |ctx| Signal::DateHeading(ctx.line.to_string()),
    },
];

/// Pieces of a transaction line before scan state (date, last balance) is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionLine {
    pub time: Option<String>,
    pub running_balance: Decimal,
    pub amount: Decimal,
    pub is_credit: bool,
    pub reference: Option<String>,
    pub description: String,
    pub counterparty: String,
}

/// Currency-dependent transaction patterns.
#[derive(Debug, Clone)]
pub struct CurrencyPatterns {
    currency: String,
    amount_capture: Regex,
    amount_strip: Regex,
}

impl CurrencyPatterns {
    pub fn new(currency: &str) -> Result<Self, StatementParseError> {
        let tag = regex::escape(currency);
        let amount_capture = Regex::new(&format!(r"{tag}\s*([0-9,]+\.[0-9]{{2}})"))
            .map_err(|e| StatementParseError::InvalidConfig(e.to_string()))?;
        let amount_strip = Regex::new(&format!(r"{tag} [0-9,]+\.[0-9]{{2}}"))
            .map_err(|e| StatementParseError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            currency: currency.to_string(),
            amount_capture,
            amount_strip,
        })
    }

    /// A time token and the currency tag anywhere on the line.
    pub fn is_transaction_line(&self, line: &str) -> bool {
        time_token_re().is_match(line) && line.contains(self.currency.as_str())
    }

    /// Every tagged amount on the line, left to right.
    pub fn amounts(&self, line: &str) -> Result<Vec<Decimal>, LineError> {
        self.amount_capture
            .captures_iter(line)
            .map(|caps| parse_amount(&caps[1]))
            .collect()
    }

    fn strip_amounts<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.amount_strip.replace_all(line, "")
    }

    /// Splits a transaction line into its parts.
    ///
    /// `Ok(None)` means the line carries fewer than two amounts and is not a
    /// transaction after all.
    pub fn decompose(&self, line: &str) -> Result<Option<TransactionLine>, LineError> {
        let time = time_token_re().find(line).map(|m| m.as_str());

        let amounts = self.amounts(line)?;
        let (running_balance, amount) = match amounts.as_slice() {
            [balance, amount, ..] => (*balance, *amount),
            _ => return Ok(None),
        };

        let is_credit = line.to_lowercase().contains("credit") || amount > running_balance;

        let reference = reference_re()
            .captures(line)
            .map(|caps| format!("TXT-{}", &caps[1]));

        let without_time = match time {
            Some(token) => Cow::Owned(line.replacen(token, "", 1)),
            None => Cow::Borrowed(line),
        };
        let description = self.strip_amounts(&without_time).trim().to_string();
        let counterparty = description
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(Some(TransactionLine {
            time: time.map(str::to_string),
            running_balance,
            amount,
            is_credit,
            reference,
            description,
            counterparty,
        }))
    }
}
