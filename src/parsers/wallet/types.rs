use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LineError, StatementParseError};

/// Reads a printed amount such as `10,000.00` into a decimal, ignoring group separators.
pub fn parse_amount(raw: &str) -> Result<Decimal, LineError> {
    let mut digits = raw.replace(',', "");
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }

    Decimal::from_str(&digits).map_err(|e| LineError::InvalidAmount {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Renders `value` as `"<currency> 1,234.56"`: two fraction digits, comma grouping.
pub fn format_amount(currency: &str, value: Decimal) -> String {
    let fixed = format!("{:.2}", value.round_dp(2));
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{currency} {sign}{grouped}.{fraction}")
}

/// Date text carried by a transaction: either a statement heading like
/// `March 5, 2025` or the ISO fallback date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementDate(String);

impl StatementDate {
    pub fn parse(&self) -> Result<NaiveDate, StatementParseError> {
        let s = self.0.trim();

        for format in ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }

        Err(StatementParseError::DateInvalidFormat)
    }
}

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementDate> for NaiveDate {
    type Error = StatementParseError;

    fn try_from(date: StatementDate) -> Result<Self, Self::Error> {
        date.parse()
    }
}
