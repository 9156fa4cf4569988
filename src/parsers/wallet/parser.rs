use log::{debug, trace, warn};
use rust_decimal::Decimal;

use super::lines::preprocess;
use super::rules::{CurrencyPatterns, LineContext, METADATA_RULES, Signal, TransactionLine};
use super::types::format_amount;
use crate::config::ExtractorConfig;
use crate::errors::StatementResult;
use crate::types::{
    LineDiagnostic, ParseOutcome, StatementRecord, TransactionRecord, TransactionType, UNKNOWN,
};

/// Single-pass extractor for wallet statement text.
///
/// Holds only immutable configuration; each call gets its own scan state, so
/// one parser can be shared between threads.
#[derive(Debug, Clone)]
pub struct WalletParser {
    config: ExtractorConfig,
    patterns: CurrencyPatterns,
}

impl WalletParser {
    pub fn new(config: ExtractorConfig) -> StatementResult<Self> {
        config.validate()?;
        let patterns = CurrencyPatterns::new(&config.currency)?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Preprocesses raw extracted text, then scans it.
    pub fn parse_text(&self, text: &str) -> ParseOutcome {
        self.parse_lines(&preprocess(text))
    }

    /// Scans already preprocessed lines.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ParseOutcome {
        let mut scan = ScanState::new(&self.config);

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref().trim();
            let ctx = LineContext {
                line,
                next: lines.get(index + 1).map(|next| next.as_ref()),
            };

            for rule in METADATA_RULES {
                if let Some(signal) = rule.apply(ctx) {
                    trace!("Line {} matched {} rule", index + 1, rule.name);
                    scan.apply_signal(signal);
                }
            }

            if self.patterns.is_transaction_line(line) {
                match self.patterns.decompose(line) {
                    Ok(Some(parsed)) => scan.push_transaction(parsed),
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Skipping transaction line {}: {} ({})", index + 1, e, line);
                        scan.diagnostics.push(LineDiagnostic {
                            line_number: index + 1,
                            line: line.to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let outcome = scan.finish();
        debug!(
            "Scanned {} lines: {} transactions, {} skipped",
            lines.len(),
            outcome.statement.transactions.len(),
            outcome.diagnostics.len()
        );
        outcome
    }
}

/// Running state for one document. Dropped when the scan returns.
struct ScanState<'c> {
    config: &'c ExtractorConfig,
    statement: StatementRecord,
    current_date: Option<String>,
    last_balance: Option<Decimal>,
    diagnostics: Vec<LineDiagnostic>,
}

impl<'c> ScanState<'c> {
    fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            config,
            statement: StatementRecord::empty(&config.currency),
            current_date: None,
            last_balance: None,
            diagnostics: Vec::new(),
        }
    }

    fn apply_signal(&mut self, signal: Signal) {
        let currency = &self.config.currency;
        match signal {
            Signal::AccountHolder(holder) => self.statement.account_holder = holder,
            Signal::AccountNumber(number) => self.statement.account_number = number,
            Signal::OpeningBalance(amount) => {
                self.statement.opening_balance = format!("{currency} {amount}")
            }
            Signal::ClosingBalance(amount) => {
                self.statement.closing_balance = format!("{currency} {amount}")
            }
            Signal::StatementPeriod(period) => self.statement.statement_period = period,
            Signal::DateHeading(date) => self.current_date = Some(date),
        }
    }

    fn push_transaction(&mut self, parsed: TransactionLine) {
        let currency = &self.config.currency;
        self.last_balance = Some(parsed.running_balance);

        let balance = self
            .last_balance
            .map(|balance| format_amount(currency, balance))
            .unwrap_or_else(|| self.statement.closing_balance.clone());

        let record = TransactionRecord {
            date: self
                .current_date
                .clone()
                .unwrap_or_else(|| self.config.fallback_date.clone()),
            time: parsed.time.unwrap_or_else(|| UNKNOWN.to_string()),
            transaction_type: TransactionType::from_credit_condition(parsed.is_credit),
            amount: format_amount(currency, parsed.amount),
            balance,
            category: self.config.category.clone(),
            to_from: parsed.counterparty,
            description: parsed.description,
            transaction_reference: parsed.reference.unwrap_or_else(|| UNKNOWN.to_string()),
        };

        self.statement.transactions.push(record);
    }

    fn finish(self) -> ParseOutcome {
        ParseOutcome {
            statement: self.statement,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    const SAMPLE_STATEMENT: &str = r#"
Wallet Statement
Ada Obi
Account Number 0123456789
Statement Period
01 Mar 2025 - 31 Mar 2025
Opening Balance NGN 5,000.00
Closing Balance NGN 9,250.00

March 5, 2025
09:15:30 Top up/Bank transfer TXT-1001 NGN 6,000.00 NGN 1,000.00
14:02:11 Airtime/MTN TXT-1002 NGN 5,500.00 NGN 500.00

March 6, 2025
08:00:00 Transfer to John/Ref TXT-1003 NGN 9,250.00 NGN 3,750.00
Page 1 of 1
"#;

    fn parser() -> WalletParser {
        WalletParser::new(ExtractorConfig::default()).unwrap()
    }

    fn parse(lines: &[&str]) -> ParseOutcome {
        parser().parse_lines(lines)
    }

    #[test]
    fn test_parse_sample_statement() {
        let outcome = parser().parse_text(SAMPLE_STATEMENT);
        assert!(outcome.is_clean());

        let statement = outcome.statement;
        assert_eq!(statement.account_holder, "Ada Obi");
        assert_eq!(statement.account_number, "0123456789");
        assert_eq!(statement.statement_period, "01 Mar 2025 - 31 Mar 2025");
        assert_eq!(statement.opening_balance, "NGN 5,000.00");
        assert_eq!(statement.closing_balance, "NGN 9,250.00");
        assert_eq!(statement.transactions.len(), 3);

        let first = &statement.transactions[0];
        assert_eq!(first.date, "March 5, 2025");
        assert_eq!(first.time, "09:15:30");
        assert_eq!(first.transaction_type, TransactionType::Credit);
        assert_eq!(first.amount, "NGN 1,000.00");
        assert_eq!(first.balance, "NGN 6,000.00");
        assert_eq!(first.category, "Wallet");
        assert_eq!(first.to_from, "Top up");
        assert_eq!(first.description, "Top up/Bank transfer TXT-1001");
        assert_eq!(first.transaction_reference, "TXT-1001");

        assert_eq!(statement.transactions[1].date, "March 5, 2025");
        assert_eq!(statement.transactions[2].date, "March 6, 2025");
        assert_eq!(statement.transactions[2].to_from, "Transfer to John");
    }

    #[test]
    fn test_no_transactions_keeps_defaults() {
        let outcome = parse(&["Some unrelated header", "Page 1 of 2"]);
        assert_eq!(outcome.statement, StatementRecord::default());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse(&[]);
        assert_eq!(outcome.statement, StatementRecord::default());
    }

    #[test]
    fn test_metadata_only() {
        let outcome = parse(&["Account Number 0123456789", "Opening Balance NGN 5,000.00"]);
        let statement = outcome.statement;
        assert_eq!(statement.account_number, "0123456789");
        assert_eq!(statement.opening_balance, "NGN 5,000.00");
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn test_single_amount_line_emits_nothing() {
        let outcome = parse(&["09:15:30 Airtime NGN 1,000.00"]);
        assert!(outcome.statement.transactions.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_amount_below_balance_is_labelled_credit() {
        let outcome = parse(&["10:00:00 POS/Shop NGN 10,000.00 NGN 500.00"]);
        let txn = &outcome.statement.transactions[0];
        assert_eq!(txn.transaction_type, TransactionType::Credit);
        assert_eq!(txn.balance, "NGN 10,000.00");
        assert_eq!(txn.amount, "NGN 500.00");
    }

    #[test]
    fn test_amount_above_balance_is_labelled_debit() {
        let outcome = parse(&["09:15:30 Top up NGN 1,000.00 NGN 1,500.00"]);
        let txn = &outcome.statement.transactions[0];
        assert_eq!(txn.time, "09:15:30");
        assert_eq!(txn.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_credit_word_is_labelled_debit() {
        let outcome = parse(&["09:15:30 Wallet credit NGN 1,000.00 NGN 10.00"]);
        assert_eq!(
            outcome.statement.transactions[0].transaction_type,
            TransactionType::Debit
        );
    }

    #[test]
    fn test_description_and_counterparty() {
        let outcome = parse(&["09:00:00 Transfer to John/Ref NGN 200.00 NGN 50.00"]);
        let txn = &outcome.statement.transactions[0];
        assert_eq!(txn.description, "Transfer to John/Ref");
        assert_eq!(txn.to_from, "Transfer to John");
        assert_eq!(txn.transaction_reference, "Unknown");
    }

    #[test]
    fn test_fallback_date_before_first_heading() {
        let outcome = parse(&[
            "09:00:00 Early NGN 200.00 NGN 50.00",
            "March 5, 2025",
            "10:00:00 Later NGN 150.00 NGN 50.00",
        ]);
        let txns = &outcome.statement.transactions;
        assert_eq!(txns[0].date, "2025-03-05");
        assert_eq!(txns[1].date, "March 5, 2025");
    }

    #[test]
    fn test_date_heading_carries_until_replaced() {
        let outcome = parse(&[
            "March 5, 2025",
            "09:00:00 A NGN 200.00 NGN 50.00",
            "09:10:00 B NGN 150.00 NGN 50.00",
            "April 1, 2025",
            "09:20:00 C NGN 100.00 NGN 50.00",
        ]);
        let dates: Vec<_> = outcome
            .statement
            .transactions
            .iter()
            .map(|t| t.date.as_str())
            .collect();
        assert_eq!(dates, vec!["March 5, 2025", "March 5, 2025", "April 1, 2025"]);
    }

    #[test]
    fn test_malformed_line_is_skipped_and_scan_continues() {
        let outcome = parse(&[
            "09:00:00 Good NGN 200.00 NGN 50.00",
            "09:05:00 Bad NGN 99999999999999999999999999999999999999999.00 NGN 1.00",
            "09:10:00 Also good NGN 150.00 NGN 50.00",
        ]);

        assert_eq!(outcome.statement.transactions.len(), 2);
        assert_eq!(outcome.statement.transactions[1].to_from, "Also good");

        assert_eq!(outcome.diagnostics.len(), 1);
        let diagnostic = &outcome.diagnostics[0];
        assert_eq!(diagnostic.line_number, 2);
        assert!(diagnostic.line.contains("Bad"));
        assert!(diagnostic.reason.contains("invalid amount"));
    }

    #[test]
    fn test_balance_default_and_reset_without_amount() {
        let outcome = parse(&["Closing Balance NGN 7,000.00", "Closing Balance pending"]);
        assert_eq!(outcome.statement.closing_balance, "NGN 0.00");
    }

    #[test]
    fn test_last_header_value_wins() {
        let outcome = parse(&["Account Number 111", "Account Number 222"]);
        assert_eq!(outcome.statement.account_number, "222");
    }

    #[test]
    fn test_header_as_last_line() {
        let outcome = parse(&["Account Number 1", "Wallet Statement"]);
        assert_eq!(outcome.statement.account_holder, "Unknown");
    }

    #[test]
    fn test_idempotent() {
        let parser = parser();
        let first = parser.parse_text(SAMPLE_STATEMENT);
        let second = parser.parse_text(SAMPLE_STATEMENT);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.statement).unwrap(),
            serde_json::to_string(&second.statement).unwrap()
        );
    }

    #[test]
    fn test_scans_do_not_share_date_context() {
        let parser = parser();
        let _ = parser.parse_lines(&["March 5, 2025", "09:00:00 A NGN 200.00 NGN 50.00"]);
        let second = parser.parse_lines(&["09:00:00 B NGN 200.00 NGN 50.00"]);
        assert_eq!(second.statement.transactions[0].date, "2025-03-05");
    }

    #[test]
    fn test_parallel_scans() {
        let parser = parser();
        let expected = parser.parse_text(SAMPLE_STATEMENT);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| parser.parse_text(SAMPLE_STATEMENT)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[rstest]
    #[case("KES", "09:00:00 Send/Ann KES 2,000.00 KES 100.00", "KES 2,000.00")]
    #[case("NGN", "09:00:00 Send/Ann KES 2,000.00 KES 100.00", "")]
    fn test_custom_currency(#[case] currency: &str, #[case] line: &str, #[case] balance: &str) {
        let config = ExtractorConfig {
            currency: currency.to_string(),
            ..ExtractorConfig::default()
        };
        let outcome = WalletParser::new(config).unwrap().parse_lines(&[line]);

        match outcome.statement.transactions.first() {
            Some(txn) => assert_eq!(txn.balance, balance),
            None => assert!(balance.is_empty()),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            fallback_date: "soon".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(WalletParser::new(config).is_err());
    }

    #[test]
    fn test_records_read_back_as_values() {
        let outcome = parser().parse_text(SAMPLE_STATEMENT);
        let last = outcome.statement.transactions.last().unwrap();
        assert_eq!(last.amount_value().unwrap(), Decimal::from_str("3750.00").unwrap());
        assert_eq!(last.balance_value().unwrap(), Decimal::from_str("9250.00").unwrap());
        assert_eq!(
            last.posted_on().unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
        );
    }
}
