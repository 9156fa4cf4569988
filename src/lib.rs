//! Extract account metadata, balances and transactions from wallet statements.
//!
//! ```rust,ignore
//! use wallet_statement_rs::ParserBuilder;
//!
//! let statement = ParserBuilder::new()
//!     .filename("statement.pdf")
//!     .parse()?;
//!
//! println!("{}", serde_json::to_string_pretty(&statement)?);
//! ```
//!
//! Lines that look like transactions but cannot be decomposed are skipped;
//! use [`ParserBuilder::parse_with_diagnostics`] to see them.

mod builder;
mod config;
mod types;

pub mod errors;
pub mod parsers;

pub use builder::{FileFormat, ParserBuilder};
pub use config::ExtractorConfig;
pub use parsers::prelude::*;
pub use types::{LineDiagnostic, ParseOutcome, StatementRecord, TransactionRecord, TransactionType};
