mod lines;
mod parser;
pub(crate) mod rules;
pub mod types;

pub use lines::preprocess;
pub use parser::WalletParser;

pub mod prelude {
    pub use super::WalletParser;
    pub use super::preprocess;
    pub use super::types::{StatementDate, format_amount, parse_amount};
}
