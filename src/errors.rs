use thiserror::Error;

/// Document-level failures while turning a statement into a [`StatementRecord`](crate::StatementRecord).
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// The document could not be turned into text (detail in the message)
    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),

    /// Neither the content nor the filename identify a readable document
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Reading the document from disk failed
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Extractor configuration rejected before scanning
    #[error("Invalid extractor config: {0}")]
    InvalidConfig(String),

    // ── Record helpers ──────────────────────────────────────────────────────

    /// A transaction date that is neither a statement heading nor ISO
    #[error("Invalid statement date format")]
    DateInvalidFormat,

    /// A formatted money field that does not read back as a decimal
    #[error("Invalid amount format: {0}")]
    AmountInvalidFormat(String),
}

pub type StatementResult<T> = Result<T, StatementParseError>;

/// Why a single transaction line was skipped. Never fatal for the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid amount {raw:?}: {reason}")]
    InvalidAmount { raw: String, reason: String },
}
