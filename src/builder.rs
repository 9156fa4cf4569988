use std::fs;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::ExtractorConfig, errors::StatementParseError, parsers::prelude::*,
    types::{ParseOutcome, StatementRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "text")]
    Text,
}

impl FileFormat {
    fn read_text(&self, content: &[u8]) -> Result<String, StatementParseError> {
        match self {
            FileFormat::Pdf => PdfReader::read_text(content),
            FileFormat::Text => TextReader::read_text(content),
        }
        .map_err(StatementParseError::ExtractionFailed)
    }

    fn parse(
        &self,
        content: &[u8],
        parser: &WalletParser,
    ) -> Result<ParseOutcome, StatementParseError> {
        let text = self.read_text(content)?;
        Ok(parser.parse_text(&text))
    }

    fn detect(filename: Option<&str>, content: &[u8]) -> Result<Self, StatementParseError> {
        if PdfReader::is_supported(filename, content) {
            return Ok(FileFormat::Pdf);
        }

        if TextReader::is_supported(filename, content) {
            return Ok(FileFormat::Text);
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    config: Option<ExtractorConfig>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl AsRef<[u8]>) -> Self {
        self.content = Some(content.as_ref().to_vec());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn config(mut self, config: ExtractorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn parse(self) -> Result<StatementRecord, StatementParseError> {
        self.parse_with_diagnostics().map(|outcome| outcome.statement)
    }

    pub fn parse_with_diagnostics(self) -> Result<ParseOutcome, StatementParseError> {
        let parser = WalletParser::new(self.config.unwrap_or_default())?;

        let content = self
            .content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .as_deref()
                    .ok_or(StatementParseError::MissingContentAndFilepath)
                    .and_then(|path| fs::read(path).map_err(Into::into))
            })?;

        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(self.filepath.as_deref(), &content))?;
        debug!("Reading {} byte statement as {:?}", content.len(), format);

        format.parse(&content, &parser)
    }
}
