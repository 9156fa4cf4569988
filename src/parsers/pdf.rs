use std::panic::{self, AssertUnwindSafe};

use crate::parsers::traits::DocumentReader;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// PDF statements, flattened to text with `pdf-extract`.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        if let Some(name) = filename {
            if name.to_lowercase().ends_with(".pdf") {
                return true;
            }
        }

        content.starts_with(PDF_MAGIC)
    }

    fn read_text(content: &[u8]) -> Result<String, String> {
        // pdf-extract panics on some malformed documents instead of erroring.
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(content)
        }))
        .map_err(|_| "PDF parse error: extractor aborted on malformed document".to_string())?;

        extracted.map_err(|e| format!("PDF parse error: {}", e))
    }
}
