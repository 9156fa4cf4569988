use crate::parsers::traits::DocumentReader;

/// Statement text that was already extracted upstream, stored as UTF-8.
pub struct TextReader;

impl DocumentReader for TextReader {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        let has_txt_extension = filename
            .map(|name| name.to_lowercase().ends_with(".txt"))
            .unwrap_or(false);

        has_txt_extension || (!content.is_empty() && std::str::from_utf8(content).is_ok())
    }

    fn read_text(content: &[u8]) -> Result<String, String> {
        let text = std::str::from_utf8(content).map_err(|e| format!("Invalid UTF-8 text: {}", e))?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}
