/// Turns document bytes into the text the statement extractor scans.
pub trait DocumentReader {
    fn read_text(content: &[u8]) -> Result<String, String>;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool;
}
