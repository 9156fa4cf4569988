/// Splits extracted text into trimmed lines, dropping blank ones.
pub fn preprocess(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("   \n\t\n", vec![])]
    #[case("Wallet Statement\nAda Obi", vec!["Wallet Statement", "Ada Obi"])]
    #[case("  a  \r\n\r\n b\n\n\nc  ", vec!["a", "b", "c"])]
    #[case("one line", vec!["one line"])]
    fn test_preprocess(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(preprocess(text), expected);
    }

    #[test]
    fn test_preprocess_keeps_inner_spacing() {
        let lines = preprocess("  09:00:00  Transfer   NGN 1.00  ");
        assert_eq!(lines, vec!["09:00:00  Transfer   NGN 1.00"]);
    }
}
