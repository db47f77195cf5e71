//! Text normalization into canonical printable ASCII

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x20-\x7E\n]").expect("Invalid non-printable regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Text containing only printable ASCII and single spaces, with no
/// leading or trailing whitespace. Only produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.0.split(' ').filter(|w| !w.is_empty()).count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize extracted text.
///
/// Every character outside `0x20..=0x7E` (other than `\n`) becomes a space,
/// whitespace runs collapse to one space and the result is trimmed.
/// Normalizing already-normalized text is a no-op.
pub fn normalize(raw: &str) -> NormalizedText {
    if raw.is_empty() {
        return NormalizedText::default();
    }

    let printable = NON_PRINTABLE.replace_all(raw, " ");
    let collapsed = WHITESPACE.replace_all(&printable, " ");
    NormalizedText(collapsed.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_newlines() {
        let text = normalize("  Senior   Engineer\n\n\tPython\r\nSQL  ");
        assert_eq!(text.as_str(), "Senior Engineer Python SQL");
    }

    #[test]
    fn test_replaces_non_ascii_and_control_characters() {
        let text = normalize("caf\u{e9}\u{0007}bar \u{2022} Rust\u{2014}Go");
        assert_eq!(text.as_str(), "caf bar Rust Go");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \n\t \u{00a0} ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "  lots   of\n\nspace ",
            "\u{feff}BOM prefixed \u{1F600} emoji",
            "tabs\tand\x0bvertical\x0cfeeds",
        ];

        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "normalize not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_output_alphabet() {
        let text = normalize("Ünïcödé\u{0}\u{1b}[31m ansi\r\n\u{7f} end");

        assert!(text
            .as_str()
            .chars()
            .all(|c| c == ' ' || ('\x21'..='\x7e').contains(&c)));
        assert!(!text.as_str().contains("  "));
        assert!(!text.as_str().starts_with(' '));
        assert!(!text.as_str().ends_with(' '));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(normalize("one  two\nthree").word_count(), 3);
        assert_eq!(normalize("").word_count(), 0);
    }
}
