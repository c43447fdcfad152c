//! Canonical form of the input text, consumed downstream as
//! `deps.normalized`.
//!
//! Applies NFKC, strips combining marks, lowercases and collapses runs of
//! whitespace to a single space. Output that ends up empty is reported as
//! `null` so that consumers fall back to the raw `text`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    OperatorValue::Text(normalize(input))
}

pub fn normalize(text: &str) -> Option<String> {
    // Decompose after NFKC so accents become separate marks we can drop
    let stripped: String = text
        .nfkc()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();

    let lowered = stripped.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_forms_folded() {
        assert_eq!(normalize("ﬁ").as_deref(), Some("fi"));
        assert_eq!(normalize("ＡＢＣ").as_deref(), Some("abc"));
        assert_eq!(normalize("x²").as_deref(), Some("x2"));
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(normalize("Café").as_deref(), Some("cafe"));
        assert_eq!(normalize("Cafe\u{0301}").as_deref(), Some("cafe"));
        assert_eq!(normalize("Ångström").as_deref(), Some("angstrom"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            normalize("  Hello \t\n World  ").as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn test_empty_result_is_null() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   \t "), None);
        assert_eq!(normalize("\u{0301}"), None);
        assert_eq!(compute(""), OperatorValue::Text(None));
    }

    #[test]
    fn test_punctuation_kept() {
        assert_eq!(normalize("Hi, there!").as_deref(), Some("hi, there!"));
    }
}
