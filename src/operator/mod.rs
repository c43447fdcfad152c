//! Text operators and their registry.
//!
//! An operator is a pure, total function from the resolved input string to a
//! single value, plus the constants that identify it on the wire and in
//! metrics. The HTTP scaffold is identical for every operator.

pub mod char_count;
pub mod entropy;
pub mod normalizer;
pub mod palindrome;
pub mod unique_chars;
pub mod unique_words;

use serde::{Deserialize, Serialize};

/// Port used by the operators that have no dedicated assignment.
pub const SHARED_DEFAULT_PORT: u16 = 8085;

/// Value produced by an operator, serialized as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperatorValue {
    Count(u64),
    Flag(bool),
    Measure(f64),
    /// Rewritten text; `None` serializes as `null`
    Text(Option<String>),
}

/// Static description of a single operator.
pub struct Operator {
    /// Response key, e.g. `char_count`
    pub key: &'static str,
    /// Prefix for exported metric names
    pub metric_prefix: &'static str,
    /// Port used when neither CLI, `PORT` nor config set one
    pub default_port: u16,
    compute: fn(&str) -> OperatorValue,
}

impl Operator {
    /// Describe an operator hosted outside this crate.
    pub const fn new(
        key: &'static str,
        metric_prefix: &'static str,
        default_port: u16,
        compute: fn(&str) -> OperatorValue,
    ) -> Self {
        Self {
            key,
            metric_prefix,
            default_port,
            compute,
        }
    }

    pub fn compute(&self, input: &str) -> OperatorValue {
        (self.compute)(input)
    }
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("key", &self.key)
            .field("metric_prefix", &self.metric_prefix)
            .field("default_port", &self.default_port)
            .finish_non_exhaustive()
    }
}

pub static CHAR_COUNT: Operator = Operator {
    key: "char_count",
    metric_prefix: "charcount",
    default_port: 8007,
    compute: char_count::compute,
};

pub static PALINDROME: Operator = Operator {
    key: "palindrome",
    metric_prefix: "palindrome",
    default_port: 8011,
    compute: palindrome::compute,
};

pub static UNIQUE_CHARS: Operator = Operator {
    key: "unique_chars",
    metric_prefix: "unique_chars",
    default_port: SHARED_DEFAULT_PORT,
    compute: unique_chars::compute,
};

pub static UNIQUE_WORDS: Operator = Operator {
    key: "unique_words",
    metric_prefix: "unique_words",
    default_port: SHARED_DEFAULT_PORT,
    compute: unique_words::compute,
};

pub static ENTROPY: Operator = Operator {
    key: "entropy",
    metric_prefix: "entropy",
    default_port: SHARED_DEFAULT_PORT,
    compute: entropy::compute,
};

pub static NORMALIZER: Operator = Operator {
    key: "normalized",
    metric_prefix: "normalizer",
    default_port: SHARED_DEFAULT_PORT,
    compute: normalizer::compute,
};

/// Operator selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorKind {
    CharCount,
    Palindrome,
    UniqueChars,
    UniqueWords,
    Entropy,
    Normalizer,
}

impl OperatorKind {
    pub fn operator(self) -> &'static Operator {
        match self {
            OperatorKind::CharCount => &CHAR_COUNT,
            OperatorKind::Palindrome => &PALINDROME,
            OperatorKind::UniqueChars => &UNIQUE_CHARS,
            OperatorKind::UniqueWords => &UNIQUE_WORDS,
            OperatorKind::Entropy => &ENTROPY,
            OperatorKind::Normalizer => &NORMALIZER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serializes_bare() {
        assert_eq!(serde_json::to_string(&OperatorValue::Count(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&OperatorValue::Flag(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&OperatorValue::Measure(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&OperatorValue::Text(Some("ab".into()))).unwrap(),
            r#""ab""#
        );
        assert_eq!(serde_json::to_string(&OperatorValue::Text(None)).unwrap(), "null");
    }

    #[test]
    fn test_kind_from_config_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            operator: OperatorKind,
        }
        let parsed: Wrapper = toml::from_str(r#"operator = "char-count""#).unwrap();
        assert_eq!(parsed.operator, OperatorKind::CharCount);
        let parsed: Wrapper = toml::from_str(r#"operator = "unique-words""#).unwrap();
        assert_eq!(parsed.operator, OperatorKind::UniqueWords);
        let parsed: Wrapper = toml::from_str(r#"operator = "normalizer""#).unwrap();
        assert_eq!(parsed.operator, OperatorKind::Normalizer);
    }

    #[test]
    fn test_registry_keys() {
        assert_eq!(OperatorKind::CharCount.operator().key, "char_count");
        assert_eq!(OperatorKind::Palindrome.operator().key, "palindrome");
        assert_eq!(OperatorKind::UniqueChars.operator().key, "unique_chars");
        assert_eq!(OperatorKind::UniqueWords.operator().key, "unique_words");
        assert_eq!(OperatorKind::Entropy.operator().key, "entropy");
        assert_eq!(OperatorKind::Normalizer.operator().key, "normalized");
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(CHAR_COUNT.default_port, 8007);
        assert_eq!(PALINDROME.default_port, 8011);
        assert_eq!(ENTROPY.default_port, SHARED_DEFAULT_PORT);
    }

    #[test]
    fn test_empty_input_is_total() {
        for kind in [
            OperatorKind::CharCount,
            OperatorKind::Palindrome,
            OperatorKind::UniqueChars,
            OperatorKind::UniqueWords,
            OperatorKind::Entropy,
            OperatorKind::Normalizer,
        ] {
            let op = kind.operator();
            assert_eq!(op.compute(""), op.compute(""), "{} not deterministic", op.key);
        }
    }
}
