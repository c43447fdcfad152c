//! Palindrome check over ASCII letters and digits, ignoring case.
//!
//! Every other character is skipped, non-ASCII letters included. Input with
//! nothing left to compare (including `""`) is a palindrome.

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    OperatorValue::Flag(is_palindrome(input))
}

pub fn is_palindrome(text: &str) -> bool {
    let cleaned: Vec<char> = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    cleaned.iter().eq(cleaned.iter().rev())
}
