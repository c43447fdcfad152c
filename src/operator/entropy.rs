//! Shannon entropy in bits over code point frequencies, rounded to 3 decimals.

use std::collections::HashMap;

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    OperatorValue::Measure(shannon_entropy(input))
}

pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, u64> = HashMap::new();
    let mut length = 0u64;
    for c in text.chars() {
        *counts.entry(c).or_default() += 1;
        length += 1;
    }
    if length == 0 {
        return 0.0;
    }

    let length = length as f64;
    let entropy: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / length;
            -p * p.log2()
        })
        .sum();

    // Single-symbol input sums to -0.0
    ((entropy * 1000.0).round() / 1000.0).abs()
}
