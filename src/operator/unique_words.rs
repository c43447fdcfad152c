//! Number of distinct whitespace-separated words.

use std::collections::HashSet;

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    let distinct: HashSet<&str> = input.split_whitespace().collect();
    OperatorValue::Count(distinct.len() as u64)
}
