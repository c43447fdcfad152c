//! Number of distinct Unicode scalar values.

use std::collections::HashSet;

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    let distinct: HashSet<char> = input.chars().collect();
    OperatorValue::Count(distinct.len() as u64)
}
