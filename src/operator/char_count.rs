//! Character count: number of Unicode scalar values.

use super::OperatorValue;

pub fn compute(input: &str) -> OperatorValue {
    OperatorValue::Count(input.chars().count() as u64)
}
