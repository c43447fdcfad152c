//! Shared application state for request handlers.

use std::sync::Arc;

use crate::metrics::OperatorMetrics;
use crate::operator::Operator;

/// Cloned into every handler; the operator is static and the metrics are
/// shared behind an `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub operator: &'static Operator,
    pub metrics: Arc<OperatorMetrics>,
    /// Cap on `/op` body size; `None` accepts any size
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(operator: &'static Operator) -> Self {
        Self {
            operator,
            metrics: Arc::new(OperatorMetrics::new(operator.metric_prefix)),
            max_body_bytes: None,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: Option<usize>) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
