//! Operation metrics collected while talking to DynamoDB.

use serde::Serialize;

/// Timing and capacity numbers for one logical operation.
///
/// A logical operation may span several requests (a paginated scan issues one
/// request per page), so counters are summed across all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationMetrics {
    /// Wall time of the whole operation in milliseconds.
    pub duration_ms: f64,
    /// Number of requests issued.
    pub pages: usize,
    /// Items returned to the caller.
    pub items: usize,
    /// Items the store evaluated before applying filters.
    pub scanned_count: usize,
    /// Read capacity units consumed, if the store reported any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_rcu: Option<f64>,
}

impl OperationMetrics {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ..Default::default()
        }
    }

    /// Fold one page of results into the running totals.
    pub fn record_page(&mut self, items: usize, scanned_count: usize, rcu: Option<f64>) {
        self.pages += 1;
        self.items += items;
        self.scanned_count += scanned_count;
        if let Some(units) = rcu {
            *self.consumed_rcu.get_or_insert(0.0) += units;
        }
    }
}
