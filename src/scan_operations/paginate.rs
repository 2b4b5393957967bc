//! Cursor-following scan loop.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

use crate::metrics::OperationMetrics;

/// A single record, opaque to this crate.
pub type Item = HashMap<String, AttributeValue>;

/// Continuation token (`LastEvaluatedKey` / `ExclusiveStartKey`).
pub type StartKey = HashMap<String, AttributeValue>;

/// One page of a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<StartKey>,
    pub scanned_count: usize,
    pub consumed_rcu: Option<f64>,
}

impl ScanPage {
    pub fn new(items: Vec<Item>, last_evaluated_key: Option<StartKey>) -> Self {
        Self {
            scanned_count: items.len(),
            items,
            last_evaluated_key,
            consumed_rcu: None,
        }
    }

    /// Take the token to resume from, if more pages remain.
    ///
    /// An empty key map is treated the same as no key.
    pub fn take_next_start_key(&mut self) -> Option<StartKey> {
        self.last_evaluated_key.take().filter(|key| !key.is_empty())
    }
}

/// Anything that can serve one scan page for a table, resuming at `start_key`.
pub trait ScanPager {
    type Error;

    fn scan_page(
        &self,
        table: &str,
        start_key: Option<StartKey>,
    ) -> Result<ScanPage, Self::Error>;
}

/// Read every item of `table`, following continuation tokens until none is returned.
///
/// Items come back in the order the pages were served. The first failing
/// request aborts the loop and its error is returned unchanged.
pub fn fetch_all<P>(pager: &P, table: &str) -> Result<Vec<Item>, P::Error>
where
    P: ScanPager + ?Sized,
{
    fetch_all_with_metrics(pager, table).map(|(items, _)| items)
}

/// Same as [`fetch_all`], also returning page and capacity totals.
pub fn fetch_all_with_metrics<P>(
    pager: &P,
    table: &str,
) -> Result<(Vec<Item>, OperationMetrics), P::Error>
where
    P: ScanPager + ?Sized,
{
    let start = Instant::now();
    let mut metrics = OperationMetrics::default();
    let mut items: Vec<Item> = Vec::new();
    let mut start_key: Option<StartKey> = None;

    loop {
        let mut page = pager.scan_page(table, start_key)?;
        metrics.record_page(page.items.len(), page.scanned_count, page.consumed_rcu);
        start_key = page.take_next_start_key();

        debug!(
            table,
            page = metrics.pages,
            items = page.items.len(),
            more = start_key.is_some(),
            "scan page"
        );
        items.append(&mut page.items);

        if start_key.is_none() {
            break;
        }
    }

    metrics.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        table,
        pages = metrics.pages,
        items = metrics.items,
        duration_ms = metrics.duration_ms,
        "scan complete"
    );

    Ok((items, metrics))
}
