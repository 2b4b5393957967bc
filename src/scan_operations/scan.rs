//! Scan against a live DynamoDB table.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::ReturnConsumedCapacity;

use super::paginate::{
    Item, ScanPage, ScanPager, StartKey, fetch_all, fetch_all_with_metrics,
};
use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::metrics::OperationMetrics;

/// Core async scan of one page.
pub async fn execute_scan_page(
    client: &Client,
    table: &str,
    start_key: Option<StartKey>,
) -> Result<ScanPage, StoreError> {
    let output = client
        .scan()
        .table_name(table)
        .set_exclusive_start_key(start_key)
        .return_consumed_capacity(ReturnConsumedCapacity::Total)
        .send()
        .await
        .map_err(|source| StoreError::Scan {
            table: table.to_string(),
            source,
        })?;

    let consumed_rcu = output.consumed_capacity().and_then(|c| c.capacity_units());
    let scanned_count = usize::try_from(output.scanned_count()).unwrap_or(0);

    Ok(ScanPage {
        items: output.items.unwrap_or_default(),
        last_evaluated_key: output.last_evaluated_key,
        scanned_count,
        consumed_rcu,
    })
}

impl ScanPager for StoreClient {
    type Error = StoreError;

    fn scan_page(
        &self,
        table: &str,
        start_key: Option<StartKey>,
    ) -> Result<ScanPage, StoreError> {
        self.block_on(execute_scan_page(self.inner(), table, start_key))
    }
}

impl StoreClient {
    /// Read every item of `table`, one scan page at a time.
    pub fn fetch_all(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        fetch_all(self, table)
    }

    /// Read every item of `table` and report page and capacity totals.
    pub fn fetch_all_with_metrics(
        &self,
        table: &str,
    ) -> Result<(Vec<Item>, OperationMetrics), StoreError> {
        fetch_all_with_metrics(self, table)
    }
}
