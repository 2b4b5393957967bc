//! Table state waiters.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::client::Waiters;
use std::time::Duration;
use tracing::debug;

use crate::errors::StoreError;

/// Poll DescribeTable until the table is gone or `max_wait` runs out.
pub async fn wait_for_table_absent(
    client: &Client,
    table: &str,
    max_wait: Duration,
) -> Result<(), StoreError> {
    debug!(table, max_wait_secs = max_wait.as_secs(), "waiting for table to be deleted");
    client
        .wait_until_table_not_exists()
        .table_name(table)
        .wait(max_wait)
        .await
        .map_err(|e| StoreError::Wait {
            table: table.to_string(),
            condition: "be deleted",
            source: Box::new(e),
        })?;
    Ok(())
}

/// Poll DescribeTable until the table is ACTIVE or `max_wait` runs out.
pub async fn wait_for_table_active(
    client: &Client,
    table: &str,
    max_wait: Duration,
) -> Result<(), StoreError> {
    debug!(table, max_wait_secs = max_wait.as_secs(), "waiting for table to become active");
    client
        .wait_until_table_exists()
        .table_name(table)
        .wait(max_wait)
        .await
        .map_err(|e| StoreError::Wait {
            table: table.to_string(),
            condition: "become active",
            source: Box::new(e),
        })?;
    Ok(())
}
