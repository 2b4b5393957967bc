//! Delete table operation.

use aws_sdk_dynamodb::Client;
use tracing::info;

use super::wait::wait_for_table_absent;
use crate::client::StoreClient;
use crate::errors::StoreError;

/// Table deletion primitives, as exposed by a store client.
pub trait TableAdmin {
    type Error;

    /// Ask the store to delete `table`. Returns once the request is accepted.
    fn delete_table(&self, table: &str) -> Result<(), Self::Error>;

    /// Block until the store reports `table` no longer exists.
    fn wait_until_table_absent(&self, table: &str) -> Result<(), Self::Error>;
}

/// Delete `table` and block until the store confirms it is gone.
///
/// Fails without waiting if the delete request is rejected, for example
/// because the table does not exist.
pub fn drop_table<A>(admin: &A, table: &str) -> Result<(), A::Error>
where
    A: TableAdmin + ?Sized,
{
    admin.delete_table(table)?;
    info!(table, "delete initiated");

    admin.wait_until_table_absent(table)?;
    info!(table, "table deleted");
    Ok(())
}

/// Core async DeleteTable call.
pub async fn execute_delete_table(client: &Client, table: &str) -> Result<(), StoreError> {
    let output = client
        .delete_table()
        .table_name(table)
        .send()
        .await
        .map_err(|source| StoreError::DeleteTable {
            table: table.to_string(),
            source,
        })?;

    let status = output
        .table_description()
        .and_then(|d| d.table_status())
        .map(|s| s.as_str().to_string());
    info!(table, status = status.as_deref().unwrap_or("unknown"), "delete accepted");
    Ok(())
}

impl TableAdmin for StoreClient {
    type Error = StoreError;

    fn delete_table(&self, table: &str) -> Result<(), StoreError> {
        self.block_on(execute_delete_table(self.inner(), table))
    }

    fn wait_until_table_absent(&self, table: &str) -> Result<(), StoreError> {
        self.block_on(wait_for_table_absent(
            self.inner(),
            table,
            self.table_wait_timeout(),
        ))
    }
}

impl StoreClient {
    /// Delete `table` and wait for the deletion to complete.
    pub fn drop_table(&self, table: &str) -> Result<(), StoreError> {
        drop_table(self, table)
    }
}
