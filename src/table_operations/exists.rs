//! Check if a table exists.

use aws_sdk_dynamodb::Client;

use crate::client::StoreClient;
use crate::errors::StoreError;

/// DescribeTable; a missing table is `Ok(false)`, anything else propagates.
pub async fn execute_table_exists(client: &Client, table: &str) -> Result<bool, StoreError> {
    match client.describe_table().table_name(table).send().await {
        Ok(_) => Ok(true),
        Err(e)
            if e
                .as_service_error()
                .is_some_and(|se| se.is_resource_not_found_exception()) =>
        {
            Ok(false)
        }
        Err(source) => Err(StoreError::DescribeTable {
            table: table.to_string(),
            source,
        }),
    }
}

impl StoreClient {
    pub fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        self.block_on(execute_table_exists(self.inner(), table))
    }
}
