//! Create the seqrepo table.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use std::time::Duration;
use tracing::info;

use super::exists::execute_table_exists;
use super::wait::wait_for_table_active;
use crate::client::StoreClient;
use crate::errors::StoreError;

/// Partition key: the object type, e.g. "seqalias" or "fastadir".
pub const PK_NAME: &str = "type";

/// Sort key: namespaced identifier or alias, e.g. "refseq:NC_000001.11".
pub const SK_NAME: &str = "name";

/// Key schema and attribute definitions for a seqrepo table.
pub fn seqrepo_key_schema()
-> Result<(Vec<KeySchemaElement>, Vec<AttributeDefinition>), StoreError> {
    let key_schema = vec![
        KeySchemaElement::builder()
            .attribute_name(PK_NAME)
            .key_type(KeyType::Hash)
            .build()?,
        KeySchemaElement::builder()
            .attribute_name(SK_NAME)
            .key_type(KeyType::Range)
            .build()?,
    ];

    let attribute_definitions = vec![
        AttributeDefinition::builder()
            .attribute_name(PK_NAME)
            .attribute_type(ScalarAttributeType::S)
            .build()?,
        AttributeDefinition::builder()
            .attribute_name(SK_NAME)
            .attribute_type(ScalarAttributeType::S)
            .build()?,
    ];

    Ok((key_schema, attribute_definitions))
}

/// Create `table` unless it already exists, then wait for it to become active.
///
/// Returns `true` if the table was created by this call.
pub async fn execute_create_table_if_not_exists(
    client: &Client,
    table: &str,
    max_wait: Duration,
) -> Result<bool, StoreError> {
    if execute_table_exists(client, table).await? {
        info!(table, "table already exists");
        return Ok(false);
    }

    let (key_schema, attribute_definitions) = seqrepo_key_schema()?;

    client
        .create_table()
        .table_name(table)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|source| StoreError::CreateTable {
            table: table.to_string(),
            source,
        })?;
    info!(table, "create initiated");

    wait_for_table_active(client, table, max_wait).await?;
    info!(table, "table active");
    Ok(true)
}

impl StoreClient {
    pub fn create_table_if_not_exists(&self, table: &str) -> Result<bool, StoreError> {
        self.block_on(execute_create_table_if_not_exists(
            self.inner(),
            table,
            self.table_wait_timeout(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_uses_type_and_name_keys() {
        let (keys, attrs) = seqrepo_key_schema().unwrap();

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].attribute_name(), PK_NAME);
        assert_eq!(keys[0].key_type(), &KeyType::Hash);
        assert_eq!(keys[1].attribute_name(), SK_NAME);
        assert_eq!(keys[1].key_type(), &KeyType::Range);

        // Every key attribute needs a definition.
        for key in &keys {
            let def = attrs
                .iter()
                .find(|a| a.attribute_name() == key.attribute_name())
                .unwrap();
            assert_eq!(def.attribute_type(), &ScalarAttributeType::S);
        }
    }
}
