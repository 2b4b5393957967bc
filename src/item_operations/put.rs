//! Put item operation and the seqrepo item layouts.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::import_operations::{FastadirEntry, SeqAlias};
use crate::scan_operations::Item;
use crate::table_operations::{PK_NAME, SK_NAME};

/// Partition key value for alias items.
pub const SEQALIAS_TYPE: &str = "seqalias";

/// Partition key value for sequence storage items.
pub const FASTADIR_TYPE: &str = "fastadir";

/// Alias item: `type` = "seqalias", `name` = "<namespace>:<alias>".
pub fn seq_alias_item(alias: &SeqAlias) -> Item {
    HashMap::from([
        (PK_NAME.to_string(), AttributeValue::S(SEQALIAS_TYPE.to_string())),
        (
            SK_NAME.to_string(),
            AttributeValue::S(format!("{}:{}", alias.namespace, alias.alias)),
        ),
        ("seq_id".to_string(), AttributeValue::S(alias.seq_id.clone())),
        ("namespace".to_string(), AttributeValue::S(alias.namespace.clone())),
        ("alias".to_string(), AttributeValue::S(alias.alias.clone())),
        ("added".to_string(), AttributeValue::S(alias.added.clone())),
        ("current".to_string(), AttributeValue::Bool(alias.is_current != 0)),
    ])
}

/// Sequence storage item: `type` = "fastadir", `name` = the sequence id.
pub fn fastadir_item(entry: &FastadirEntry) -> Item {
    HashMap::from([
        (PK_NAME.to_string(), AttributeValue::S(FASTADIR_TYPE.to_string())),
        (SK_NAME.to_string(), AttributeValue::S(entry.seq_id.clone())),
        ("len".to_string(), AttributeValue::N(entry.len.to_string())),
        ("alpha".to_string(), AttributeValue::S(entry.alpha.clone())),
        ("added".to_string(), AttributeValue::S(entry.added.clone())),
        ("relpath".to_string(), AttributeValue::S(entry.relpath.clone())),
    ])
}

/// Core async PutItem call.
pub async fn execute_put_item(client: &Client, table: &str, item: Item) -> Result<(), StoreError> {
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|source| StoreError::PutItem {
            table: table.to_string(),
            source,
        })?;
    Ok(())
}

impl StoreClient {
    pub fn put_seq_alias(&self, table: &str, alias: &SeqAlias) -> Result<(), StoreError> {
        self.block_on(execute_put_item(self.inner(), table, seq_alias_item(alias)))
    }

    pub fn put_fastadir_entry(&self, table: &str, entry: &FastadirEntry) -> Result<(), StoreError> {
        self.block_on(execute_put_item(self.inner(), table, fastadir_item(entry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubDynamo, service_error};
    use serde_json::json;

    fn alias() -> SeqAlias {
        SeqAlias {
            seq_id: "Ya6Rs7DHhDeg7YaOSg1EoNi3U_nQ9SvO".to_string(),
            namespace: "refseq".to_string(),
            alias: "NC_000001.11".to_string(),
            added: "2016-08-27 21:17:00".to_string(),
            is_current: 1,
        }
    }

    #[test]
    fn alias_item_keys_on_namespaced_alias() {
        let item = seq_alias_item(&alias());

        assert_eq!(item[PK_NAME], AttributeValue::S("seqalias".to_string()));
        assert_eq!(item[SK_NAME], AttributeValue::S("refseq:NC_000001.11".to_string()));
        assert_eq!(
            item["seq_id"],
            AttributeValue::S("Ya6Rs7DHhDeg7YaOSg1EoNi3U_nQ9SvO".to_string())
        );
        assert_eq!(item["current"], AttributeValue::Bool(true));
    }

    #[test]
    fn retired_alias_is_not_current() {
        let retired = SeqAlias {
            is_current: 0,
            ..alias()
        };

        assert_eq!(seq_alias_item(&retired)["current"], AttributeValue::Bool(false));
    }

    #[test]
    fn fastadir_item_keys_on_sequence_id() {
        let entry = FastadirEntry {
            seq_id: "SQ.abc".to_string(),
            len: 248956422,
            alpha: "ACGNT".to_string(),
            added: "2016-08-27 21:17:00".to_string(),
            relpath: "2016/0827/2117/1472332652.87".to_string(),
        };

        let item = fastadir_item(&entry);

        assert_eq!(item[PK_NAME], AttributeValue::S("fastadir".to_string()));
        assert_eq!(item[SK_NAME], AttributeValue::S("SQ.abc".to_string()));
        assert_eq!(item["len"], AttributeValue::N("248956422".to_string()));
    }

    #[test]
    fn live_put_sends_item() {
        let stub = StubDynamo::start(|_, _| (200, json!({})));

        stub.client().put_seq_alias("seqrepo", &alias()).unwrap();

        let requests = stub.requests();
        assert_eq!(stub.operations(), vec!["PutItem"]);
        assert_eq!(requests[0].body["TableName"], "seqrepo");
        assert_eq!(
            requests[0].body["Item"]["name"],
            json!({ "S": "refseq:NC_000001.11" })
        );
        assert_eq!(requests[0].body["Item"]["current"], json!({ "BOOL": true }));
    }

    #[test]
    fn live_put_failure_names_table() {
        let stub = StubDynamo::start(|_, _| service_error("ValidationException", "bad key"));

        let err = stub.client().put_seq_alias("seqrepo", &alias()).unwrap_err();

        assert!(matches!(err, StoreError::PutItem { .. }));
        assert_eq!(err.service_code(), Some("ValidationException"));
        assert_eq!(err.table(), Some("seqrepo"));
    }
}
