//! Copy a seqrepo instance into a DynamoDB table.

use aws_sdk_dynamodb::Client;
use futures::StreamExt;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

use super::instance::SeqRepoInstance;
use super::rows::{open_read_only, stream_fastadir, stream_seqaliases};
use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::item_operations::{execute_put_item, fastadir_item, seq_alias_item};
use crate::table_operations::execute_create_table_if_not_exists;

const PROGRESS_EVERY: usize = 10_000;

/// Item counts written by one import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub table: String,
    pub aliases: usize,
    pub fastadir_entries: usize,
    pub duration_ms: f64,
}

/// Create `table` if needed, then stream every alias and sequence entry of
/// `instance` into it, one PutItem per row.
pub async fn execute_import(
    client: &Client,
    instance: &SeqRepoInstance,
    table: &str,
    max_wait: Duration,
) -> Result<ImportSummary, StoreError> {
    let start = Instant::now();
    execute_create_table_if_not_exists(client, table, max_wait).await?;

    let mut summary = ImportSummary {
        table: table.to_string(),
        ..Default::default()
    };

    let aliases = open_read_only(&instance.aliases_db).await?;
    let mut rows = stream_seqaliases(&aliases);
    while let Some(row) = rows.next().await {
        execute_put_item(client, table, seq_alias_item(&row?)).await?;
        summary.aliases += 1;
        if summary.aliases % PROGRESS_EVERY == 0 {
            info!(table, aliases = summary.aliases, "importing seqaliases");
        }
    }
    drop(rows);
    aliases.close().await;
    info!(table, aliases = summary.aliases, "seqaliases imported");

    let sequences = open_read_only(&instance.sequences_db).await?;
    let mut rows = stream_fastadir(&sequences);
    while let Some(row) = rows.next().await {
        execute_put_item(client, table, fastadir_item(&row?)).await?;
        summary.fastadir_entries += 1;
        if summary.fastadir_entries % PROGRESS_EVERY == 0 {
            info!(table, entries = summary.fastadir_entries, "importing fastadir");
        }
    }
    drop(rows);
    sequences.close().await;
    info!(table, entries = summary.fastadir_entries, "fastadir imported");

    summary.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(summary)
}

impl StoreClient {
    /// Import the seqrepo instance at `root` into `table`.
    pub fn import_seqrepo(&self, root: &Path, table: &str) -> Result<ImportSummary, StoreError> {
        let instance = SeqRepoInstance::open(root)?;
        info!(table, root = %instance.root.display(), "importing seqrepo instance");
        self.block_on(execute_import(
            self.inner(),
            &instance,
            table,
            self.table_wait_timeout(),
        ))
    }
}
