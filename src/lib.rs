//! seqstore: import, scan and drop DynamoDB tables backing a seqrepo store.
//!
//! The two core operations are written against small traits so they can run
//! against a live table or any other paged store:
//!
//! - [`fetch_all`] reads every item by following continuation tokens
//!   through a [`ScanPager`].
//! - [`drop_table`] deletes a table and blocks until a [`TableAdmin`]
//!   confirms it is gone.
//!
//! [`StoreClient`] implements both traits on top of `aws-sdk-dynamodb`, and
//! fills a table from a seqrepo instance's sqlite databases with
//! [`StoreClient::import_seqrepo`].

pub mod client;
pub mod conversions;
pub mod errors;
pub mod import_operations;
pub mod item_operations;
pub mod metrics;
pub mod scan_operations;
pub mod table_operations;

#[cfg(test)]
mod test_support;

pub use client::{ClientConfig, StoreClient};
pub use errors::StoreError;
pub use import_operations::{ImportSummary, SeqRepoInstance};
pub use metrics::OperationMetrics;
pub use scan_operations::{Item, ScanPage, ScanPager, StartKey, fetch_all, fetch_all_with_metrics};
pub use table_operations::{TableAdmin, drop_table};

/// Table name used by the seqrepo importer.
pub const DEFAULT_TABLE: &str = "seqrepo";

/// Endpoint of the DynamoDB Local instance the importer talks to by default.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8001";
