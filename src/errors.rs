//! Error types for seqstore.
//!
//! Every store failure keeps the untouched SDK error as its `source`, tagged
//! with the operation and table it came from. Display strings are derived from
//! typed `SdkError` variants and `ProvideErrorMetadata`, never from parsing
//! debug output.

use aws_sdk_dynamodb::error::{BuildError, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used for waiter failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("failed to start tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to build request: {0}")]
    Build(#[from] BuildError),

    #[error("scan of table '{table}' failed: {}", sdk_reason(.source))]
    Scan {
        table: String,
        #[source]
        source: SdkError<ScanError>,
    },

    #[error("delete of table '{table}' failed: {}", sdk_reason(.source))]
    DeleteTable {
        table: String,
        #[source]
        source: SdkError<DeleteTableError>,
    },

    #[error("describe of table '{table}' failed: {}", sdk_reason(.source))]
    DescribeTable {
        table: String,
        #[source]
        source: SdkError<DescribeTableError>,
    },

    #[error("create of table '{table}' failed: {}", sdk_reason(.source))]
    CreateTable {
        table: String,
        #[source]
        source: SdkError<CreateTableError>,
    },

    #[error("put item into table '{table}' failed: {}", sdk_reason(.source))]
    PutItem {
        table: String,
        #[source]
        source: SdkError<PutItemError>,
    },

    #[error("list tables failed: {}", sdk_reason(.source))]
    ListTables {
        #[source]
        source: SdkError<ListTablesError>,
    },

    #[error("waiting for table '{table}' to {condition} failed: {source}")]
    Wait {
        table: String,
        condition: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("failed to write output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot convert attribute: {0}")]
    Conversion(String),

    #[error("'{}' is not a seqrepo instance: {reason}", .path.display())]
    InvalidSeqRepo { path: PathBuf, reason: String },

    #[error("sqlite read failed: {0}")]
    Sqlite(#[from] sqlx::Error),
}

impl StoreError {
    /// Error code reported by the service, when the failure came from DynamoDB itself.
    pub fn service_code(&self) -> Option<&str> {
        match self {
            StoreError::Scan { source, .. } => service_code_of(source),
            StoreError::DeleteTable { source, .. } => service_code_of(source),
            StoreError::DescribeTable { source, .. } => service_code_of(source),
            StoreError::CreateTable { source, .. } => service_code_of(source),
            StoreError::PutItem { source, .. } => service_code_of(source),
            StoreError::ListTables { source } => service_code_of(source),
            _ => None,
        }
    }

    /// True when the table named in the request does not exist.
    pub fn is_resource_not_found(&self) -> bool {
        self.service_code() == Some("ResourceNotFoundException")
    }

    /// Table the failed request was addressed to, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            StoreError::Scan { table, .. }
            | StoreError::DeleteTable { table, .. }
            | StoreError::DescribeTable { table, .. }
            | StoreError::CreateTable { table, .. }
            | StoreError::PutItem { table, .. }
            | StoreError::Wait { table, .. } => Some(table),
            _ => None,
        }
    }
}

fn service_code_of<E, R>(err: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(ProvideErrorMetadata::code)
}

const MISSING_CREDENTIALS: &str = "no AWS credentials found, configure a profile or \
    AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY, or use --local for DynamoDB Local";

/// Identity resolution failures surface as dispatch or construction errors
/// whose debug output names the credentials provider.
fn mentions_credentials(debug: &str) -> bool {
    let lower = debug.to_ascii_lowercase();
    lower.contains("credential") || lower.contains("no identity")
}

/// Human readable reason for an `SdkError`, based on its typed variant.
pub fn sdk_reason<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::fmt::Debug + std::fmt::Display,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(dispatch) => {
            if mentions_credentials(&format!("{:?}", dispatch)) {
                MISSING_CREDENTIALS.to_string()
            } else if dispatch.is_timeout() {
                "connection timed out, check your network or endpoint".to_string()
            } else if dispatch.is_io() {
                "connection failed (I/O error), check if the endpoint is reachable".to_string()
            } else {
                "connection failed, check if the endpoint is reachable".to_string()
            }
        }
        SdkError::TimeoutError(_) => {
            "connection timed out, check your network or endpoint".to_string()
        }
        SdkError::ConstructionFailure(inner) => {
            let msg = format!("{:?}", inner);
            if mentions_credentials(&msg) {
                MISSING_CREDENTIALS.to_string()
            } else {
                format!("request construction failed: {}", msg)
            }
        }
        SdkError::ResponseError(inner) => format!("invalid response: {:?}", inner),
        SdkError::ServiceError(service) => {
            let inner = service.err();
            match (inner.code(), inner.message()) {
                (Some(code), Some(message)) => format!("{}: {}", code, message),
                (Some(code), None) => code.to_string(),
                _ => inner.to_string(),
            }
        }
        _ => format!("unknown error: {:?}", err),
    }
}
