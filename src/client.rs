//! DynamoDB client module.
//!
//! Provides a blocking DynamoDB client built from an explicit [`ClientConfig`].
//! Credential sources, in order of priority:
//! - Hardcoded credentials
//! - Static test credentials (local DynamoDB)
//! - AWS profiles
//! - Default chain (environment variables, instance profile, etc.)

use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Credentials;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::errors::StoreError;

/// Region used when neither the config nor the environment names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Upper bound for table waiters: 25 attempts of 20 seconds each.
pub const DEFAULT_TABLE_WAIT_TIMEOUT: Duration = Duration::from_secs(500);

/// Connection settings for [`StoreClient`].
///
/// # Examples
///
/// ```no_run
/// use seqstore::{ClientConfig, StoreClient};
///
/// // Local DynamoDB with dummy credentials
/// let client = StoreClient::new(ClientConfig::local("http://localhost:8001")).unwrap();
///
/// // Named AWS profile in a specific region
/// let config = ClientConfig {
///     region: Some("eu-west-1".to_string()),
///     profile: Some("seqrepo".to_string()),
///     ..Default::default()
/// };
/// let client = StoreClient::new(config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// AWS region (default: AWS_REGION env var, then us-east-1).
    pub region: Option<String>,
    /// Custom endpoint URL for local testing.
    pub endpoint_url: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    /// AWS profile name from ~/.aws/credentials.
    pub profile: Option<String>,
    /// Use fixed dummy credentials, as accepted by DynamoDB Local.
    pub test_credentials: bool,
    /// Maximum time a table waiter polls before giving up.
    pub table_wait_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            access_key: None,
            secret_key: None,
            session_token: None,
            profile: None,
            test_credentials: false,
            table_wait_timeout: DEFAULT_TABLE_WAIT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config for a DynamoDB Local instance at `endpoint_url`.
    pub fn local(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            test_credentials: true,
            ..Default::default()
        }
    }

    /// Reject combinations the credential chain cannot use.
    pub fn validate(&self) -> Result<(), StoreError> {
        match (&self.access_key, &self.secret_key) {
            (Some(_), None) => {
                return Err(StoreError::Config(
                    "access_key given without secret_key".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(StoreError::Config(
                    "secret_key given without access_key".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(url) = &self.endpoint_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(StoreError::Config(format!(
                "endpoint_url must start with http:// or https://, got '{}'",
                url
            )));
        }

        if self.table_wait_timeout.is_zero() {
            return Err(StoreError::Config(
                "table_wait_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Blocking DynamoDB client.
///
/// Owns a current-thread Tokio runtime and drives every SDK call to
/// completion before returning. Cloning shares the runtime and the
/// underlying connection pool.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    runtime: Arc<Runtime>,
    region: String,
    table_wait_timeout: Duration,
}

impl StoreClient {
    /// Create a new client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is inconsistent or the runtime cannot start.
    pub fn new(config: ClientConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        let (client, region) = runtime.block_on(build_client(&config));
        debug!(
            region = %region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "dynamodb client ready"
        );

        Ok(Self {
            client,
            runtime: Arc::new(runtime),
            region,
            table_wait_timeout: config.table_wait_timeout,
        })
    }

    /// The configured AWS region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The underlying SDK client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn table_wait_timeout(&self) -> Duration {
        self.table_wait_timeout
    }

    /// Check if the client can reach DynamoDB with a single ListTables call.
    pub fn ping(&self) -> Result<bool, StoreError> {
        self.block_on(self.client.list_tables().limit(1).send())
            .map_err(|source| StoreError::ListTables { source })?;
        Ok(true)
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Build the SDK client for `config`, returning it with the resolved region.
async fn build_client(config: &ClientConfig) -> (Client, String) {
    // Region priority: param > env var > default
    let region_provider = RegionProviderChain::first_try(
        config
            .region
            .clone()
            .map(aws_sdk_dynamodb::config::Region::new),
    )
    .or_default_provider()
    .or_else(DEFAULT_REGION);

    let mut config_loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    // Credentials priority: hardcoded > test > profile > env/default chain
    if let (Some(ak), Some(sk)) = (&config.access_key, &config.secret_key) {
        let creds = Credentials::new(
            ak.clone(),
            sk.clone(),
            config.session_token.clone(),
            None,
            "seqstore-hardcoded",
        );
        config_loader = config_loader.credentials_provider(creds);
    } else if config.test_credentials {
        config_loader = config_loader.test_credentials();
    } else if let Some(profile_name) = &config.profile {
        let profile_provider = ProfileFileCredentialsProvider::builder()
            .profile_name(profile_name)
            .build();
        config_loader = config_loader.credentials_provider(profile_provider);
    }

    let sdk_config = config_loader.load().await;
    let region = sdk_config
        .region()
        .map(|r| r.as_ref().to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let mut dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
    if let Some(url) = &config.endpoint_url {
        dynamo_config = dynamo_config.endpoint_url(url);
    }

    (Client::from_conf(dynamo_config.build()), region)
}
