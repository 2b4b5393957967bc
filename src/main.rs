use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use seqstore::conversions::item_to_json;
use seqstore::{ClientConfig, DEFAULT_LOCAL_ENDPOINT, DEFAULT_TABLE, StoreClient, StoreError};

#[derive(Parser)]
#[command(name = "seqstore", version, about = "Import, scan and drop seqrepo DynamoDB tables")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// DynamoDB endpoint URL (default: the AWS endpoint for the region).
    #[arg(long, global = true, env = "SEQSTORE_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Use DynamoDB Local at http://localhost:8001 with dummy credentials.
    #[arg(long, global = true)]
    local: bool,

    /// AWS region (falls back to AWS_REGION, then us-east-1).
    #[arg(long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    /// AWS profile from ~/.aws/credentials.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Sign requests with dummy credentials, as DynamoDB Local accepts.
    /// Implied by --local and by the DynamoDB Local endpoint.
    #[arg(long, global = true)]
    test_credentials: bool,

    /// Seconds to wait for a table to be created or deleted.
    #[arg(long, global = true, default_value_t = 500)]
    wait_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a seqrepo instance's aliases and sequence index into a table.
    Import {
        /// Seqrepo instance directory, e.g. /usr/local/share/seqrepo/2024-12-20.
        path: PathBuf,

        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,
    },
    /// Print every item of a table as one JSON object per line.
    Dump {
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Print scan metrics as JSON to stderr.
        #[arg(long)]
        stats: bool,
    },
    /// Delete a table and wait until it is gone.
    DropTable {
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,
    },
    /// Create the seqrepo table if it does not exist.
    CreateTable {
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,
    },
    /// Check that the endpoint answers.
    Ping,
}

impl ConnectionArgs {
    fn to_config(&self) -> ClientConfig {
        let endpoint_url = match (&self.endpoint_url, self.local) {
            (Some(url), _) => Some(url.clone()),
            (None, true) => Some(DEFAULT_LOCAL_ENDPOINT.to_string()),
            (None, false) => None,
        };
        let test_credentials = self.test_credentials
            || self.local
            || endpoint_url.as_deref() == Some(DEFAULT_LOCAL_ENDPOINT);

        ClientConfig {
            region: self.region.clone(),
            endpoint_url,
            profile: self.profile.clone(),
            test_credentials,
            table_wait_timeout: Duration::from_secs(self.wait_secs),
            ..Default::default()
        }
    }
}

fn run(cli: Cli) -> Result<(), StoreError> {
    let client = StoreClient::new(cli.connection.to_config())?;
    tracing::debug!(region = client.region(), "connected");

    match cli.command {
        Commands::Import { path, table } => {
            let summary = client.import_seqrepo(&path, &table)?;
            println!(
                "Imported {} aliases and {} sequences into '{}'.",
                summary.aliases, summary.fastadir_entries, summary.table
            );
        }
        Commands::Dump { table, stats } => {
            let (items, metrics) = client.fetch_all_with_metrics(&table)?;
            let mut out = std::io::stdout().lock();
            for item in items {
                serde_json::to_writer(&mut out, &item_to_json(item)?)?;
                writeln!(out).map_err(serde_json::Error::io)?;
            }
            if stats {
                eprintln!("{}", serde_json::to_string(&metrics)?);
            }
        }
        Commands::DropTable { table } => {
            client.drop_table(&table)?;
            println!("Table '{}' has been deleted.", table);
        }
        Commands::CreateTable { table } => {
            if client.create_table_if_not_exists(&table)? {
                println!("Table '{}' created.", table);
            } else {
                println!("Table '{}' already exists.", table);
            }
        }
        Commands::Ping => {
            client.ping()?;
            println!("ok");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, table = e.table(), "command failed");
            ExitCode::FAILURE
        }
    }
}
