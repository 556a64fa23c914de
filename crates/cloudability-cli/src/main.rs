mod commands;

use clap::{Parser, Subcommand};
use cloudability_config::Config;
use commands::schema::SchemaKind;

#[derive(Parser)]
#[command(name = "cloudability")]
#[command(about = "Link and verify vendor accounts in Cloudability", long_about = None)]
struct Cli {
    /// Show debug logs (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account verification (cloudability_account data source)
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Linked accounts (cloudability_linked_account resource)
    LinkedAccount {
        #[command(subcommand)]
        command: LinkedAccountCommands,
    },
    /// Print resource and data source schemas as JSON
    Schema {
        /// Only print one kind
        #[arg(value_enum)]
        kind: Option<SchemaKind>,
    },
    /// Show version
    Version,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Trigger verification and wait until the vendor reports a final state
    Verify {
        /// 12 digit AWS account id
        vendor_account_id: String,
        #[arg(long, default_value = "aws")]
        vendor_key: String,
        /// Attempts before giving up (default: config, then 20)
        #[arg(long)]
        retry_count: Option<u32>,
        /// Seconds between attempts (default: config, then 5)
        #[arg(long)]
        retry_wait: Option<u64>,
    },
}

#[derive(Subcommand)]
enum LinkedAccountCommands {
    /// Link a vendor account
    Create {
        vendor_account_id: String,
        #[arg(long, default_value = "aws")]
        vendor_key: String,
        /// Credential type: aws_role or aws_user
        #[arg(long = "type", default_value = "aws_role")]
        kind: String,
    },
    /// Show a linked account
    Read {
        vendor_account_id: String,
        #[arg(long, default_value = "aws")]
        vendor_key: String,
    },
    /// Unlink a vendor account
    Delete {
        vendor_account_id: String,
        #[arg(long, default_value = "aws")]
        vendor_key: String,
    },
    /// Read an existing account by import id (<id> or <vendor_key>/<id>)
    Import { import_id: String },
}

fn init_tracing(verbose: bool) {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    // stdout carries JSON output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("cloudability {}", env!("CARGO_PKG_VERSION"));
        }
        // no config or credentials needed
        Commands::Schema { kind } => commands::schema::handle(kind)?,
        Commands::Account { command } => {
            let config = Config::load()?;
            match command {
                AccountCommands::Verify {
                    vendor_account_id,
                    vendor_key,
                    retry_count,
                    retry_wait,
                } => {
                    let options = commands::account::VerifyOptions {
                        vendor_account_id,
                        vendor_key,
                        retry_count: retry_count.unwrap_or(config.verify.retry_count),
                        retry_wait: retry_wait.unwrap_or(config.verify.retry_wait_secs),
                    };
                    commands::account::verify(&config, options).await?;
                }
            }
        }
        Commands::LinkedAccount { command } => {
            let config = Config::load()?;
            match command {
                LinkedAccountCommands::Create {
                    vendor_account_id,
                    vendor_key,
                    kind,
                } => {
                    commands::linked_account::create(
                        &config,
                        &vendor_key,
                        &vendor_account_id,
                        &kind,
                    )
                    .await?;
                }
                LinkedAccountCommands::Read {
                    vendor_account_id,
                    vendor_key,
                } => {
                    commands::linked_account::read(&config, &vendor_key, &vendor_account_id)
                        .await?;
                }
                LinkedAccountCommands::Delete {
                    vendor_account_id,
                    vendor_key,
                } => {
                    commands::linked_account::delete(&config, &vendor_key, &vendor_account_id)
                        .await?;
                }
                LinkedAccountCommands::Import { import_id } => {
                    commands::linked_account::import(&config, &import_id).await?;
                }
            }
        }
    }

    Ok(())
}
