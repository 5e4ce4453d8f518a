use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thingauth_auth::config::{AuthConfig, REGION_VAR};
use thingauth_cli::commands::{certificate, object, verify};
use thingauth_client::aws::{AwsSession, AwsSettings};
use thingauth_client::object_store::S3ObjectStore;

#[derive(Parser)]
#[command(name = "thingauth", about = "Authenticate device messages against registry certificates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a hex-encoded RSA-PSS signature over a message
    Verify {
        /// Device (thing) name
        #[arg(long)]
        thing: String,
        /// Signed message
        #[arg(long)]
        message: String,
        /// Hex-encoded signature
        #[arg(long)]
        signature: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a device certificate, fetching it from the registry on a cache miss
    Certificate { thing: String },
    /// Download an object from S3
    Object {
        bucket: String,
        key: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Verify {
            thing,
            message,
            signature,
            json,
        } => {
            let auth = AuthConfig::from_env()?.build_authenticator();
            let outcome = verify::run_verify(&auth, &thing, message.as_bytes(), &signature).await;
            writeln!(stdout, "{}", outcome.render(json)?)?;
            if !outcome.verified {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Certificate { thing } => {
            let auth = AuthConfig::from_env()?.build_authenticator();
            let pem = certificate::run_certificate(auth.resolver(), &thing).await?;
            write!(stdout, "{pem}")?;
        }
        Commands::Object {
            bucket,
            key,
            output,
        } => {
            let session = Arc::new(AwsSession::new(AwsSettings {
                credentials: None,
                region: std::env::var(REGION_VAR).ok(),
            }));
            let store = S3ObjectStore::new(session);
            if let Some(data) = object::run_object(&store, &bucket, &key, output.as_deref()).await? {
                stdout.write_all(&data)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
