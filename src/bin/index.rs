//! Index server binary

use clap::{Parser, Subcommand};
use rendezkv::{IndexConfig, IndexServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rendezkv-index")]
#[command(about = "rendezkv index server: key → volume mapping with rendezvous placement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the index server
    Serve {
        /// Bind address for HTTP
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,

        /// Mapping database directory
        #[arg(long, default_value = "./index-data")]
        db: PathBuf,

        /// Volume server addresses (comma-separated host:port)
        #[arg(long, value_delimiter = ',', required = true)]
        volumes: Vec<String>,

        /// Number of replica targets computed per key
        #[arg(long, default_value = "3")]
        replicas: usize,

        /// Number of subvolume partitions per volume
        #[arg(long, default_value = "10")]
        subvolumes: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            db,
            volumes,
            replicas,
            subvolumes,
        } => {
            let config = IndexConfig {
                bind_addr: bind.parse()?,
                db_path: db,
                volumes,
                replicas,
                subvolumes,
            };
            config.validate()?;
            IndexServer::new(config).serve().await?;
        }
    }

    Ok(())
}
