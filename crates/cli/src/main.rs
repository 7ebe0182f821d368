//! Node Log Harvester CLI
//!
//! A command-line tool that collects log files from every node of a
//! Kubernetes cluster into a local directory tree, one folder per node
//! address.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::collect::{self, RefreshMode};
use commands::nodes;
use tracing_subscriber::EnvFilter;

/// Node Log Harvester CLI
#[derive(Parser)]
#[command(name = "nlh")]
#[command(author, version, about = "Collect per-node log files from a Kubernetes cluster", long_about = None)]
pub struct Cli {
    /// Path to kubeconfig file (uses default loading chain if not specified)
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect log files from every node into a local directory tree
    Collect {
        /// Namespace whose pods act as log-access points
        #[arg(long, short)]
        namespace: Option<String>,

        /// Absolute path inside the pod searched for log files
        #[arg(long)]
        container_path: Option<String>,

        /// Local destination root (defaults to a timestamped folder under
        /// the desktop)
        #[arg(long, short)]
        destination: Option<String>,

        /// Maximum number of nodes processed at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Timeout in seconds for each remote listing or copy
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// When the namespace workload list is fetched
        #[arg(long, value_enum, default_value = "per-node")]
        refresh_workloads: RefreshMode,
    },

    /// List cluster nodes and their addresses
    Nodes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Collect {
            namespace,
            container_path,
            destination,
            concurrency,
            timeout_secs,
            refresh_workloads,
        } => {
            collect::run(
                cli.kubeconfig.as_deref(),
                collect::CollectParams {
                    namespace,
                    container_path,
                    destination,
                    concurrency,
                    timeout_secs,
                    refresh_workloads,
                },
                cli.format,
            )
            .await?;
        }
        Commands::Nodes => {
            nodes::run(cli.kubeconfig.as_deref(), cli.format).await?;
        }
    }

    Ok(())
}
