//! Collection command

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use harvester_lib::inventory::KubeInventory;
use harvester_lib::transport::KubeTransport;
use harvester_lib::{layout, DestinationLayout, HarvestConfig, Harvester, WorkloadRefresh};

use crate::client::build_client;
use crate::config::Config;
use crate::output::{self, OutputFormat};

/// When the namespace workload list is fetched during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RefreshMode {
    /// Fetch fresh for every node
    #[default]
    PerNode,
    /// Fetch once up front and reuse the snapshot
    Once,
}

impl From<RefreshMode> for WorkloadRefresh {
    fn from(mode: RefreshMode) -> Self {
        match mode {
            RefreshMode::PerNode => WorkloadRefresh::PerNode,
            RefreshMode::Once => WorkloadRefresh::Once,
        }
    }
}

/// Collection parameters from the command line
pub struct CollectParams {
    pub namespace: Option<String>,
    pub container_path: Option<String>,
    pub destination: Option<String>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub refresh_workloads: RefreshMode,
}

/// Run a collection and render the report
pub async fn run(
    kubeconfig: Option<&str>,
    params: CollectParams,
    format: OutputFormat,
) -> Result<()> {
    let file_config = Config::load().unwrap_or_default();

    let namespace = params
        .namespace
        .or(file_config.namespace)
        .unwrap_or_else(|| "default".to_string());
    let container_path = params
        .container_path
        .or(file_config.container_path)
        .unwrap_or_else(|| "/container".to_string());
    let destination = resolve_destination(
        params
            .destination
            .map(PathBuf::from)
            .or(file_config.destination),
    )?;

    let client = build_client(kubeconfig).await?;
    let inventory = Arc::new(KubeInventory::new(client.clone()));
    let transport = Arc::new(KubeTransport::new(client));

    let harvester = Harvester::new(
        inventory,
        transport.clone(),
        transport,
        DestinationLayout::new(&destination),
        HarvestConfig {
            namespace,
            container_path,
            workload_refresh: params.refresh_workloads.into(),
            node_concurrency: params.concurrency,
            remote_timeout: Duration::from_secs(params.timeout_secs),
        },
    );

    output::print_info(&format!("Collecting logs into {}", destination.display()));
    let report = harvester.run().await.context("Collection run aborted")?;

    output::print_report(&report, format)
}

/// Explicit destination wins; otherwise a timestamped folder under the
/// desktop, resolved here so the library never reads the environment.
fn resolve_destination(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let home = dirs_next::home_dir().context("Could not determine home directory")?;
    Ok(layout::timestamped_root(
        &home.join("Desktop"),
        Local::now().naive_local(),
    ))
}
