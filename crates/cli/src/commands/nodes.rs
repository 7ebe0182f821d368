//! Node listing command

use anyhow::{Context, Result};
use harvester_lib::inventory::{ClusterInventory, KubeInventory};

use crate::client::build_client;
use crate::output::{self, OutputFormat};

/// List cluster nodes with their tagged addresses
pub async fn run(kubeconfig: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = build_client(kubeconfig).await?;
    let inventory = KubeInventory::new(client);

    let nodes = inventory
        .list_nodes()
        .await
        .context("Failed to list cluster nodes")?;

    output::print_nodes(&nodes, format)
}
