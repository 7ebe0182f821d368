//! The per-node collection pipeline
//!
//! Each node runs this pipeline to a terminal [`NodeStatus`]; every failure
//! or skip is recorded in the returned value and never escapes to sibling
//! nodes.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ConnectivityError;
use crate::inventory::ClusterInventory;
use crate::layout::DestinationLayout;
use crate::models::{ClusterNode, CollectionResult, NodeStatus, Workload};
use crate::transport::{RemoteCopier, RemoteExecutor};

use super::{enumerate_logs, select_workload, transfer, HarvestConfig};

pub(crate) struct NodeContext {
    pub inventory: Arc<dyn ClusterInventory>,
    pub executor: Arc<dyn RemoteExecutor>,
    pub copier: Arc<dyn RemoteCopier>,
    pub layout: DestinationLayout,
    pub config: HarvestConfig,
    /// Workload inventory shared across nodes in `Once` refresh mode;
    /// `None` means each node fetches its own
    pub workloads: Option<Result<Arc<Vec<Workload>>, ConnectivityError>>,
}

pub(crate) async fn collect_node(ctx: &NodeContext, node: &ClusterNode) -> CollectionResult {
    let mut result = CollectionResult {
        node: node.name.clone(),
        address: None,
        workload: None,
        transfers: Vec::new(),
        status: NodeStatus::SkippedNoAddress,
    };

    let Some(address) = node.preferred_address() else {
        warn!(node = %node.name, "No internal or external address, skipping");
        return result;
    };
    result.address = Some(address.to_string());

    let workloads = match node_workloads(ctx).await {
        Ok(workloads) => workloads,
        Err(err) => {
            warn!(node = %node.name, error = %err, "Failed to list workloads");
            result.status = NodeStatus::Failed(format!(
                "listing workloads in namespace {}: {err}",
                ctx.config.namespace
            ));
            return result;
        }
    };

    let Some(workload) = select_workload(node, workloads.as_slice()) else {
        info!(
            node = %node.name,
            namespace = %ctx.config.namespace,
            "No workload scheduled on node, skipping"
        );
        result.status = NodeStatus::SkippedNoWorkload;
        return result;
    };
    result.workload = Some(workload.name.clone());
    info!(
        node = %node.name,
        address = %address,
        workload = %workload.name,
        "Collecting node logs"
    );

    let node_dir = match ctx.layout.ensure_node_dir(address) {
        Ok(dir) => dir,
        Err(err) => {
            result.status =
                NodeStatus::Failed(format!("creating node directory for {address}: {err}"));
            return result;
        }
    };

    let files = match enumerate_logs(
        ctx.executor.as_ref(),
        workload,
        &ctx.config.container_path,
        ctx.config.remote_timeout,
    )
    .await
    {
        Ok(files) => files,
        Err(err) => {
            result.status = NodeStatus::Failed(err.to_string());
            return result;
        }
    };

    if files.is_empty() {
        info!(
            node = %node.name,
            path = %ctx.config.container_path,
            "No log files found, skipping"
        );
        result.status = NodeStatus::SkippedNoLogFiles;
        return result;
    }

    result.transfers = transfer::collect_files(
        ctx.copier.as_ref(),
        workload,
        &files,
        &node_dir,
        ctx.config.remote_timeout,
    )
    .await;
    result.status = NodeStatus::Completed;
    result
}

async fn node_workloads(ctx: &NodeContext) -> Result<Arc<Vec<Workload>>, ConnectivityError> {
    match &ctx.workloads {
        Some(Ok(shared)) => Ok(Arc::clone(shared)),
        Some(Err(err)) => Err(err.clone()),
        None => ctx
            .inventory
            .list_workloads(&ctx.config.namespace)
            .await
            .map(Arc::new),
    }
}
