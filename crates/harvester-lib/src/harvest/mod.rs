//! The collection pipeline
//!
//! One run walks the cluster: list nodes once, then for every node select a
//! workload, enumerate its log files and copy each one into the node's
//! local directory. Per-node pipelines are independent tasks; any failure
//! inside one is recorded in its [`CollectionResult`] and the run carries
//! on with the remaining nodes.

mod enumerate;
mod node;
mod selector;
mod transfer;


pub use enumerate::enumerate_logs;
pub use selector::select_workload;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::error::FatalError;
use crate::inventory::ClusterInventory;
use crate::layout::DestinationLayout;
use crate::models::{CollectionResult, NodeStatus, RunReport};
use crate::transport::{RemoteCopier, RemoteExecutor};

/// When the namespace workload inventory is fetched during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkloadRefresh {
    /// Fetch fresh for every node, tolerating workload churn mid-run
    #[default]
    PerNode,
    /// Fetch once up front and reuse the snapshot for every node
    Once,
}

/// Configuration for a collection run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Namespace whose pods act as log-access points
    pub namespace: String,
    /// Absolute path inside the workload searched for log files
    pub container_path: String,
    pub workload_refresh: WorkloadRefresh,
    /// Maximum number of node pipelines running at once
    pub node_concurrency: usize,
    /// Bound on each remote listing and each file transfer
    pub remote_timeout: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            container_path: "/container".to_string(),
            workload_refresh: WorkloadRefresh::PerNode,
            node_concurrency: 1,
            remote_timeout: Duration::from_secs(30),
        }
    }
}

/// Drives a collection run end-to-end and assembles the [`RunReport`]
pub struct Harvester {
    inventory: Arc<dyn ClusterInventory>,
    executor: Arc<dyn RemoteExecutor>,
    copier: Arc<dyn RemoteCopier>,
    layout: DestinationLayout,
    config: HarvestConfig,
}

impl Harvester {
    pub fn new(
        inventory: Arc<dyn ClusterInventory>,
        executor: Arc<dyn RemoteExecutor>,
        copier: Arc<dyn RemoteCopier>,
        layout: DestinationLayout,
        config: HarvestConfig,
    ) -> Self {
        Self {
            inventory,
            executor,
            copier,
            layout,
            config,
        }
    }

    /// Run a collection. Only a destination-root or node-inventory failure
    /// aborts the run; everything else lands in the report.
    pub async fn run(&self) -> Result<RunReport, FatalError> {
        let started_at = Utc::now();

        self.layout
            .ensure_root()
            .map_err(|source| FatalError::DestinationRoot {
                path: self.layout.root().to_path_buf(),
                source,
            })?;

        let nodes = self
            .inventory
            .list_nodes()
            .await
            .map_err(FatalError::NodeInventory)?;
        info!(count = nodes.len(), "Listed cluster nodes");

        if nodes.is_empty() {
            warn!("No nodes found in the cluster, nothing to collect");
            return Ok(RunReport {
                destination: self.layout.root().to_path_buf(),
                started_at,
                results: Vec::new(),
            });
        }

        let shared_workloads = match self.config.workload_refresh {
            WorkloadRefresh::Once => Some(
                self.inventory
                    .list_workloads(&self.config.namespace)
                    .await
                    .map(Arc::new),
            ),
            WorkloadRefresh::PerNode => None,
        };

        let semaphore = Arc::new(Semaphore::new(self.config.node_concurrency.max(1)));
        let mut handles = Vec::with_capacity(nodes.len());
        for cluster_node in nodes {
            let ctx = node::NodeContext {
                inventory: Arc::clone(&self.inventory),
                executor: Arc::clone(&self.executor),
                copier: Arc::clone(&self.copier),
                layout: self.layout.clone(),
                config: self.config.clone(),
                workloads: shared_workloads.clone(),
            };
            let semaphore = Arc::clone(&semaphore);
            let name = cluster_node.name.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return CollectionResult {
                            node: cluster_node.name.clone(),
                            address: None,
                            workload: None,
                            transfers: Vec::new(),
                            status: NodeStatus::Failed("collection cancelled".to_string()),
                        }
                    }
                };
                node::collect_node(&ctx, &cluster_node).await
            });
            handles.push((name, handle));
        }

        // Gathered in spawn order, so the report stays in inventory order.
        // A panicking node task becomes a Failed entry, nothing more.
        let mut results = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(node = %name, error = %err, "Node task aborted");
                    results.push(CollectionResult {
                        node: name,
                        address: None,
                        workload: None,
                        transfers: Vec::new(),
                        status: NodeStatus::Failed(format!("node task aborted: {err}")),
                    });
                }
            }
        }

        let report = RunReport {
            destination: self.layout.root().to_path_buf(),
            started_at,
            results,
        };
        info!(
            completed = report.completed_nodes(),
            skipped = report.skipped_nodes(),
            failed = report.failed_nodes(),
            files = report.files_copied(),
            "Collection run finished"
        );
        Ok(report)
    }
}
