//! Cluster inventory access
//!
//! Read-only snapshots of nodes and namespace workloads, fetched from the
//! control plane through a narrow trait so the pipeline can be driven by
//! fakes in tests.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::error::ConnectivityError;
use crate::models::{AddressKind, ClusterNode, NodeAddress, Workload};

/// Control-plane inventory queries used by the orchestrator
#[async_trait]
pub trait ClusterInventory: Send + Sync {
    /// List all cluster nodes. An empty result is valid.
    async fn list_nodes(&self) -> Result<Vec<ClusterNode>, ConnectivityError>;

    /// List all workloads in the namespace. An empty result is valid.
    async fn list_workloads(&self, namespace: &str) -> Result<Vec<Workload>, ConnectivityError>;
}

/// Inventory reader backed by the Kubernetes API
pub struct KubeInventory {
    client: Client,
}

impl KubeInventory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterInventory for KubeInventory {
    async fn list_nodes(&self) -> Result<Vec<ClusterNode>, ConnectivityError> {
        let nodes = Api::<Node>::all(self.client.clone())
            .list(&ListParams::default())
            .await?;

        let nodes: Vec<ClusterNode> = nodes.into_iter().map(cluster_node_from).collect();
        debug!(count = nodes.len(), "Listed cluster nodes");
        Ok(nodes)
    }

    async fn list_workloads(&self, namespace: &str) -> Result<Vec<Workload>, ConnectivityError> {
        let pods = Api::<Pod>::namespaced(self.client.clone(), namespace)
            .list(&ListParams::default())
            .await?;

        let workloads: Vec<Workload> = pods
            .into_iter()
            .filter_map(|pod| workload_from(pod, namespace))
            .collect();
        debug!(
            namespace = %namespace,
            count = workloads.len(),
            "Listed namespace workloads"
        );
        Ok(workloads)
    }
}

fn cluster_node_from(node: Node) -> ClusterNode {
    let addresses = node
        .status
        .and_then(|status| status.addresses)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|addr| {
            let kind = match addr.type_.as_str() {
                "InternalIP" => AddressKind::Internal,
                "ExternalIP" => AddressKind::External,
                _ => return None,
            };
            Some(NodeAddress {
                kind,
                address: addr.address,
            })
        })
        .collect();

    ClusterNode {
        name: node.metadata.name.unwrap_or_default(),
        addresses,
    }
}

fn workload_from(pod: Pod, namespace: &str) -> Option<Workload> {
    let name = pod.metadata.name?;
    Some(Workload {
        name,
        namespace: pod
            .metadata
            .namespace
            .unwrap_or_else(|| namespace.to_string()),
        node_name: pod.spec.and_then(|spec| spec.node_name),
    })
}
