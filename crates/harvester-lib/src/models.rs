//! Core data models for the log harvester

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of network address attached to a cluster node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Internal,
    External,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Internal => write!(f, "internal"),
            AddressKind::External => write!(f, "external"),
        }
    }
}

/// A tagged network address of a cluster node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAddress {
    pub kind: AddressKind,
    pub address: String,
}

/// A cluster node as reported by the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterNode {
    pub name: String,
    /// Tagged addresses in control-plane order
    pub addresses: Vec<NodeAddress>,
}

impl ClusterNode {
    /// The address used for collection: the first internal address, falling
    /// back to the first external one. `None` means the node is skipped.
    pub fn preferred_address(&self) -> Option<&str> {
        self.addresses
            .iter()
            .find(|a| a.kind == AddressKind::Internal)
            .or_else(|| self.addresses.iter().find(|a| a.kind == AddressKind::External))
            .map(|a| a.address.as_str())
    }
}

/// A pod used as the log-access point for a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    pub namespace: String,
    /// Node the workload is scheduled on; `None` for unscheduled pods,
    /// which are never selected
    pub node_name: Option<String>,
}

/// A log file path inside a workload's filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLogFile {
    pub path: String,
}

impl RemoteLogFile {
    /// Final path component; the directory part is discarded when naming
    /// the local copy
    pub fn base_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Outcome of a single file transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "detail")]
pub enum TransferOutcome {
    Success,
    /// Transport diagnostic text, preserved verbatim
    Failure(String),
}

/// One attempted file transfer and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTransfer {
    pub remote_path: String,
    pub outcome: TransferOutcome,
}

/// Terminal status of one node's collection pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail")]
pub enum NodeStatus {
    Completed,
    SkippedNoAddress,
    SkippedNoWorkload,
    SkippedNoLogFiles,
    Failed(String),
}

impl NodeStatus {
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            NodeStatus::SkippedNoAddress
                | NodeStatus::SkippedNoWorkload
                | NodeStatus::SkippedNoLogFiles
        )
    }
}

/// Per-node outcome of a collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResult {
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    pub transfers: Vec<FileTransfer>,
    pub status: NodeStatus,
}

/// Aggregated outcome of a whole run, one entry per node in inventory order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub destination: PathBuf,
    pub started_at: DateTime<Utc>,
    pub results: Vec<CollectionResult>,
}

impl RunReport {
    pub fn completed_nodes(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == NodeStatus::Completed)
            .count()
    }

    pub fn skipped_nodes(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_skip()).count()
    }

    pub fn failed_nodes(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, NodeStatus::Failed(_)))
            .count()
    }

    pub fn files_copied(&self) -> usize {
        self.transfer_count(|o| *o == TransferOutcome::Success)
    }

    pub fn files_failed(&self) -> usize {
        self.transfer_count(|o| matches!(o, TransferOutcome::Failure(_)))
    }

    fn transfer_count(&self, pred: impl Fn(&TransferOutcome) -> bool) -> usize {
        self.results
            .iter()
            .flat_map(|r| r.transfers.iter())
            .filter(|t| pred(&t.outcome))
            .count()
    }
}
