//! Cluster log harvesting library
//!
//! This crate provides the core pipeline for collecting log files from the
//! nodes of a Kubernetes cluster:
//! - Node and namespace workload inventory through the control plane
//! - Per-node workload selection
//! - Remote log enumeration and file transfer through a pod
//! - Local destination layout and the per-run report

pub mod error;
pub mod harvest;
pub mod inventory;
pub mod layout;
pub mod models;
pub mod transport;

pub use error::{ConnectivityError, FatalError, RemoteExecError, TransferError};
pub use harvest::{HarvestConfig, Harvester, WorkloadRefresh};
pub use layout::DestinationLayout;
pub use models::*;
