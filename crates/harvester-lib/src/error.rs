//! Error types for the collection pipeline
//!
//! Skips (no address, no workload, no log files) are not errors and live in
//! [`crate::models::NodeStatus`]; the types here carry diagnostics for the
//! failures that are recorded or abort a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Control-plane communication failure while listing nodes or workloads
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ConnectivityError {
    pub message: String,
}

impl ConnectivityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<kube::Error> for ConnectivityError {
    fn from(err: kube::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Remote command execution failure; carries the remote output verbatim
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RemoteExecError {
    pub message: String,
}

impl RemoteExecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Single file transfer failure; carries the transport diagnostic verbatim
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransferError {
    pub message: String,
}

impl TransferError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Preconditions whose failure aborts the whole run
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("failed to create destination root {path}: {source}")]
    DestinationRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list cluster nodes: {0}")]
    NodeInventory(#[source] ConnectivityError),
}
