//! Local destination layout
//!
//! A run writes into `<root>/<sanitized-node-address>/<basename>.log`. The
//! root is created up front; node subdirectories are created lazily, only
//! once a workload has been selected for that node.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Replace path separator characters in a node address with `_` so the
/// address can be used as a directory name. Covers dotted IPv4 addresses
/// and hostnames as well as colon-separated IPv6-style addresses.
pub fn sanitize_address(address: &str) -> String {
    address
        .chars()
        .map(|c| match c {
            '.' | ':' => '_',
            other => other,
        })
        .collect()
}

/// Timestamped default root for a run, e.g. `K8sLogs_20240305_070930`
pub fn timestamped_root(base: &Path, now: NaiveDateTime) -> PathBuf {
    base.join(format!("K8sLogs_{}", now.format("%Y%m%d_%H%M%S")))
}

/// Destination directory tree for one collection run
#[derive(Debug, Clone)]
pub struct DestinationLayout {
    root: PathBuf,
}

impl DestinationLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the destination root, parents included. Idempotent.
    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Path of the subdirectory owned by the node with this address
    pub fn node_dir(&self, address: &str) -> PathBuf {
        self.root.join(sanitize_address(address))
    }

    /// Create the node subdirectory and return its path. Idempotent.
    pub fn ensure_node_dir(&self, address: &str) -> io::Result<PathBuf> {
        let dir = self.node_dir(address);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
