//! Per-file transfer into the node's local directory

use std::path::Path;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::models::{FileTransfer, RemoteLogFile, TransferOutcome, Workload};
use crate::transport::RemoteCopier;

/// Copy every discovered file, each independently; one file's failure never
/// stops the remaining transfers for the node.
pub(crate) async fn collect_files(
    copier: &dyn RemoteCopier,
    workload: &Workload,
    files: &[RemoteLogFile],
    node_dir: &Path,
    deadline: Duration,
) -> Vec<FileTransfer> {
    let mut transfers = Vec::with_capacity(files.len());
    for file in files {
        let outcome = collect_file(copier, workload, file, node_dir, deadline).await;
        transfers.push(FileTransfer {
            remote_path: file.path.clone(),
            outcome,
        });
    }
    transfers
}

async fn collect_file(
    copier: &dyn RemoteCopier,
    workload: &Workload,
    file: &RemoteLogFile,
    node_dir: &Path,
    deadline: Duration,
) -> TransferOutcome {
    // Only the base name survives; identical base names from different
    // remote directories overwrite each other inside the node directory.
    let local_path = node_dir.join(file.base_name());

    match timeout(deadline, copier.copy(workload, &file.path, &local_path)).await {
        Ok(Ok(())) => {
            info!(
                remote = %file.path,
                local = %local_path.display(),
                "Copied log file"
            );
            TransferOutcome::Success
        }
        Ok(Err(err)) => {
            warn!(remote = %file.path, error = %err, "Failed to copy log file");
            TransferOutcome::Failure(err.to_string())
        }
        Err(_) => {
            warn!(remote = %file.path, "Copy timed out");
            TransferOutcome::Failure(format!(
                "copying {} timed out after {}s",
                file.path,
                deadline.as_secs()
            ))
        }
    }
}
