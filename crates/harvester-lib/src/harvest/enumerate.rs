//! Remote log discovery inside a selected workload

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::error::RemoteExecError;
use crate::models::{RemoteLogFile, Workload};
use crate::transport::RemoteExecutor;

const LOG_SUFFIX: &str = ".log";

/// List regular files directly under `container_path` (no recursion) whose
/// names end in `.log`, case-sensitive.
pub async fn enumerate_logs(
    executor: &dyn RemoteExecutor,
    workload: &Workload,
    container_path: &str,
    deadline: Duration,
) -> Result<Vec<RemoteLogFile>, RemoteExecError> {
    let command = vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("find {container_path} -maxdepth 1 -type f -name '*{LOG_SUFFIX}'"),
    ];

    let output = timeout(deadline, executor.exec(workload, &command))
        .await
        .map_err(|_| {
            RemoteExecError::new(format!(
                "listing {container_path} in pod {} timed out after {}s",
                workload.name,
                deadline.as_secs()
            ))
        })??;

    // The remote shell's globbing is not trusted; only exact `.log` suffix
    // matches survive, whatever the listing returned.
    let files: Vec<RemoteLogFile> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.ends_with(LOG_SUFFIX))
        .map(|line| RemoteLogFile {
            path: line.to_string(),
        })
        .collect();

    debug!(
        workload = %workload.name,
        path = %container_path,
        count = files.len(),
        "Enumerated remote log files"
    );
    Ok(files)
}
