//! Remote execution and file transfer through a workload
//!
//! Two narrow capabilities the pipeline consumes: run a command inside a
//! pod capturing its combined output, and copy a single remote file to a
//! local path. The production implementation drives both over the
//! Kubernetes exec subresource; tests substitute fakes.

use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use kube::api::{AttachParams, AttachedProcess};
use kube::{Api, Client};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::error::{RemoteExecError, TransferError};
use crate::models::Workload;

/// Run a command inside the workload, capturing combined stdout/stderr.
/// Non-zero exit is an error carrying the output and status message.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    async fn exec(&self, workload: &Workload, command: &[String]) -> Result<String, RemoteExecError>;
}

/// Copy a single remote file out of the workload to a local path
#[async_trait]
pub trait RemoteCopier: Send + Sync {
    async fn copy(
        &self,
        workload: &Workload,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<(), TransferError>;
}

/// Exec-based transport over the Kubernetes API
pub struct KubeTransport {
    client: Client,
}

impl KubeTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn attach(
        &self,
        workload: &Workload,
        command: &[&str],
    ) -> Result<AttachedProcess, kube::Error> {
        let params = AttachParams::default().stdout(true).stderr(true);
        self.pods(&workload.namespace)
            .exec(&workload.name, command.iter().copied(), &params)
            .await
    }
}

#[async_trait]
impl RemoteExecutor for KubeTransport {
    async fn exec(&self, workload: &Workload, command: &[String]) -> Result<String, RemoteExecError> {
        let command: Vec<&str> = command.iter().map(String::as_str).collect();
        debug!(workload = %workload.name, command = ?command, "Executing remote command");

        let mut attached = self.attach(workload, &command).await.map_err(|err| {
            RemoteExecError::new(format!("exec in pod {}: {err}", workload.name))
        })?;

        let stdout = attached.stdout();
        let stderr = attached.stderr();
        let (out, err) = tokio::join!(drain(stdout), drain(stderr));

        let status = process_status(&mut attached).await;
        attached.join().await.map_err(|err| {
            RemoteExecError::new(format!("exec stream in pod {}: {err}", workload.name))
        })?;

        let combined = format!("{out}{err}");
        match status {
            Some(status) if status.status.as_deref() != Some("Success") => {
                Err(RemoteExecError::new(format!(
                    "command failed in pod {}: {}{combined}",
                    workload.name,
                    status.message.unwrap_or_default(),
                )))
            }
            _ => Ok(combined),
        }
    }
}

#[async_trait]
impl RemoteCopier for KubeTransport {
    async fn copy(
        &self,
        workload: &Workload,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<(), TransferError> {
        debug!(
            workload = %workload.name,
            remote = %remote_path,
            local = %local_path.display(),
            "Copying remote file"
        );

        let mut attached = self
            .attach(workload, &["cat", remote_path])
            .await
            .map_err(|err| {
                TransferError::new(format!("exec in pod {}: {err}", workload.name))
            })?;

        let mut stdout = attached
            .stdout()
            .ok_or_else(|| TransferError::new("exec stream exposed no stdout"))?;
        let stderr = attached.stderr();

        let mut file = tokio::fs::File::create(local_path).await.map_err(|err| {
            TransferError::new(format!("create {}: {err}", local_path.display()))
        })?;

        let write = async {
            tokio::io::copy(&mut stdout, &mut file).await?;
            file.flush().await
        };
        let (written, err_text) = tokio::join!(write, drain(stderr));
        written.map_err(|err| {
            TransferError::new(format!("write {}: {err}", local_path.display()))
        })?;

        let status = process_status(&mut attached).await;
        attached.join().await.map_err(|err| {
            TransferError::new(format!("exec stream in pod {}: {err}", workload.name))
        })?;

        match status {
            Some(status) if status.status.as_deref() != Some("Success") => {
                Err(TransferError::new(format!(
                    "copying {remote_path} from pod {}: {}{err_text}",
                    workload.name,
                    status.message.unwrap_or_default(),
                )))
            }
            _ => Ok(()),
        }
    }
}

async fn drain(stream: Option<impl AsyncRead + Unpin>) -> String {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_end(&mut buf).await;
    }
    String::from_utf8_lossy(&buf).into_owned()
}

async fn process_status(attached: &mut AttachedProcess) -> Option<Status> {
    match attached.take_status() {
        Some(status) => status.await,
        None => None,
    }
}
