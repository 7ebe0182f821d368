//! Workload selection per node

use crate::models::{ClusterNode, Workload};

/// Pick the workload used as the node's log-access point: the first one in
/// inventory order scheduled on the node. `None` is a normal outcome for
/// nodes running nothing in the namespace (tainted or system-reserved
/// nodes, for example).
pub fn select_workload<'a>(node: &ClusterNode, workloads: &'a [Workload]) -> Option<&'a Workload> {
    workloads
        .iter()
        .find(|w| w.node_name.as_deref() == Some(node.name.as_str()))
}
