//! The structs and traits
//!
use std::sync::Arc;
use crate::perf_counter::PerfCounter;

/// An alive replica node, as listed by the meta server.
/// ```json
/// [ { "address": "10.0.0.11:34801" }, { "address": "10.0.0.12:34801" } ]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub address: String,
}
/// An available table, as listed by the meta server.
/// ```json
/// [ { "table_name": "temp", "app_id": 2, "partition_count": 8 } ]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub table_name: String,
    pub app_id: i32,
    pub partition_count: i32,
}
/// The configuration of a single partition of a table.
///
/// During a failover a partition can be without primary, which is why primary is an option.
/// ```json
/// [ { "partition_index": 0, "primary": "10.0.0.11:34801" }, { "partition_index": 1, "primary": null } ]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    pub partition_index: i32,
    #[serde(default)]
    pub primary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("no meta server could serve the request: {0}")]
    MetaUnreachable(String),
    #[error("request to {address} failed: {reason}")]
    Request {
        address: String,
        reason: String,
    },
    #[error("could not parse the response of {address}: {reason}")]
    Parse {
        address: String,
        reason: String,
    },
    #[error("session to {0} is closed")]
    SessionClosed(String),
}

/// The requests served by the meta server, plus opening a session to a replica node.
pub trait ClusterClient: Send + Sync {
    fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClientError>;
    fn list_tables(&self) -> Result<Vec<TableInfo>, ClientError>;
    fn query_table_config(&self, table_name: &str) -> Result<Vec<PartitionConfig>, ClientError>;
    /// Opening a session does not connect: connection errors surface at the first request.
    fn open_session(&self, address: &str) -> Arc<dyn NodeSession>;
}

/// A session to a single replica node.
pub trait NodeSession: Send + Sync {
    fn address(&self) -> &str;
    /// Returns the perf-counters whose name matches the regex `filter`.
    fn get_counters(&self, filter: &str) -> Result<Vec<PerfCounter>, ClientError>;
    fn close(&self);
}
