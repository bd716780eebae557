//! The structs
//!
use std::sync::Arc;
use std::time::Duration;
use crate::client::{ClientError, ClusterClient};
use crate::fanout::SkippedSource;
use crate::node_registry::NodeRegistry;
use crate::perf_counter::AggregationPolicy;

/// What to do with a cycle in which a node, a table or the node discovery failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Aggregate what was collected, and report the skipped sources with the stats.
    #[default]
    Partial,
    /// Fail the cycle, nothing is aggregated.
    FailFast,
}
/// The settings of a collection cycle.
#[derive(Debug, Clone)]
pub struct CollectSettings {
    /// Number of threads per parallel read.
    pub parallel: usize,
    /// The deadline for querying the configs of all tables.
    pub topology_timeout: Duration,
    /// The deadline for reading the perf-counters of all nodes.
    pub collect_timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub policy: AggregationPolicy,
}
/// The aggregation engine.
pub struct PerfClient {
    pub(crate) client: Arc<dyn ClusterClient>,
    pub(crate) nodes: NodeRegistry,
    pub(crate) settings: CollectSettings,
}
/// The stats of a cycle, together with the sources that were skipped.
#[derive(Serialize, Debug)]
pub struct Collected<T> {
    pub stats: T,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("unable to list tables: {0}")]
    ListTables(#[source] ClientError),
    #[error("collection cycle failed, skipped: {}", crate::perf_client::describe_skipped(.skipped))]
    PartialFailure {
        skipped: Vec<SkippedSource>,
    },
}
