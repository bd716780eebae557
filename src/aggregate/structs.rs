//! The structs
//!
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use crate::perf_counter::Gpid;

/// The stats of a single partition, as reported by its primary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartitionStats {
    pub gpid: Gpid,
    /// Address of the primary. Empty if the partition has no primary.
    pub addr: String,
    /// perf-counter name -> value.
    pub stats: BTreeMap<String, f64>,
}
/// The aggregated stats of a table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TableStats {
    pub table_name: String,
    pub app_id: i32,
    /// partition index -> partition stats.
    pub partitions: BTreeMap<i32, PartitionStats>,
    /// The time the stats were aggregated.
    pub timestamp: DateTime<Local>,
    /// perf-counter name -> the sum over all partitions.
    pub stats: BTreeMap<String, f64>,
}
/// The aggregated stats of all tables in the cluster.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClusterStats {
    pub timestamp: DateTime<Local>,
    /// perf-counter name -> the sum over all tables.
    pub stats: BTreeMap<String, f64>,
}

pub const READ_OPERATIONS: [&str; 3] = ["get", "multi_get", "scan"];
pub const WRITE_OPERATIONS: [&str; 6] = ["put", "remove", "multi_put", "multi_remove", "check_and_set", "check_and_mutate"];
