//! The structs
//!
use regex::Regex;

/// The partition identifier: the table (app) id and the zero based index of the partition in the table.
///
/// The gpid is the key that joins the topology (which node is primary for a partition)
/// with the perf-counters reported by the nodes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gpid {
    pub app_id: i32,
    pub partition_index: i32,
}
/// A perf-counter as it is returned by a replica node.
///
/// This is how a list of perf-counters looks like:
/// ```json
/// [
///     { "name": "2.5.get_qps", "value": 12.0 },
///     { "name": "2.5.get_latency_p99", "value": 344.0 },
///     { "name": "memused.res", "value": 2048.0 }
/// ]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PerfCounter {
    pub name: String,
    pub value: f64,
}
/// A perf-counter that is decoded as belonging to a partition.
///
/// The name is the bare metric name, so `2.5.get_qps` is stored as gpid 2.5 and name `get_qps`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionPerfCounter {
    pub gpid: Gpid,
    pub name: String,
    pub value: f64,
}
/// The policy deciding which partition counters are summed into the table and cluster stats.
///
/// Counters matching the blacklist are skipped: latencies and percentiles cannot be summed.
#[derive(Debug, Clone)]
pub struct AggregationPolicy {
    pub blacklist: Regex,
}
/// The blacklist used when no blacklist is configured.
pub const DEFAULT_BLACKLIST: &str = r"latency|percentile|_p\d+$";
