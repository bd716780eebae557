//! The structs
//!
use std::collections::BTreeMap;

/// The perf-counters of a single replica node.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NodeStats {
    /// Address of the replica node.
    pub addr: String,
    /// perf-counter name -> value.
    pub stats: BTreeMap<String, f64>,
}

pub const MATCH_ALL: &str = ".*";
pub const MATCH_PARTITION: &str = r"^\d+\.\d+\.";
