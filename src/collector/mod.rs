//! Module for reading the perf-counters of all replica nodes in parallel.
//!
//! One request is sent per node session, carrying a regex name filter:
//! - [MATCH_ALL]: all counters, node counters as well as partition counters.
//! - [MATCH_PARTITION]: only the partition counters, which is what the aggregation needs.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
