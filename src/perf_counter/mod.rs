//! Module for decoding the perf-counter names exported by the replica nodes.
//!
//! A replica node exports two kinds of perf-counters:
//! - partition counters, whose name is prefixed with the partition id: `<app_id>.<partition_index>.<metric>`,
//!   for example `2.5.get_qps`.
//! - node counters, such as process level gauges, which carry no partition id, for example `memused.res`.
//!
//! Only partition counters take part in the table and cluster aggregation.
//! Whether a decoded partition counter is summed up is decided by the [AggregationPolicy].
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
