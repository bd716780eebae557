//! Module for aggregating the perf-counters into partition, table and cluster stats.
//!
//! The aggregation is done in layers:
//! 1. [PartitionStats]: the counters reported by the primary of a partition. Counters of the other replicas are discarded.
//! 2. [TableStats]: the sum of the stats of the partitions of a table.
//! 3. [ClusterStats]: the sum of the stats of all tables.
//!
//! At the partition and at the table layer the derived stats are added (see [extend_stats]):
//! - `read_qps` / `read_bytes`: get, multi_get and scan.
//! - `write_qps` / `write_bytes`: put, remove, multi_put, multi_remove, check_and_set and check_and_mutate.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
