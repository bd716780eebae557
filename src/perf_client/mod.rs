//! Module with the aggregation engine.
//!
//! A [PerfClient] owns the sessions to the replica nodes and runs collection cycles. A cycle:
//! 1. refreshes the node sessions (keeping the current ones if the nodes cannot be listed).
//! 2. in parallel: resolves the topology at the meta server, and reads the perf-counters of all nodes.
//! 3. aggregates the counters into partition, table or cluster stats.
//!
//! Sources that failed in a cycle are handled according to the [FailurePolicy].
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
