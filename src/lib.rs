//! kv_stats collects the perf-counters of the replica nodes of a sharded, replicated key-value cluster,
//! and aggregates them into partition, table and cluster stats.
//!
//! The entry point is [perf_client::PerfClient], which talks to the cluster via [client::ClusterClient].
//!
#[macro_use]
extern crate serde_derive;

pub mod perf_counter;
pub mod client;
pub mod fanout;
pub mod node_registry;
pub mod topology;
pub mod collector;
pub mod aggregate;
pub mod perf_client;
pub mod config;
