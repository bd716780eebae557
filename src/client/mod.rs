//! Module with the contract towards the cluster: the meta server (coordinator) and the replica nodes.
//!
//! The aggregation engine only talks to the cluster through the [ClusterClient] and [NodeSession] traits:
//! - [ClusterClient::list_nodes]: the alive replica nodes.
//! - [ClusterClient::list_tables]: the available tables.
//! - [ClusterClient::query_table_config]: the partitions of a table with their primary.
//! - [ClusterClient::open_session]: a session to a replica node, which serves [NodeSession::get_counters].
//!
//! [HttpClusterClient] implements the contract with http+json.
//!
mod structs;
mod http;

pub use structs::*;
pub use http::*;
