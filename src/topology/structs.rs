//! The structs
//!
use std::collections::BTreeMap;
use crate::client::TableInfo;
use crate::fanout::SkippedSource;
use crate::perf_counter::Gpid;

/// The address of the primary of every partition.
pub type PrimaryMap = BTreeMap<Gpid, String>;

/// The outcome of resolving the topology.
#[derive(Debug, Default)]
pub struct Topology {
    /// The tables whose config was resolved.
    pub tables: Vec<TableInfo>,
    pub primaries: PrimaryMap,
    /// The tables whose config could not be queried.
    pub skipped: Vec<SkippedSource>,
}
