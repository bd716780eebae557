//! The structs
//!
use std::collections::BTreeMap;
use std::sync::Arc;
use crate::client::NodeSession;

/// The sessions of the alive replica nodes, by node address.
///
/// The registry is owned by a single [crate::perf_client::PerfClient], which is the only writer.
/// The collectors get an immutable snapshot of the sessions via [NodeRegistry::sessions].
#[derive(Default)]
pub struct NodeRegistry {
    pub(crate) nodes: BTreeMap<String, Arc<dyn NodeSession>>,
}
/// What a refresh changed.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub opened: Vec<String>,
    pub closed: Vec<String>,
    pub kept: Vec<String>,
}
