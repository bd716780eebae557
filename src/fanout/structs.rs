//! The structs
//!

/// The kind of source a request was sent to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The meta server, for listing the nodes.
    Discovery,
    /// A table config query.
    Table,
    /// A perf-counter request to a replica node.
    Node,
}
/// A source that did not deliver its data in a collection cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub kind: SourceKind,
    /// The table name, node address or discovery request.
    pub name: String,
    pub reason: String,
}
/// The merged outcome of a fan-out: the successful results by source name and the skipped sources.
#[derive(Debug)]
pub struct FanOutResult<T> {
    pub results: Vec<(String, T)>,
    pub skipped: Vec<SkippedSource>,
}

pub const DEADLINE_EXCEEDED: &str = "deadline exceeded";
pub const NO_RESULT: &str = "request ended without result";
