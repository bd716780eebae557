//! The structs
//!
use std::time::Duration;
use crate::perf_client::CollectSettings;

/// The resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The meta server addresses, tried in order.
    pub meta_servers: Vec<String>,
    /// The timeout of a single request.
    pub request_timeout: Duration,
    pub collect: CollectSettings,
}
/// The settings given on the command line, which override the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    pub meta_servers: Option<String>,
    pub parallel: Option<String>,
    pub request_timeout_ms: Option<String>,
    pub topology_timeout_ms: Option<String>,
    pub collect_timeout_ms: Option<String>,
    pub fail_fast: bool,
    pub blacklist: Option<String>,
}

pub const DEFAULT_META_SERVERS: &str = "127.0.0.1:34601";
pub const DEFAULT_PARALLEL: &str = "8";
pub const DEFAULT_REQUEST_TIMEOUT_MS: &str = "5000";
pub const DEFAULT_TOPOLOGY_TIMEOUT_MS: &str = "10000";
pub const DEFAULT_COLLECT_TIMEOUT_MS: &str = "10000";
pub const DEFAULT_FAIL_FAST: &str = "false";
