//! Shared helpers for integration tests: an in-memory cluster implementing the client traits.
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use regex::Regex;

use kv_stats::client::{ClientError, ClusterClient, NodeInfo, NodeSession, PartitionConfig, TableInfo};
use kv_stats::perf_client::{CollectSettings, FailurePolicy, PerfClient};
use kv_stats::perf_counter::PerfCounter;

#[derive(Default)]
pub struct ClusterState {
    /// None makes listing the nodes fail.
    pub nodes: Option<Vec<String>>,
    /// None makes listing the tables fail.
    pub tables: Option<Vec<TableInfo>>,
    pub configs: BTreeMap<String, Vec<PartitionConfig>>,
    pub broken_tables: BTreeSet<String>,
    pub counters: BTreeMap<String, Vec<PerfCounter>>,
    pub broken_nodes: BTreeSet<String>,
    pub slow_nodes: BTreeMap<String, Duration>,
    pub opened: Vec<String>,
    pub closed: Vec<String>,
}

/// A cluster kept in memory. Clones share the same state, so a test can change the cluster between cycles.
#[derive(Clone, Default)]
pub struct FakeCluster {
    pub state: Arc<Mutex<ClusterState>>,
}

pub struct FakeSession {
    address: String,
    state: Arc<Mutex<ClusterState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        FakeCluster::default()
    }
    pub fn with_nodes(self, nodes: &[&str]) -> Self {
        self.state.lock().unwrap().nodes = Some(nodes.iter().map(|n| n.to_string()).collect());
        self
    }
    /// Adds a table, with the primary of every partition in order.
    pub fn with_table(self, table_name: &str, app_id: i32, primaries: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.tables.get_or_insert_with(Vec::new).push(TableInfo {
                table_name: table_name.to_string(),
                app_id,
                partition_count: primaries.len() as i32,
            });
            state.configs.insert(
                table_name.to_string(),
                primaries.iter().enumerate()
                    .map(|(index, primary)| PartitionConfig {
                        partition_index: index as i32,
                        primary: Some(primary.to_string()).filter(|p| !p.is_empty()),
                    })
                    .collect(),
            );
        }
        self
    }
    pub fn with_counters(self, node: &str, counters: &[(&str, f64)]) -> Self {
        self.state.lock().unwrap().counters
            .entry(node.to_string())
            .or_default()
            .extend(counters.iter().map(|(name, value)| PerfCounter::new(name, *value)));
        self
    }
    pub fn set_nodes(&self, nodes: Option<&[&str]>) {
        self.state.lock().unwrap().nodes = nodes.map(|n| n.iter().map(|a| a.to_string()).collect());
    }
    pub fn fail_tables_listing(&self) {
        self.state.lock().unwrap().tables = None;
    }
    pub fn break_table(&self, table_name: &str) {
        self.state.lock().unwrap().broken_tables.insert(table_name.to_string());
    }
    pub fn break_node(&self, node: &str) {
        self.state.lock().unwrap().broken_nodes.insert(node.to_string());
    }
    pub fn slow_node(&self, node: &str, delay: Duration) {
        self.state.lock().unwrap().slow_nodes.insert(node.to_string(), delay);
    }
    pub fn opened(&self) -> Vec<String> {
        self.state.lock().unwrap().opened.clone()
    }
    pub fn closed(&self) -> Vec<String> {
        self.state.lock().unwrap().closed.clone()
    }
    pub fn perf_client(&self, failure_policy: FailurePolicy) -> PerfClient {
        let settings = CollectSettings {
            parallel: 4,
            topology_timeout: Duration::from_secs(5),
            collect_timeout: Duration::from_millis(500),
            failure_policy,
            ..Default::default()
        };
        PerfClient::new(Arc::new(self.clone()), settings)
    }
}

fn unreachable(address: &str) -> ClientError {
    ClientError::Request { address: address.to_string(), reason: "connection refused".to_string() }
}

impl ClusterClient for FakeCluster {
    fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClientError> {
        self.state.lock().unwrap().nodes.clone()
            .map(|nodes| nodes.into_iter().map(|address| NodeInfo { address }).collect())
            .ok_or_else(|| ClientError::MetaUnreachable("connection refused".to_string()))
    }
    fn list_tables(&self) -> Result<Vec<TableInfo>, ClientError> {
        self.state.lock().unwrap().tables.clone()
            .ok_or_else(|| ClientError::MetaUnreachable("connection refused".to_string()))
    }
    fn query_table_config(&self, table_name: &str) -> Result<Vec<PartitionConfig>, ClientError> {
        let state = self.state.lock().unwrap();
        if state.broken_tables.contains(table_name) {
            return Err(unreachable("meta"));
        }
        state.configs.get(table_name).cloned().ok_or_else(|| unreachable("meta"))
    }
    fn open_session(&self, address: &str) -> Arc<dyn NodeSession> {
        self.state.lock().unwrap().opened.push(address.to_string());
        Arc::new(FakeSession { address: address.to_string(), state: self.state.clone() })
    }
}

impl NodeSession for FakeSession {
    fn address(&self) -> &str {
        &self.address
    }
    fn get_counters(&self, filter: &str) -> Result<Vec<PerfCounter>, ClientError> {
        let delay = self.state.lock().unwrap().slow_nodes.get(&self.address).cloned();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        let state = self.state.lock().unwrap();
        if state.broken_nodes.contains(&self.address) {
            return Err(unreachable(&self.address));
        }
        let filter = Regex::new(filter).map_err(|e| ClientError::Request { address: self.address.clone(), reason: e.to_string() })?;
        Ok(state.counters.get(&self.address)
            .map(|counters| counters.iter().filter(|c| filter.is_match(&c.name)).cloned().collect())
            .unwrap_or_default())
    }
    fn close(&self) {
        self.state.lock().unwrap().closed.push(self.address.clone());
    }
}
