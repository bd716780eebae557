//! The http+json implementation of [ClusterClient] and [NodeSession].
//!
//! Meta server endpoints:
//! - `/api/v1/nodes?status=alive`
//! - `/api/v1/tables?status=available`
//! - `/api/v1/tables/<table_name>/config`
//!
//! Replica node endpoint:
//! - `/api/v1/perf-counters?filter=<regex>`
//!
//! The meta servers are tried in the order they are configured, the first one that answers is used.
//!
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::time::Duration;
use log::*;
use serde::de::DeserializeOwned;
use reqwest::{blocking::Client, Url};
use crate::client::{ClientError, ClusterClient, NodeInfo, NodeSession, PartitionConfig, TableInfo};
use crate::perf_counter::PerfCounter;

pub struct HttpClusterClient {
    meta_servers: Vec<String>,
    http: Client,
}

pub struct HttpNodeSession {
    address: String,
    http: Client,
    closed: AtomicBool,
}

impl HttpClusterClient {
    /// The timeout applies to every single request, to the meta servers as well as to the nodes.
    pub fn new(
        meta_servers: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError>
    {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request { address: "http client".to_string(), reason: e.to_string() })?;
        Ok(HttpClusterClient { meta_servers, http })
    }
    fn meta_get<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError>
    {
        let mut last_error = String::from("no meta servers configured");
        for meta_server in &self.meta_servers {
            match http_get_json(&self.http, meta_server, path, query) {
                Ok(response) => return Ok(response),
                Err(e) => {
                    debug!("meta server {} could not serve {}: {}", meta_server, path.join("/"), e);
                    last_error = e.to_string();
                }
            }
        }
        Err(ClientError::MetaUnreachable(last_error))
    }
}

impl ClusterClient for HttpClusterClient {
    fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClientError> {
        self.meta_get(&["api", "v1", "nodes"], &[("status", "alive")])
    }
    fn list_tables(&self) -> Result<Vec<TableInfo>, ClientError> {
        self.meta_get(&["api", "v1", "tables"], &[("status", "available")])
    }
    fn query_table_config(&self, table_name: &str) -> Result<Vec<PartitionConfig>, ClientError> {
        self.meta_get(&["api", "v1", "tables", table_name, "config"], &[])
    }
    fn open_session(&self, address: &str) -> Arc<dyn NodeSession> {
        Arc::new(HttpNodeSession {
            address: address.to_string(),
            http: self.http.clone(),
            closed: AtomicBool::new(false),
        })
    }
}

impl NodeSession for HttpNodeSession {
    fn address(&self) -> &str {
        &self.address
    }
    fn get_counters(&self, filter: &str) -> Result<Vec<PerfCounter>, ClientError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ClientError::SessionClosed(self.address.clone()));
        }
        http_get_json(&self.http, &self.address, &["api", "v1", "perf-counters"], &[("filter", filter)])
    }
    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!("closed session to {}", self.address);
        }
    }
}

fn http_get_json<T: DeserializeOwned>(
    http: &Client,
    address: &str,
    path: &[&str],
    query: &[(&str, &str)],
) -> Result<T, ClientError>
{
    let request_error = |reason: String| ClientError::Request { address: address.to_string(), reason };

    let mut url = Url::parse(&format!("http://{}/", address))
        .map_err(|e| request_error(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| request_error("address cannot be used as base url".to_string()))?
        .pop_if_empty()
        .extend(path);

    let response = http.get(url.clone())
        .query(query)
        .send()
        .map_err(|e| request_error(e.to_string()))?;
    if !response.status().is_success() {
        debug!("Non success response: {} = {}", url, response.status());
        return Err(request_error(format!("http status {}", response.status())));
    }
    debug!("Success response: {} = {}", url, response.status());
    let body = response.text()
        .map_err(|e| request_error(e.to_string()))?;
    parse_json(address, &body)
}

// This is a separate function in order to allow the tests to use it.
fn parse_json<T: DeserializeOwned>(
    address: &str,
    body: &str,
) -> Result<T, ClientError>
{
    serde_json::from_str(body)
        .map_err(|e| ClientError::Parse { address: address.to_string(), reason: e.to_string() })
}
