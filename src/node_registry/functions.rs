//! The impls and functions
//!
use std::{collections::BTreeMap, sync::Arc, time::Instant};
use log::*;
use crate::client::{ClientError, ClusterClient, NodeSession};
use crate::node_registry::{NodeRegistry, RefreshSummary};

impl NodeRegistry {
    pub fn new() -> Self {
        Default::default()
    }
    /// Lists the alive nodes at the meta server and applies them to the registry.
    ///
    /// When listing fails the registry is left untouched and the error is returned.
    pub fn refresh(
        &mut self,
        client: &dyn ClusterClient,
    ) -> Result<RefreshSummary, ClientError>
    {
        let timer = Instant::now();
        let nodes = client.list_nodes()?;
        let summary = self.apply(client, nodes.into_iter().map(|node| node.address));
        info!("refreshed nodes: opened: {}, closed: {}, kept: {}, {:?}",
              summary.opened.len(),
              summary.closed.len(),
              summary.kept.len(),
              timer.elapsed()
        );
        Ok(summary)
    }
    /// Makes the registry hold a session for exactly the given addresses.
    ///
    /// Sessions of addresses that are already known are reused as they are.
    pub fn apply<I>(
        &mut self,
        client: &dyn ClusterClient,
        addresses: I,
    ) -> RefreshSummary
    where
        I: IntoIterator<Item = String>,
    {
        let mut summary = RefreshSummary::default();
        let mut new_nodes: BTreeMap<String, Arc<dyn NodeSession>> = BTreeMap::new();

        for address in addresses {
            if address.is_empty() || new_nodes.contains_key(&address) {
                continue;
            }
            match self.nodes.remove(&address) {
                Some(session) => {
                    summary.kept.push(address.clone());
                    new_nodes.insert(address, session);
                }
                None => {
                    debug!("open session to {}", address);
                    new_nodes.insert(address.clone(), client.open_session(&address));
                    summary.opened.push(address);
                }
            }
        }
        // what is left are the nodes that are gone.
        for (address, session) in std::mem::take(&mut self.nodes) {
            debug!("close session to {}", address);
            session.close();
            summary.closed.push(address);
        }
        self.nodes = new_nodes;
        summary
    }
    pub fn sessions(&self) -> Vec<Arc<dyn NodeSession>> {
        self.nodes.values().cloned().collect()
    }
    pub fn addresses(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Closes all sessions, used at shutdown.
    pub fn close_all(&mut self) {
        for (address, session) in std::mem::take(&mut self.nodes) {
            debug!("close session to {}", address);
            session.close();
        }
    }
}

impl Drop for NodeRegistry {
    fn drop(&mut self) {
        self.close_all();
    }
}
