//! The impls and functions
//!
use std::{sync::Arc, time::{Duration, Instant}};
use log::*;
use colored::*;
use itertools::Itertools;
use crate::aggregate::{aggregate_partitions, aggregate_tables, ClusterStats, PartitionStats, TableStats};
use crate::client::ClusterClient;
use crate::collector::{collect, NodeStats, MATCH_PARTITION};
use crate::fanout::{SkippedSource, SourceKind};
use crate::node_registry::NodeRegistry;
use crate::perf_client::{Collected, CollectSettings, CycleError, FailurePolicy, PerfClient};
use crate::perf_counter::AggregationPolicy;
use crate::topology::Topology;

// the topology and the partition counters of the nodes, read in one cycle.
struct Cycle {
    topology: Topology,
    nodes: Vec<NodeStats>,
    skipped: Vec<SkippedSource>,
}

impl Default for CollectSettings {
    fn default() -> Self {
        CollectSettings {
            parallel: 8,
            topology_timeout: Duration::from_secs(10),
            collect_timeout: Duration::from_secs(10),
            failure_policy: FailurePolicy::default(),
            policy: AggregationPolicy::default(),
        }
    }
}

impl<T> Collected<T> {
    /// True if no source was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
    pub fn print_skipped(&self) {
        for skipped in &self.skipped {
            println!("{} {}", "skipped".red(), skipped);
        }
    }
}

pub fn describe_skipped(skipped: &[SkippedSource]) -> String {
    skipped.iter().join(", ")
}

impl PerfClient {
    pub fn new(
        client: Arc<dyn ClusterClient>,
        settings: CollectSettings,
    ) -> Self
    {
        PerfClient { client, nodes: NodeRegistry::new(), settings }
    }
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }
    /// Collects the stats of all partitions. Only the counters reported by the primary of a partition are taken.
    pub fn collect_partition_stats(&mut self) -> Result<Collected<Vec<PartitionStats>>, CycleError> {
        let cycle = self.run_cycle()?;
        let partitions = aggregate_partitions(&cycle.topology.primaries, &cycle.nodes, &self.settings.policy);
        Ok(Collected {
            stats: partitions.into_values().collect(),
            skipped: cycle.skipped,
        })
    }
    /// Collects the stats of all tables whose config could be resolved.
    pub fn collect_table_stats(&mut self) -> Result<Collected<Vec<TableStats>>, CycleError> {
        let cycle = self.run_cycle()?;
        let partitions = aggregate_partitions(&cycle.topology.primaries, &cycle.nodes, &self.settings.policy);
        Ok(Collected {
            stats: aggregate_tables(&cycle.topology.tables, &cycle.topology.primaries, partitions),
            skipped: cycle.skipped,
        })
    }
    pub fn collect_cluster_stats(&mut self) -> Result<Collected<ClusterStats>, CycleError> {
        let tables = self.collect_table_stats()?;
        Ok(Collected {
            stats: ClusterStats::aggregate(&tables.stats),
            skipped: tables.skipped,
        })
    }
    /// Collects the raw perf-counters matching `filter` of every node, without topology.
    pub fn collect_node_stats(
        &mut self,
        filter: &str,
    ) -> Result<Collected<Vec<NodeStats>>, CycleError>
    {
        let mut skipped = self.refresh_nodes();
        let fanout = collect(self.nodes.sessions(), filter, self.settings.parallel, self.settings.collect_timeout);
        skipped.extend(fanout.skipped);
        let skipped = self.check_skipped(skipped)?;
        Ok(Collected {
            stats: fanout.results.into_iter().map(|(_, node)| node).collect(),
            skipped,
        })
    }
    /// Closes the sessions to all nodes.
    pub fn close(&mut self) {
        self.nodes.close_all();
    }
    // a failure to list the nodes keeps the current sessions, and is reported as a skipped source.
    fn refresh_nodes(&mut self) -> Vec<SkippedSource> {
        match self.nodes.refresh(self.client.as_ref()) {
            Ok(_) => Vec::new(),
            Err(e) => {
                error!("skip updating nodes due to list-nodes failure: {}", e);
                vec![SkippedSource::new(SourceKind::Discovery, "list_nodes", &e.to_string())]
            }
        }
    }
    fn run_cycle(&mut self) -> Result<Cycle, CycleError> {
        info!("begin collection cycle");
        let timer = Instant::now();

        let mut skipped = self.refresh_nodes();
        let sessions = self.nodes.sessions();
        let client = &self.client;
        let settings = &self.settings;
        let (topology, fanout) = rayon::join(
            || Topology::resolve(client, settings.parallel, settings.topology_timeout),
            || collect(sessions, MATCH_PARTITION, settings.parallel, settings.collect_timeout),
        );
        let mut topology = topology.map_err(CycleError::ListTables)?;
        skipped.append(&mut topology.skipped);
        skipped.extend(fanout.skipped);
        let skipped = self.check_skipped(skipped)?;

        info!("end collection cycle: tables: {}, partitions: {}, nodes: {}, skipped: {}, {:?}",
              topology.tables.len(),
              topology.primaries.len(),
              fanout.results.len(),
              skipped.len(),
              timer.elapsed()
        );
        Ok(Cycle {
            topology,
            nodes: fanout.results.into_iter().map(|(_, node)| node).collect(),
            skipped,
        })
    }
    fn check_skipped(&self, skipped: Vec<SkippedSource>) -> Result<Vec<SkippedSource>, CycleError> {
        if !skipped.is_empty() && self.settings.failure_policy == FailurePolicy::FailFast {
            return Err(CycleError::PartialFailure { skipped });
        }
        Ok(skipped)
    }
}
