//! The impls and functions
//!
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use log::*;
use crate::client::{ClientError, ClusterClient, PartitionConfig, TableInfo};
use crate::fanout::{fan_out, SourceKind};
use crate::perf_counter::Gpid;
use crate::topology::Topology;

/// Lists the available tables at the meta server.
pub fn list_tables(
    client: &dyn ClusterClient,
) -> Result<Vec<TableInfo>, ClientError>
{
    let tables = client.list_tables()?;
    debug!("listed {} tables", tables.len());
    Ok(tables)
}

impl Topology {
    /// Lists the tables and resolves the primaries of all their partitions.
    ///
    /// Failing to list the tables is an error, a failing table config query skips that table.
    pub fn resolve(
        client: &Arc<dyn ClusterClient>,
        parallel: usize,
        timeout: Duration,
    ) -> Result<Topology, ClientError>
    {
        let tables = list_tables(client.as_ref())?;
        Ok(Topology::resolve_primaries(client, tables, parallel, timeout))
    }
    /// Queries the config of every table in parallel and builds the partition to primary mapping.
    ///
    /// Partitions without a primary and partitions outside the partition count of the table are left out.
    pub fn resolve_primaries(
        client: &Arc<dyn ClusterClient>,
        tables: Vec<TableInfo>,
        parallel: usize,
        timeout: Duration,
    ) -> Topology
    {
        let tasks = tables.iter()
            .map(|table| {
                let client = Arc::clone(client);
                let table_name = table.table_name.clone();
                (table.table_name.clone(), move || client.query_table_config(&table_name))
            })
            .collect();
        let fanout = fan_out(SourceKind::Table, tasks, parallel, timeout);

        let mut configs: BTreeMap<String, Vec<PartitionConfig>> = fanout.results.into_iter().collect();
        let mut topology = Topology { skipped: fanout.skipped, ..Default::default() };

        for table in tables {
            let partitions = match configs.remove(&table.table_name) {
                Some(partitions) => partitions,
                None => continue,
            };
            for partition in partitions {
                if partition.partition_index < 0 || partition.partition_index >= table.partition_count {
                    debug!("{}: partition {} out of range of partition count {}", table.table_name, partition.partition_index, table.partition_count);
                    continue;
                }
                match partition.primary {
                    Some(primary) if !primary.is_empty() => {
                        topology.primaries.insert(Gpid::new(table.app_id, partition.partition_index), primary);
                    }
                    _ => debug!("{}: partition {} has no primary", table.table_name, partition.partition_index),
                }
            }
            topology.tables.push(table);
        }
        topology
    }
}
