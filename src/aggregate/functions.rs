//! The impls and functions
//!
use chrono::Local;
use std::collections::BTreeMap;
use log::*;
use colored::*;
use crate::aggregate::{PartitionStats, TableStats, ClusterStats, READ_OPERATIONS, WRITE_OPERATIONS};
use crate::client::TableInfo;
use crate::collector::NodeStats;
use crate::perf_counter::{decode_partition_perf_counter, AggregationPolicy, Gpid, PartitionPerfCounter};
use crate::topology::PrimaryMap;

impl PartitionStats {
    pub fn new(gpid: Gpid, addr: &str) -> Self {
        PartitionStats { gpid, addr: addr.to_string(), stats: BTreeMap::new() }
    }
    /// Sets the counter, and returns the previous value if the counter was set already.
    pub fn update(&mut self, counter: PartitionPerfCounter) -> Option<f64> {
        self.stats.insert(counter.name, counter.value)
    }
    pub fn print(&self) {
        println!("{} {}", self.gpid.to_string().bold(), self.addr);
        print_stats(&self.stats);
    }
}

/// Attributes the perf-counters of the nodes to the partitions in `primaries`.
///
/// Every partition in `primaries` gets a [PartitionStats], even if its primary reported nothing.
/// A counter is only taken if the reporting node is the primary of the partition:
/// counters from other replicas, of unknown partitions, node counters and counters the policy excludes are discarded.
pub fn aggregate_partitions(
    primaries: &PrimaryMap,
    nodes: &[NodeStats],
    policy: &AggregationPolicy,
) -> BTreeMap<Gpid, PartitionStats>
{
    let mut partitions: BTreeMap<Gpid, PartitionStats> = primaries.iter()
        .map(|(gpid, addr)| (*gpid, PartitionStats::new(*gpid, addr)))
        .collect();

    for node in nodes {
        for (name, value) in &node.stats {
            let counter = match decode_partition_perf_counter(name, *value) {
                Some(counter) => counter,
                None => continue,
            };
            if !policy.aggregatable(&counter) {
                continue;
            }
            // a node reports a name once, duplicates were resolved in NodeStats::insert.
            match partitions.get_mut(&counter.gpid) {
                Some(partition) if partition.addr == node.addr => {
                    partition.update(counter);
                }
                _ => trace!("discard {} from {}: not the primary of {}", name, node.addr, counter.gpid),
            }
        }
    }

    for partition in partitions.values_mut() {
        extend_stats(&mut partition.stats);
    }
    partitions
}

/// Adds the derived stats `read_qps`, `read_bytes`, `write_qps` and `write_bytes`.
///
/// A missing base stat counts as zero. The derived stats are overwritten, so extending twice gives the same result.
pub fn extend_stats(stats: &mut BTreeMap<String, f64>) {
    aggregate_custom_stats(&READ_OPERATIONS, "_qps", stats, "read_qps");
    aggregate_custom_stats(&READ_OPERATIONS, "_bytes", stats, "read_bytes");
    aggregate_custom_stats(&WRITE_OPERATIONS, "_qps", stats, "write_qps");
    aggregate_custom_stats(&WRITE_OPERATIONS, "_bytes", stats, "write_bytes");
}

fn aggregate_custom_stats(
    operations: &[&str],
    suffix: &str,
    stats: &mut BTreeMap<String, f64>,
    result_name: &str,
)
{
    let aggregated: f64 = operations.iter()
        .filter_map(|operation| stats.get(&format!("{}{}", operation, suffix)))
        .sum();
    stats.insert(result_name.to_string(), aggregated);
}

/// Sums the stats metric by metric. No stats give an empty map.
pub fn sum_stats<'a, I>(all_stats: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a BTreeMap<String, f64>>,
{
    let mut sum = BTreeMap::new();
    for stats in all_stats {
        for (name, value) in stats {
            *sum.entry(name.clone()).or_insert(0.0) += value;
        }
    }
    sum
}

impl TableStats {
    /// Creates the table stats with an empty [PartitionStats] for every partition of the table.
    pub fn new(
        info: &TableInfo,
        primaries: &PrimaryMap,
    ) -> Self
    {
        let partitions = (0..info.partition_count)
            .map(|partition_index| {
                let gpid = Gpid::new(info.app_id, partition_index);
                let addr = primaries.get(&gpid).map(String::as_str).unwrap_or_default();
                (partition_index, PartitionStats::new(gpid, addr))
            })
            .collect();
        TableStats {
            table_name: info.table_name.clone(),
            app_id: info.app_id,
            partitions,
            timestamp: Local::now(),
            stats: BTreeMap::new(),
        }
    }
    /// Sums the partition stats into the table stats, and adds the derived stats.
    ///
    /// A table without partitions still gets the derived stats, all zero.
    pub fn aggregate(&mut self) {
        self.timestamp = Local::now();
        self.stats = sum_stats(self.partitions.values().map(|partition| &partition.stats));
        extend_stats(&mut self.stats);
    }
    pub fn print(&self) {
        println!("{} (app_id: {}, partitions: {}) {}",
                 self.table_name.bold(),
                 self.app_id,
                 self.partitions.len(),
                 self.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        print_stats(&self.stats);
    }
}

/// Builds the table stats of `tables` out of the partition stats.
pub fn aggregate_tables(
    tables: &[TableInfo],
    primaries: &PrimaryMap,
    mut partitions: BTreeMap<Gpid, PartitionStats>,
) -> Vec<TableStats>
{
    let mut all_tables = Vec::with_capacity(tables.len());
    for info in tables {
        let mut table = TableStats::new(info, primaries);
        for (partition_index, partition) in table.partitions.iter_mut() {
            if let Some(stats) = partitions.remove(&Gpid::new(info.app_id, *partition_index)) {
                *partition = stats;
            }
        }
        table.aggregate();
        all_tables.push(table);
    }
    all_tables
}

impl ClusterStats {
    /// Sums the stats of all tables. The derived stats were computed at the table level and are summed as well.
    pub fn aggregate(tables: &[TableStats]) -> Self {
        ClusterStats {
            timestamp: Local::now(),
            stats: sum_stats(tables.iter().map(|table| &table.stats)),
        }
    }
    pub fn print(&self) {
        println!("{} {}", "cluster".bold(), self.timestamp.format("%Y-%m-%d %H:%M:%S"));
        print_stats(&self.stats);
    }
}

fn print_stats(stats: &BTreeMap<String, f64>) {
    for (name, value) in stats {
        println!("  {:50} {:>20.2}", name, value);
    }
}
