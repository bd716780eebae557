//! kv_stats: reads the perf-counters of a key-value cluster once, and prints the aggregated stats.
//!
use std::{collections::HashMap, path::Path, sync::Arc};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use serde::Serialize;

use kv_stats::client::HttpClusterClient;
use kv_stats::collector::MATCH_ALL;
use kv_stats::config::{dotenv_writer, Config, ConfigOptions};
use kv_stats::perf_client::{Collected, PerfClient};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Partition,
    Table,
    Cluster,
    Node,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// comma separated meta server addresses (host:port)
    #[arg(short, long)]
    meta_servers: Option<String>,
    /// number of threads per parallel read
    #[arg(long)]
    parallel: Option<String>,
    /// timeout of a single request in milliseconds
    #[arg(long)]
    request_timeout_ms: Option<String>,
    /// deadline for querying all table configs in milliseconds
    #[arg(long)]
    topology_timeout_ms: Option<String>,
    /// deadline for reading the perf-counters of all nodes in milliseconds
    #[arg(long)]
    collect_timeout_ms: Option<String>,
    /// fail if any node or table cannot be read, instead of reporting it as skipped
    #[arg(long)]
    fail_fast: bool,
    /// regex of partition counters that are not aggregated
    #[arg(long)]
    blacklist: Option<String>,
    /// the level of the stats
    #[arg(short, long, value_enum, default_value_t = Level::Table)]
    level: Level,
    /// regex filter for the perf-counters at the node level
    #[arg(short, long, default_value = MATCH_ALL)]
    filter: String,
    /// print json instead of text
    #[arg(long)]
    json: bool,
    /// write the settings to .env
    #[arg(long)]
    write_dotenv: bool,
}

fn output<T: Serialize>(
    collected: &Collected<T>,
    json: bool,
    print: impl Fn(&T),
) -> Result<()>
{
    if json {
        println!("{}", serde_json::to_string_pretty(collected)?);
    } else {
        print(&collected.stats);
        collected.print_skipped();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv().ok();
    let options = Opts::parse();

    let mut changed_options = HashMap::new();
    let config = Config::resolve(&ConfigOptions {
        meta_servers: options.meta_servers.clone(),
        parallel: options.parallel.clone(),
        request_timeout_ms: options.request_timeout_ms.clone(),
        topology_timeout_ms: options.topology_timeout_ms.clone(),
        collect_timeout_ms: options.collect_timeout_ms.clone(),
        fail_fast: options.fail_fast,
        blacklist: options.blacklist.clone(),
    }, &mut changed_options)?;

    let level = options.level;
    let json = options.json;
    let filter = options.filter.clone();

    // the collection uses blocking http and its own thread pools.
    tokio::task::spawn_blocking(move || -> Result<()> {
        let client = HttpClusterClient::new(config.meta_servers.clone(), config.request_timeout)?;
        let mut perf_client = PerfClient::new(Arc::new(client), config.collect);
        let result = match level {
            Level::Partition => output(&perf_client.collect_partition_stats()?, json, |partitions| partitions.iter().for_each(|p| p.print())),
            Level::Table => output(&perf_client.collect_table_stats()?, json, |tables| tables.iter().for_each(|t| t.print())),
            Level::Cluster => output(&perf_client.collect_cluster_stats()?, json, |cluster| cluster.print()),
            Level::Node => output(&perf_client.collect_node_stats(&filter)?, json, |nodes| nodes.iter().for_each(|n| n.print())),
        };
        perf_client.close();
        result
    }).await??;

    dotenv_writer(options.write_dotenv, &changed_options, Path::new(".env"))?;
    Ok(())
}
