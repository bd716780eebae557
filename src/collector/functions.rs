//! The impls and functions
//!
use std::{sync::Arc, time::Duration};
use log::*;
use colored::*;
use crate::client::{ClientError, NodeSession};
use crate::collector::NodeStats;
use crate::fanout::{fan_out, FanOutResult, SourceKind};
use crate::perf_counter::PerfCounter;

impl NodeStats {
    pub fn new(addr: &str) -> Self {
        NodeStats { addr: addr.to_string(), ..Default::default() }
    }
    /// Sets the counter, and returns the previous value if the node reported the name already.
    pub fn insert(&mut self, counter: PerfCounter) -> Option<f64> {
        let previous = self.stats.insert(counter.name.clone(), counter.value);
        if let Some(previous) = previous {
            warn!("duplicate counter {} from {}, replaced value {}", counter.name, self.addr, previous);
        }
        previous
    }
    /// A node returning the same name twice keeps the last value.
    pub fn from_counters(
        addr: &str,
        counters: Vec<PerfCounter>,
    ) -> Self
    {
        let mut node = NodeStats::new(addr);
        for counter in counters {
            node.insert(counter);
        }
        node
    }
    pub fn print(&self) {
        println!("{}", self.addr.bold());
        for (name, value) in &self.stats {
            println!("  {:50} {:>20.2}", name, value);
        }
    }
}

/// Reads the perf-counters matching `filter` from every session in parallel.
///
/// A node that fails or does not answer within `timeout` is reported in [FanOutResult::skipped].
pub fn collect(
    sessions: Vec<Arc<dyn NodeSession>>,
    filter: &str,
    parallel: usize,
    timeout: Duration,
) -> FanOutResult<NodeStats>
{
    let tasks = sessions.into_iter()
        .map(|session| {
            let filter = filter.to_string();
            (session.address().to_string(), move || -> Result<NodeStats, ClientError> {
                let counters = session.get_counters(&filter)?;
                Ok(NodeStats::from_counters(session.address(), counters))
            })
        })
        .collect();
    fan_out(SourceKind::Node, tasks, parallel, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use crate::collector::{MATCH_ALL, MATCH_PARTITION};

    struct TestSession {
        address: String,
        counters: Result<Vec<PerfCounter>, ClientError>,
    }

    impl NodeSession for TestSession {
        fn address(&self) -> &str { &self.address }
        fn get_counters(&self, filter: &str) -> Result<Vec<PerfCounter>, ClientError> {
            let filter = Regex::new(filter).unwrap();
            self.counters.clone().map(|counters| counters.into_iter().filter(|c| filter.is_match(&c.name)).collect())
        }
        fn close(&self) {}
    }

    fn session(address: &str, counters: Result<Vec<PerfCounter>, ClientError>) -> Arc<dyn NodeSession> {
        Arc::new(TestSession { address: address.to_string(), counters })
    }

    fn counters() -> Vec<PerfCounter> {
        vec![
            PerfCounter::new("1.0.get_qps", 10.0),
            PerfCounter::new("1.0.put_qps", 5.0),
            PerfCounter::new("memused.res", 2048.0),
        ]
    }

    #[test]
    fn unit_collect_all_counters() {
        let result = collect(vec![session("x:1", Ok(counters()))], MATCH_ALL, 2, Duration::from_secs(5));
        assert_eq!(result.results.len(), 1);
        let (addr, node) = &result.results[0];
        assert_eq!(addr, "x:1");
        assert_eq!(node.addr, "x:1");
        assert_eq!(node.stats.len(), 3);
        assert_eq!(node.stats["memused.res"], 2048.0);
    }

    #[test]
    fn unit_collect_partition_counters_only() {
        let result = collect(vec![session("x:1", Ok(counters()))], MATCH_PARTITION, 2, Duration::from_secs(5));
        let (_, node) = &result.results[0];
        assert_eq!(node.stats.keys().collect::<Vec<_>>(), vec!["1.0.get_qps", "1.0.put_qps"]);
    }

    #[test]
    fn unit_collect_skips_failing_node() {
        let failure = ClientError::Request { address: "y:1".to_string(), reason: "connection refused".to_string() };
        let result = collect(
            vec![session("x:1", Ok(counters())), session("y:1", Err(failure))],
            MATCH_ALL,
            2,
            Duration::from_secs(5),
        );
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].0, "x:1");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].name, "y:1");
        assert_eq!(result.skipped[0].kind, SourceKind::Node);
    }

    #[test]
    fn unit_node_stats_last_value_wins() {
        let node = NodeStats::from_counters("x:1", vec![PerfCounter::new("a", 1.0), PerfCounter::new("a", 2.0)]);
        assert_eq!(node.stats["a"], 2.0);
    }

    #[test]
    fn unit_node_stats_insert_reports_duplicate() {
        let mut node = NodeStats::new("x:1");
        assert_eq!(node.insert(PerfCounter::new("1.0.get_qps", 1.0)), None);
        assert_eq!(node.insert(PerfCounter::new("1.0.put_qps", 3.0)), None);
        assert_eq!(node.insert(PerfCounter::new("1.0.get_qps", 2.0)), Some(1.0));
        assert_eq!(node.stats.len(), 2);
        assert_eq!(node.stats["1.0.get_qps"], 2.0);
    }
}
