//! The impls and functions
//!
use std::fmt;
use regex::Regex;
use crate::perf_counter::{Gpid, PerfCounter, PartitionPerfCounter, AggregationPolicy, DEFAULT_BLACKLIST};

impl Gpid {
    pub fn new(app_id: i32, partition_index: i32) -> Self {
        Gpid { app_id, partition_index }
    }
}

impl fmt::Display for Gpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_id, self.partition_index)
    }
}

impl PerfCounter {
    pub fn new(name: &str, value: f64) -> Self {
        PerfCounter { name: name.to_string(), value }
    }
}

/// Decodes a perf-counter name of the form `<app_id>.<partition_index>.<metric>`.
///
/// Returns `None` if the counter is not a partition counter.
/// A name that cannot be parsed is a node counter too: decoding never fails.
/// The metric is everything after the second dot, so it may contain dots itself.
pub fn decode_partition_perf_counter(
    name: &str,
    value: f64,
) -> Option<PartitionPerfCounter>
{
    let mut fields = name.splitn(3, '.');
    let app_id = parse_id(fields.next()?)?;
    let partition_index = parse_id(fields.next()?)?;
    let metric = fields.next()?;
    if metric.is_empty() {
        return None;
    }
    Some(PartitionPerfCounter {
        gpid: Gpid::new(app_id, partition_index),
        name: metric.to_string(),
        value,
    })
}

// only plain digits: i32::from_str would also accept a leading '+'.
fn parse_id(field: &str) -> Option<i32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl AggregationPolicy {
    pub fn new(blacklist: &str) -> Result<Self, regex::Error> {
        Ok(AggregationPolicy { blacklist: Regex::new(blacklist)? })
    }
    /// Returns true if the partition counter is summed into the table and cluster stats.
    pub fn aggregatable(&self, counter: &PartitionPerfCounter) -> bool {
        !self.blacklist.is_match(&counter.name)
    }
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        AggregationPolicy::new(DEFAULT_BLACKLIST).expect("the default blacklist is a valid regex")
    }
}
