//! The impls and functions
//!
use std::{collections::BTreeSet, fmt, sync::mpsc::{channel, RecvTimeoutError}, time::{Duration, Instant}};
use log::*;
use crate::client::ClientError;
use crate::fanout::{FanOutResult, SkippedSource, SourceKind, DEADLINE_EXCEEDED, NO_RESULT};

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Discovery => write!(f, "discovery"),
            SourceKind::Table => write!(f, "table"),
            SourceKind::Node => write!(f, "node"),
        }
    }
}

impl SkippedSource {
    pub fn new(kind: SourceKind, name: &str, reason: &str) -> Self {
        SkippedSource { kind, name: name.to_string(), reason: reason.to_string() }
    }
}

impl fmt::Display for SkippedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.name, self.reason)
    }
}

impl<T> FanOutResult<T> {
    pub fn new() -> Self {
        FanOutResult { results: Vec::new(), skipped: Vec::new() }
    }
}

impl<T> Default for FanOutResult<T> {
    fn default() -> Self {
        FanOutResult::new()
    }
}

/// Runs every task on a pool of `parallel` threads, and collects the results until `timeout` has passed.
///
/// The deadline is shared by all tasks: it is not a per task timeout.
/// A task that failed, panicked or did not answer before the deadline is reported in [FanOutResult::skipped].
/// Tasks are identified by their name, which must be unique.
pub fn fan_out<T, F>(
    kind: SourceKind,
    tasks: Vec<(String, F)>,
    parallel: usize,
    timeout: Duration,
) -> FanOutResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ClientError> + Send + 'static,
{
    let mut fanout = FanOutResult::new();
    if tasks.is_empty() {
        return fanout;
    }

    info!("begin parallel {} read", kind);
    let timer = Instant::now();
    let deadline = timer + timeout;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(parallel.max(1))
        .panic_handler(move |_| error!("{} request panicked", kind))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("unable to create thread pool: {}", e);
            for (name, _) in tasks {
                fanout.skipped.push(SkippedSource::new(kind, &name, &e.to_string()));
            }
            return fanout;
        }
    };

    let (tx, rx) = channel();
    let mut pending = BTreeSet::new();
    for (name, task) in tasks {
        pending.insert(name.clone());
        let tx = tx.clone();
        pool.spawn(move || {
            let result = task();
            // the receiver is gone when the deadline has passed.
            let _ = tx.send((name, result));
        });
    }
    drop(tx);

    let mut deadline_exceeded = false;
    while !pending.is_empty() {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok((name, result)) => {
                pending.remove(&name);
                match result {
                    Ok(data) => fanout.results.push((name, data)),
                    Err(e) => {
                        warn!("{} {} skipped: {}", kind, name, e);
                        fanout.skipped.push(SkippedSource::new(kind, &name, &e.to_string()));
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                deadline_exceeded = true;
                break;
            }
            // all senders are dropped: the remaining tasks panicked.
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    for name in pending {
        let reason = if deadline_exceeded { DEADLINE_EXCEEDED } else { NO_RESULT };
        warn!("{} {} skipped: {}", kind, name, reason);
        fanout.skipped.push(SkippedSource::new(kind, &name, reason));
    }

    info!("end parallel {} read {:?}", kind, timer.elapsed());
    fanout
}
