//! Module for running requests against many sources in parallel under one deadline.
//!
//! Every request runs on a rayon thread pool and sends its outcome over a channel.
//! A single receiver merges the outcomes until all requests answered or the deadline passed.
//! Requests that have not answered by the deadline are abandoned and reported as skipped.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
