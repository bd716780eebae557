//! Module for the configuration of the collector.
//!
//! Every setting is resolved in this order:
//! 1. the command line option, if set.
//! 2. the environment variable, which can be set in a `.env` file.
//! 3. the default.
//!
//! The settings that were set by option or environment can be written to `.env`,
//! so that a next run uses the same settings.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
