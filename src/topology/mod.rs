//! Module for resolving the cluster topology at the meta server.
//!
//! The topology is the list of available tables, and for every partition of every table the address of its primary.
//! The table configs are queried in parallel, under a single deadline for all tables together.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
