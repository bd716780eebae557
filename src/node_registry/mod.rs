//! Module holding the sessions to the alive replica nodes.
//!
//! The registry is refreshed once per collection cycle with the alive nodes listed by the meta server:
//! - a node that is new gets a session opened.
//! - a node that is gone gets its session closed.
//! - a node that is still alive keeps its session.
//!
//! If listing the nodes fails, the registry keeps the nodes it had.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
