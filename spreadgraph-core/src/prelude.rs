//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use spreadgraph_core::prelude::*;
//! ```

// Graph model
pub use crate::entity::{Entity, NodeLabel};
pub use crate::model::SocialGraph;

// Spread engine and its output
pub use crate::engine::{RunState, SpreadEngine};
pub use crate::spread::{Discovery, SpreadGraph, SpreadResult};
pub use crate::trace::{RecordingSink, TraceEvent, TraceSink};

// Errors
pub use crate::error::{ErrorKind, SpreadGraphError, SpreadGraphResult};
