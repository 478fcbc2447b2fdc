//! spreadgraph-core: breadth-first information spread over social graphs.
//!
//! Given an undirected graph of people and their connections, computes from a
//! chosen start person the order in which information reaches everyone else
//! and the hop level at which each person first hears it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spreadgraph_core::prelude::*;
//!
//! let graph = SocialGraph::from_parts(
//!     ["A", "B", "C", "D"],
//!     [("A", "B"), ("B", "C"), ("C", "D")],
//! );
//! let result = SpreadEngine::new(&graph).run(Some("A"));
//!
//! assert_eq!(result.depth(), 3);
//! for d in result.order() {
//!     println!("{} at level {}", d.entity, d.level);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`model`]: the undirected connections graph and its validation
//! - [`engine`]: BFS spread engine
//! - [`spread`]: spread result and directed spread tree
//! - [`trace`]: injectable debug trace sinks
//! - [`random`]: random community generation
//! - [`report`]: text dump and JSON output
//! - [`config`]: `spreadgraph.toml` loading
//! - [`error`]: typed error handling
//!
//! # Cargo Features
//!
//! - `random` (default): Erdos-Renyi community generation
//! - `visualize` (default): DOT and visualizer JSON export
//! - `full`: Enable all optional features

pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod random;
pub mod report;
pub mod sample;
pub mod spread;
pub mod trace;

#[cfg(feature = "visualize")]
pub mod visualize;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{ErrorKind, IoResultExt, SpreadGraphError, SpreadGraphResult};

// Graph model
pub use entity::{Entity, NodeLabel};
pub use model::SocialGraph;

// Engine and results
pub use engine::{RunState, SpreadEngine};
pub use spread::{Discovery, SpreadGraph, SpreadResult};
pub use trace::{RecordingSink, TraceEvent, TraceSink, TracingSink};

// Random generation
pub use random::{RandomGraphSource, PERSON_PREFIX};
#[cfg(feature = "random")]
pub use random::ErdosRenyi;

// Configuration
pub use config::{load_config, load_config_file, OutputConfig, RandomConfig, SpreadConfig};

// Logging
pub use logging::{default_directive, init_structured_logging};

// Reporting
pub use report::{describe, print_json, print_plain};

// Sample network
pub use sample::{sample_community, SAMPLE_START};

#[cfg(feature = "visualize")]
pub use visualize::{
    generate_dot, spread_to_visualizer_json, VisualizerEdge, VisualizerGraph, VisualizerNode,
    VisualizerStats,
};
