//! Traversal trace events and the sinks that receive them.
//!
//! The engine only writes to a sink when debug tracing is enabled. Sinks
//! observe; nothing they do can change a run's result.

use std::fmt;
use tracing::debug;

use crate::entity::Entity;

/// A single observable step of a spread run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Started { start: Entity },
    Rejected { reason: String },
    /// `entity` left the queue; `queue` is what is still waiting.
    Visiting {
        entity: Entity,
        level: usize,
        queue: Vec<Entity>,
    },
    Accepted {
        from: Entity,
        to: Entity,
        level: usize,
    },
    Skipped { from: Entity, to: Entity },
    Completed { reached: usize, depth: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { start } => write!(f, "start: {}", start),
            Self::Rejected { reason } => write!(f, "rejected: {}", reason),
            Self::Visiting {
                entity,
                level,
                queue,
            } => {
                write!(f, "visit {} (level {}), queue: [", entity, level)?;
                for (i, queued) in queue.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", queued)?;
                }
                f.write_str("]")
            }
            Self::Accepted { from, to, level } => {
                write!(f, "  {} -> {} accepted (level {})", from, to, level)
            }
            Self::Skipped { from, to } => write!(f, "  {} -> {} skipped (already informed)", from, to),
            Self::Completed { reached, depth } => {
                write!(f, "done: {} reached, depth {}", reached, depth)
            }
        }
    }
}

/// Receiver of trace events.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Box<T> {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&mut self, event: TraceEvent) {
        debug!(target: "spreadgraph::trace", detail = %event);
    }
}

/// Keeps events in memory, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<TraceEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events rendered one per line.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecordingSink {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visiting_line_lists_queue() {
        let event = TraceEvent::Visiting {
            entity: Entity::from("A"),
            level: 0,
            queue: vec![Entity::from("B"), Entity::from("C")],
        };
        assert_eq!(event.to_string(), "visit A (level 0), queue: [B, C]");
    }

    #[test]
    fn test_recording_sink_through_mut_ref() {
        fn feed(mut sink: impl TraceSink) {
            sink.record(TraceEvent::Skipped {
                from: Entity::from("A"),
                to: Entity::from("B"),
            });
        }

        let mut sink = RecordingSink::new();
        feed(&mut sink);
        assert_eq!(sink.lines(), vec!["  A -> B skipped (already informed)"]);
        sink.clear();
        assert!(sink.events().is_empty());
    }
}
