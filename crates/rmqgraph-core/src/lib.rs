//! Resolved topology model for rmqgraph.
//!
//! Turns the flat records of a broker definitions export into typed queues
//! and exchanges, resolves bindings against them per virtual host, and
//! synthesizes the dead-letter routes that queues declare through their
//! arguments.
//!
//! # Module Structure
//!
//! - [`definitions`]: Raw input records and the JSON loader
//! - [`entity`]: Queue/Exchange entities and their derived attributes
//! - [`binding`]: Binding resolution and dead-letter synthesis
//! - [`order`]: Render-first/last overrides and presentation order
//! - [`topology`]: The assembled, immutable result of a run

pub mod binding;
pub mod definitions;
pub mod diagnostic;
pub mod entity;
pub mod order;
pub mod topology;

mod index;

pub use binding::{Binding, Resolution, resolve_bindings, synthesize_dead_letters};
pub use definitions::{BindingRecord, Definitions, ExchangeRecord, QueueRecord};
pub use diagnostic::Diagnostic;
pub use entity::{
    Arguments, DEFAULT_VHOST, Entity, EntityId, EntityKind, Exchange, Queue, full_name,
    resolve_entities,
};
pub use order::{OrderOverrides, apply_overrides, presentation_order};
pub use topology::Topology;

pub use rmqgraph_error::{Error, ErrorKind, Result};
