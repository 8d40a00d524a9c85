//! Node and edge descriptors for graph rendering.
//!
//! This crate provides format-agnostic types and the assembly step that
//! partitions a resolved `Topology` into one cluster per vhost. The
//! descriptors can be consumed by any renderer (DOT, Graphviz formats, ...).
//!
//! # Module Structure
//!
//! - [`types`]: Core types (GraphDocument, Cluster, NodeDescriptor, ...)
//! - [`describe`]: Labels and styles per entity variant
//! - [`assemble`]: Cluster/node/edge assembly from a Topology

mod assemble;
mod describe;
mod types;

pub use assemble::{GraphBuilder, assemble};
pub use describe::{Describe, QUEUE_LABEL_ARGUMENTS, describe_entity};
pub use types::{
    Cluster, DEAD_LETTER_COLOR, EdgeDescriptor, GraphDocument, Label, LineStyle, NodeDescriptor,
    NodeStyle, RenderHandle, Shape,
};
