//! Core types for graph rendering.

use std::fmt;

use rmqgraph_core::{EntityId, EntityKind};

// Configuration

/// Edge color for synthesized dead-letter bindings.
pub const DEAD_LETTER_COLOR: &str = "red";

/// Fill color of queue nodes.
pub const QUEUE_FILL: &str = "#DAE8FC";

/// Fill color of exchange nodes.
pub const EXCHANGE_FILL: &str = "#F8CECC";

// Render Handle

/// Opaque reference to a node in the produced graph.
///
/// Handed out in node emission order; only meaningful within the
/// `GraphDocument` that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderHandle(pub(crate) u32);

impl RenderHandle {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// Node styling

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Box,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Box => "box",
        }
    }
}

/// Outline of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: Shape,
    pub outline: LineStyle,
    pub rounded: bool,
    pub fill_color: &'static str,
}

impl NodeStyle {
    /// Comma-joined style list, e.g. `dashed,rounded,filled`.
    pub fn style_list(&self) -> String {
        let mut parts = vec![self.outline.as_str()];
        if self.rounded {
            parts.push("rounded");
        }
        parts.push("filled");
        parts.join(",")
    }
}

/// Node label: an emphasized title followed by detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub title: String,
    pub lines: Vec<String>,
}

// Descriptors

/// One node per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub handle: RenderHandle,
    pub entity: EntityId,
    pub kind: EntityKind,
    /// Qualified name, e.g. `tenant-a/orders`
    pub full_name: String,
    pub label: Label,
    pub style: NodeStyle,
}

/// One edge per binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDescriptor {
    pub from: RenderHandle,
    pub to: RenderHandle,
    /// Routing key, empty when none
    pub label: String,
    pub dead_letter: bool,
}

impl EdgeDescriptor {
    /// Explicit color, `None` for the renderer's default.
    pub fn color(&self) -> Option<&'static str> {
        self.dead_letter.then_some(DEAD_LETTER_COLOR)
    }
}

/// All nodes and edges of one vhost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Cluster label: the raw vhost name
    pub vhost: String,
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

impl Cluster {
    pub fn new(vhost: impl Into<String>) -> Self {
        Self {
            vhost: vhost.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// The complete graph handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDocument {
    pub name: String,
    pub clusters: Vec<Cluster>,
}

impl GraphDocument {
    pub fn node_count(&self) -> usize {
        self.clusters.iter().map(|c| c.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.clusters.iter().map(|c| c.edges.len()).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.clusters.iter().flat_map(|c| c.nodes.iter())
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeDescriptor> {
        self.clusters.iter().flat_map(|c| c.edges.iter())
    }
}
