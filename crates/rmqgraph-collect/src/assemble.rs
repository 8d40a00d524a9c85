//! Cluster, node and edge assembly from a resolved Topology.

use std::collections::HashMap;

use tracing::debug;

use rmqgraph_core::{Binding, EntityId, Error, Result, Topology};

use crate::describe::describe_entity;
use crate::types::{Cluster, EdgeDescriptor, GraphDocument, NodeDescriptor, RenderHandle};

/// Accumulates descriptors for one document and owns the mapping from
/// entity identity to render handle.
///
/// Handles are issued sequentially per builder, so two builders never share
/// state.
pub struct GraphBuilder<'t> {
    topology: &'t Topology,
    handles: HashMap<EntityId, RenderHandle>,
    clusters: Vec<Cluster>,
    next_handle: u32,
}

impl<'t> GraphBuilder<'t> {
    pub fn new(topology: &'t Topology) -> Self {
        Self {
            topology,
            handles: HashMap::new(),
            clusters: Vec::new(),
            next_handle: 0,
        }
    }

    /// Open a new cluster; subsequent nodes and edges land in it.
    pub fn start_cluster(&mut self, vhost: &str) -> &mut Self {
        self.clusters.push(Cluster::new(vhost));
        self
    }

    /// Emit the node for `id` and assign its render handle.
    pub fn add_node(&mut self, id: EntityId) -> Result<RenderHandle> {
        let topology = self.topology;
        let entity = topology.entity(id)?;
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;

        let (label, style) = describe_entity(entity);
        let node = NodeDescriptor {
            handle,
            entity: id,
            kind: entity.kind(),
            full_name: entity.full_name(),
            label,
            style,
        };
        self.current_cluster("graph::add_node")?.nodes.push(node);
        self.handles.insert(id, handle);
        Ok(handle)
    }

    /// Emit the edge for `binding`. Both endpoints must already have nodes.
    pub fn add_edge(&mut self, binding: &Binding) -> Result<()> {
        let from = self.handle_of(binding.source())?;
        let to = self.handle_of(binding.destination())?;
        let edge = EdgeDescriptor {
            from,
            to,
            label: binding.routing_key().to_string(),
            dead_letter: binding.is_dead_letter(),
        };
        self.current_cluster("graph::add_edge")?.edges.push(edge);
        Ok(())
    }

    /// Render handle of an entity that already has a node.
    pub fn handle(&self, id: EntityId) -> Option<RenderHandle> {
        self.handles.get(&id).copied()
    }

    pub fn build(self, name: &str) -> GraphDocument {
        GraphDocument {
            name: name.to_string(),
            clusters: self.clusters,
        }
    }

    fn handle_of(&self, id: EntityId) -> Result<RenderHandle> {
        match self.handle(id) {
            Some(handle) => Ok(handle),
            None => {
                let entity = self.topology.entity(id)?;
                Err(
                    Error::entity_not_found(entity.kind().as_str(), entity.vhost(), entity.name())
                        .with_operation("graph::add_edge"),
                )
            }
        }
    }

    fn current_cluster(&mut self, operation: &'static str) -> Result<&mut Cluster> {
        self.clusters.last_mut().ok_or_else(|| {
            Error::unexpected("no cluster started before emitting descriptors")
                .with_operation(operation)
        })
    }
}

/// Partition the topology by vhost and emit its descriptors.
///
/// Clusters follow first-appearance vhost order; nodes follow presentation
/// order; edges follow binding order. Every node of a cluster is emitted
/// before its edges.
pub fn assemble(topology: &Topology) -> Result<GraphDocument> {
    let mut nodes_by_vhost: HashMap<&str, Vec<EntityId>> = HashMap::new();
    for id in topology.presentation_order() {
        let entity = topology.entity(id)?;
        nodes_by_vhost.entry(entity.vhost()).or_default().push(id);
    }

    let mut edges_by_vhost: HashMap<&str, Vec<&Binding>> = HashMap::new();
    for binding in topology.bindings() {
        edges_by_vhost
            .entry(binding.vhost())
            .or_default()
            .push(binding);
    }

    let mut builder = GraphBuilder::new(topology);
    for vhost in topology.vhosts() {
        builder.start_cluster(vhost);
        for id in nodes_by_vhost.remove(vhost).unwrap_or_default() {
            builder.add_node(id)?;
        }
        for binding in edges_by_vhost.remove(vhost).unwrap_or_default() {
            builder.add_edge(binding)?;
        }
    }

    let document = builder.build("G");
    debug!(
        clusters = document.clusters.len(),
        nodes = document.node_count(),
        edges = document.edge_count(),
        "graph assembled"
    );
    Ok(document)
}
