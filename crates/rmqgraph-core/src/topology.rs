//! The resolved topology of one run.

use std::collections::HashSet;
use std::time::Instant;

use tracing::info;

use crate::binding::{Binding, resolve_bindings};
use crate::definitions::Definitions;
use crate::diagnostic::Diagnostic;
use crate::entity::{Entity, EntityId, Exchange, Queue, resolve_entities};
use crate::order::{OrderOverrides, apply_overrides, presentation_order};
use crate::{Error, ErrorKind, Result};

/// Queues, exchanges and bindings resolved from one definitions document.
///
/// Immutable once built: every binding endpoint is an entity of this
/// topology in the binding's own vhost.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    queues: Vec<Queue>,
    exchanges: Vec<Exchange>,
    bindings: Vec<Binding>,
    diagnostics: Vec<Diagnostic>,
}

impl Topology {
    /// Resolve entities, apply ordering overrides, then resolve and
    /// synthesize bindings.
    pub fn build(defs: &Definitions, overrides: &OrderOverrides) -> Self {
        let start = Instant::now();

        let (mut queues, mut exchanges) = resolve_entities(&defs.queues, &defs.exchanges);
        apply_overrides(&mut queues, &mut exchanges, overrides);
        let resolution = resolve_bindings(&defs.bindings, &queues, &exchanges);

        let topology = Self {
            queues,
            exchanges,
            bindings: resolution.bindings,
            diagnostics: resolution.diagnostics,
        };
        info!(
            queues = topology.queues.len(),
            exchanges = topology.exchanges.len(),
            bindings = topology.bindings.len(),
            diagnostics = topology.diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "topology resolved"
        );
        topology
    }

    pub fn queues(&self) -> &[Queue] {
        &self.queues
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Explicit bindings in input order, then dead-letter bindings.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Look up an entity by id.
    ///
    /// Ids handed out by this topology always resolve; a foreign id is
    /// reported as `EntityNotFound`.
    pub fn entity(&self, id: EntityId) -> Result<Entity<'_>> {
        let found = match id {
            EntityId::Queue(i) => self.queues.get(i).map(Entity::Queue),
            EntityId::Exchange(i) => self.exchanges.get(i).map(Entity::Exchange),
        };
        found.ok_or_else(|| {
            let (kind, idx) = match id {
                EntityId::Queue(i) => ("queue", i),
                EntityId::Exchange(i) => ("exchange", i),
            };
            Error::new(
                ErrorKind::EntityNotFound,
                format!("{kind} #{idx} is not part of this topology"),
            )
            .with_operation("topology::entity")
        })
    }

    /// Entity ids sorted by `(vhost, sort_order, kind, name)`.
    pub fn presentation_order(&self) -> Vec<EntityId> {
        presentation_order(&self.queues, &self.exchanges)
    }

    /// Distinct vhosts in order of first appearance: queues, then
    /// exchanges, then bindings.
    pub fn vhosts(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.queues
            .iter()
            .map(|q| q.vhost.as_str())
            .chain(self.exchanges.iter().map(|x| x.vhost.as_str()))
            .chain(self.bindings.iter().map(Binding::vhost))
            .filter(|vhost| seen.insert(*vhost))
            .collect()
    }
}
