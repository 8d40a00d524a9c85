//! `(vhost, name)` lookup tables over resolved entities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::entity::{EntityId, Exchange, Queue};

type Key<'a> = (&'a str, &'a str);

/// Per-kind index from `(vhost, name)` to entity position.
///
/// The first entity of a given identity wins; later duplicates are logged
/// and stay unreachable by name.
pub(crate) struct EntityIndex<'a> {
    queues: HashMap<Key<'a>, usize>,
    exchanges: HashMap<Key<'a>, usize>,
}

impl<'a> EntityIndex<'a> {
    pub(crate) fn new(queues: &'a [Queue], exchanges: &'a [Exchange]) -> Self {
        let mut index = Self {
            queues: HashMap::with_capacity(queues.len()),
            exchanges: HashMap::with_capacity(exchanges.len()),
        };
        for (i, q) in queues.iter().enumerate() {
            insert_first(&mut index.queues, (&q.vhost, &q.name), i, "queue");
        }
        for (i, x) in exchanges.iter().enumerate() {
            insert_first(&mut index.exchanges, (&x.vhost, &x.name), i, "exchange");
        }
        index
    }

    pub(crate) fn queue(&self, vhost: &str, name: &str) -> Option<EntityId> {
        self.queues.get(&(vhost, name)).copied().map(EntityId::Queue)
    }

    pub(crate) fn exchange(&self, vhost: &str, name: &str) -> Option<EntityId> {
        self.exchanges
            .get(&(vhost, name))
            .copied()
            .map(EntityId::Exchange)
    }
}

fn insert_first<'a>(map: &mut HashMap<Key<'a>, usize>, key: Key<'a>, idx: usize, kind: &str) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(idx);
        }
        Entry::Occupied(_) => {
            warn!(vhost = key.0, name = key.1, kind, "duplicate entity ignored for lookup");
        }
    }
}
