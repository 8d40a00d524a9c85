//! Queue and exchange entities.

use serde_json::Value;

use crate::definitions::{ExchangeRecord, QueueRecord};

/// Policy/behavior metadata attached to an entity or binding.
pub type Arguments = serde_json::Map<String, Value>;

/// The default virtual host; it contributes no prefix to qualified names.
pub const DEFAULT_VHOST: &str = "/";

/// Queue argument naming the exchange dead-lettered messages are routed to.
pub const DEAD_LETTER_EXCHANGE_ARG: &str = "x-dead-letter-exchange";

/// Queue argument overriding the routing key of dead-lettered messages.
pub const DEAD_LETTER_ROUTING_KEY_ARG: &str = "x-dead-letter-routing-key";

/// Qualified name of an entity: the vhost without its trailing `/`, then
/// `/`, then the name, with any leading `/` removed.
///
/// `("/", "orders")` gives `orders`, `("tenant-a", "orders")` gives
/// `tenant-a/orders`.
pub fn full_name(vhost: &str, name: &str) -> String {
    let vhost = vhost.strip_suffix('/').unwrap_or(vhost);
    let joined = format!("{vhost}/{name}");
    match joined.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => joined,
    }
}

/// Kind discriminant. Declaration order is the presentation tie-break:
/// exchanges sort before queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Exchange,
    Queue,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Exchange => "exchange",
            EntityKind::Queue => "queue",
        }
    }
}

/// Identity of a resolved entity: its kind and position in the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityId {
    Exchange(usize),
    Queue(usize),
}

impl EntityId {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityId::Exchange(_) => EntityKind::Exchange,
            EntityId::Queue(_) => EntityKind::Queue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Queue {
    pub name: String,
    pub vhost: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub arguments: Arguments,
    pub sort_order: i32,
}

impl Queue {
    pub fn from_record(record: &QueueRecord) -> Self {
        Self {
            name: record.name.clone(),
            vhost: record.vhost.clone(),
            durable: record.durable == Some(true),
            auto_delete: record.auto_delete == Some(true),
            arguments: record.arguments.clone().unwrap_or_default(),
            sort_order: 0,
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.vhost, &self.name)
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn is_auto_delete(&self) -> bool {
        self.auto_delete
    }

    /// The dead-letter exchange name, if the queue declares a non-empty one.
    pub fn dead_letter_exchange(&self) -> Option<&str> {
        self.arguments
            .get(DEAD_LETTER_EXCHANGE_ARG)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn dead_letter_routing_key(&self) -> Option<&str> {
        self.arguments
            .get(DEAD_LETTER_ROUTING_KEY_ARG)
            .and_then(Value::as_str)
    }

    pub fn is_dead_letter_queue(&self) -> bool {
        self.dead_letter_exchange().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub name: String,
    pub vhost: String,
    /// Exchange type (`direct`, `topic`, `fanout`, ...).
    pub kind: String,
    pub durable: bool,
    pub auto_delete: bool,
    pub internal: bool,
    pub arguments: Arguments,
    pub sort_order: i32,
}

impl Exchange {
    pub fn from_record(record: &ExchangeRecord) -> Self {
        Self {
            name: record.name.clone(),
            vhost: record.vhost.clone(),
            kind: record.kind.clone(),
            durable: record.durable == Some(true),
            auto_delete: record.auto_delete == Some(true),
            internal: record.internal == Some(true),
            arguments: record.arguments.clone().unwrap_or_default(),
            sort_order: 0,
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.vhost, &self.name)
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn is_auto_delete(&self) -> bool {
        self.auto_delete
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }
}

/// Borrowed view over either entity variant.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Queue(&'a Queue),
    Exchange(&'a Exchange),
}

impl<'a> Entity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Queue(_) => EntityKind::Queue,
            Entity::Exchange(_) => EntityKind::Exchange,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Entity::Queue(q) => &q.name,
            Entity::Exchange(x) => &x.name,
        }
    }

    pub fn vhost(&self) -> &'a str {
        match self {
            Entity::Queue(q) => &q.vhost,
            Entity::Exchange(x) => &x.vhost,
        }
    }

    pub fn sort_order(&self) -> i32 {
        match self {
            Entity::Queue(q) => q.sort_order,
            Entity::Exchange(x) => x.sort_order,
        }
    }

    pub fn arguments(&self) -> &'a Arguments {
        match self {
            Entity::Queue(q) => &q.arguments,
            Entity::Exchange(x) => &x.arguments,
        }
    }

    pub fn full_name(&self) -> String {
        full_name(self.vhost(), self.name())
    }

    /// Presentation key: `(vhost, sort_order, kind, name)`.
    pub fn order_key(&self) -> (&'a str, i32, EntityKind, &'a str) {
        (self.vhost(), self.sort_order(), self.kind(), self.name())
    }
}

/// Turn raw records into entities, one per record, preserving input order.
pub fn resolve_entities(
    queues: &[QueueRecord],
    exchanges: &[ExchangeRecord],
) -> (Vec<Queue>, Vec<Exchange>) {
    (
        queues.iter().map(Queue::from_record).collect(),
        exchanges.iter().map(Exchange::from_record).collect(),
    )
}
