//! Binding resolution and dead-letter synthesis.
//!
//! Explicit bindings are matched against exchanges/queues of their own vhost.
//! Queues declaring `x-dead-letter-exchange` then get a synthesized binding
//! from the queue to that exchange. Every failure is local: a diagnostic is
//! recorded and the rest of the input is still processed.

use tracing::{debug, warn};

use crate::definitions::BindingRecord;
use crate::diagnostic::Diagnostic;
use crate::entity::{Arguments, EntityId, Exchange, Queue};
use crate::index::EntityIndex;

/// A directed routing edge between two resolved entities of one vhost.
///
/// Only constructed by this module, after both endpoints resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    source: EntityId,
    destination: EntityId,
    vhost: String,
    routing_key: String,
    dead_letter: bool,
    arguments: Arguments,
}

impl Binding {
    /// An exchange, or a queue for dead-letter bindings.
    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn destination(&self) -> EntityId {
        self.destination
    }

    pub fn vhost(&self) -> &str {
        &self.vhost
    }

    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    /// True only for bindings synthesized from dead-letter configuration.
    pub fn is_dead_letter(&self) -> bool {
        self.dead_letter
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }
}

/// Bindings that resolved, plus what was dropped and why.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub bindings: Vec<Binding>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve explicit bindings, then append synthesized dead-letter bindings.
pub fn resolve_bindings(
    records: &[BindingRecord],
    queues: &[Queue],
    exchanges: &[Exchange],
) -> Resolution {
    let index = EntityIndex::new(queues, exchanges);
    let mut resolution = Resolution::default();

    for record in records {
        match resolve_record(record, &index) {
            Ok(binding) => resolution.bindings.push(binding),
            Err(diagnostic) => {
                warn!(vhost = diagnostic.vhost(), "{diagnostic}");
                resolution.diagnostics.push(diagnostic);
            }
        }
    }
    let explicit = resolution.bindings.len();

    synthesize_with_index(queues, &index, &mut resolution);

    debug!(
        explicit,
        dead_letter = resolution.bindings.len() - explicit,
        dropped = resolution.diagnostics.len(),
        "bindings resolved"
    );
    resolution
}

/// Synthesize one binding per dead-letter queue whose exchange resolves.
pub fn synthesize_dead_letters(queues: &[Queue], exchanges: &[Exchange]) -> Resolution {
    let index = EntityIndex::new(queues, exchanges);
    let mut resolution = Resolution::default();
    synthesize_with_index(queues, &index, &mut resolution);
    resolution
}

fn resolve_record(
    record: &BindingRecord,
    index: &EntityIndex<'_>,
) -> Result<Binding, Diagnostic> {
    let source = index
        .exchange(&record.vhost, &record.source)
        .ok_or_else(|| Diagnostic::MissingSource {
            vhost: record.vhost.clone(),
            exchange: record.source.clone(),
        })?;

    let destination = match record.destination_type.as_str() {
        "queue" => index.queue(&record.vhost, &record.destination),
        "exchange" => index.exchange(&record.vhost, &record.destination),
        _ => None,
    }
    .ok_or_else(|| Diagnostic::MissingDestination {
        vhost: record.vhost.clone(),
        destination: record.destination.clone(),
        destination_type: record.destination_type.clone(),
    })?;

    Ok(Binding {
        source,
        destination,
        vhost: record.vhost.clone(),
        routing_key: record.routing_key.clone().unwrap_or_default(),
        dead_letter: false,
        arguments: record.arguments.clone().unwrap_or_default(),
    })
}

fn synthesize_with_index(
    queues: &[Queue],
    index: &EntityIndex<'_>,
    resolution: &mut Resolution,
) {
    for (i, queue) in queues.iter().enumerate() {
        let Some(target) = queue.dead_letter_exchange() else {
            continue;
        };

        match index.exchange(&queue.vhost, target) {
            Some(destination) => resolution.bindings.push(Binding {
                source: EntityId::Queue(i),
                destination,
                vhost: queue.vhost.clone(),
                routing_key: queue.dead_letter_routing_key().unwrap_or_default().to_string(),
                dead_letter: true,
                arguments: Arguments::new(),
            }),
            None => {
                let diagnostic = Diagnostic::MissingDeadLetterExchange {
                    vhost: queue.vhost.clone(),
                    queue: queue.name.clone(),
                    exchange: target.to_string(),
                };
                warn!(vhost = %queue.vhost, queue = %queue.name, "{diagnostic}");
                resolution.diagnostics.push(diagnostic);
            }
        }
    }
}
