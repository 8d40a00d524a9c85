//! Non-fatal resolution diagnostics.

use std::fmt;

/// A recoverable problem found while resolving bindings.
///
/// The offending binding (or dead-letter route) is dropped; the rest of the
/// run is unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A binding names a source exchange that does not exist in its vhost.
    MissingSource { vhost: String, exchange: String },
    /// A binding names a destination that does not exist in its vhost, or
    /// carries a destination type other than `queue`/`exchange`.
    MissingDestination {
        vhost: String,
        destination: String,
        destination_type: String,
    },
    /// A queue's dead-letter exchange does not exist in the queue's vhost.
    MissingDeadLetterExchange {
        vhost: String,
        queue: String,
        exchange: String,
    },
}

impl Diagnostic {
    pub fn vhost(&self) -> &str {
        match self {
            Diagnostic::MissingSource { vhost, .. }
            | Diagnostic::MissingDestination { vhost, .. }
            | Diagnostic::MissingDeadLetterExchange { vhost, .. } => vhost,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingSource { exchange, .. } => {
                write!(f, "{exchange} exchange not found")
            }
            Diagnostic::MissingDestination {
                destination,
                destination_type,
                ..
            } => write!(f, "{destination} {destination_type} not found"),
            Diagnostic::MissingDeadLetterExchange { exchange, .. } => {
                write!(f, "{exchange} exchange not found")
            }
        }
    }
}
