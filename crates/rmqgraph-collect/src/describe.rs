//! Labels and styles per entity variant.

use serde_json::Value;

use rmqgraph_core::{Entity, Exchange, Queue};

use crate::types::{EXCHANGE_FILL, Label, LineStyle, NodeStyle, QUEUE_FILL, Shape};

/// Queue arguments worth showing on the node, in display order.
pub const QUEUE_LABEL_ARGUMENTS: [&str; 5] = [
    "x-max-priority",
    "x-queue-type",
    "x-expires",
    "x-message-ttl",
    "x-max-length",
];

/// Presentation of an entity as a graph node.
pub trait Describe {
    fn describe(&self) -> Label;
    fn style(&self) -> NodeStyle;
}

impl Describe for Queue {
    fn describe(&self) -> Label {
        let lines = QUEUE_LABEL_ARGUMENTS
            .iter()
            .filter_map(|key| {
                self.arguments
                    .get(*key)
                    .map(|value| format!("{key}: {}", argument_text(value)))
            })
            .collect();
        Label {
            title: format!("Q: {}", self.full_name()),
            lines,
        }
    }

    fn style(&self) -> NodeStyle {
        NodeStyle {
            shape: Shape::Box,
            outline: LineStyle::Solid,
            rounded: false,
            fill_color: QUEUE_FILL,
        }
    }
}

impl Describe for Exchange {
    fn describe(&self) -> Label {
        let mut lines = Vec::new();
        if !self.kind.is_empty() {
            lines.push(self.kind.to_uppercase());
        }
        Label {
            title: format!("E: {}", self.full_name()),
            lines,
        }
    }

    fn style(&self) -> NodeStyle {
        NodeStyle {
            shape: Shape::Box,
            outline: if self.is_internal() {
                LineStyle::Dashed
            } else {
                LineStyle::Solid
            },
            rounded: true,
            fill_color: EXCHANGE_FILL,
        }
    }
}

/// Label and style for either variant.
pub fn describe_entity(entity: Entity<'_>) -> (Label, NodeStyle) {
    match entity {
        Entity::Queue(q) => (q.describe(), q.style()),
        Entity::Exchange(x) => (x.describe(), x.style()),
    }
}

/// Strings render bare; everything else as JSON text.
fn argument_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
