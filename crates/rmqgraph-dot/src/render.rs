//! Document serialization and format dispatch.

use tracing::debug;

use rmqgraph_collect::{EdgeDescriptor, GraphDocument, Label, NodeDescriptor};
use rmqgraph_core::Result;

use crate::dot::{DotBuilder, escape_html};
use crate::engine::{Graphviz, LayoutEngine};
use crate::format::OutputFormat;

/// Render the document in `format`, using Graphviz for non-DOT formats.
pub fn render(doc: &GraphDocument, format: OutputFormat) -> Result<Vec<u8>> {
    render_with(doc, format, &Graphviz::default())
}

/// Render the document in `format`, using `engine` for non-DOT formats.
pub fn render_with(
    doc: &GraphDocument,
    format: OutputFormat,
    engine: &dyn LayoutEngine,
) -> Result<Vec<u8>> {
    let dot = render_dot(doc);
    if format.is_native() {
        return Ok(dot.into_bytes());
    }
    debug!(format = %format, "delegating to layout engine");
    engine.layout(&dot, format)
}

/// Serialize the document to DOT: one cluster per vhost, nodes first.
pub fn render_dot(doc: &GraphDocument) -> String {
    let mut dot = DotBuilder::new(&doc.name);

    for (i, cluster) in doc.clusters.iter().enumerate() {
        dot.start_cluster(&format!("{i}_{}", cluster.vhost), &cluster.vhost);
        for node in &cluster.nodes {
            render_node(&mut dot, node);
        }
        for edge in &cluster.edges {
            render_edge(&mut dot, edge);
        }
        dot.end_cluster();
    }

    dot.build()
}

fn render_node(dot: &mut DotBuilder, node: &NodeDescriptor) {
    let style = node.style.style_list();
    dot.html_node(
        &node.handle.to_string(),
        &label_html(&node.label),
        &[
            ("shape", node.style.shape.as_str()),
            ("style", style.as_str()),
            ("fillcolor", node.style.fill_color),
        ],
    );
}

fn render_edge(dot: &mut DotBuilder, edge: &EdgeDescriptor) {
    let mut attrs = vec![("label", edge.label.as_str())];
    if let Some(color) = edge.color() {
        attrs.push(("color", color));
    }
    dot.edge_with_attrs(&edge.from.to_string(), &edge.to.to_string(), &attrs);
}

/// `<B>title</B>` followed by `<BR/>`-separated lines.
fn label_html(label: &Label) -> String {
    let mut html = format!("<B>{}</B>", escape_html(&label.title));
    for line in &label.lines {
        html.push_str("<BR/>");
        html.push_str(&escape_html(line));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_html() {
        let label = Label {
            title: "Q: a<b>".to_string(),
            lines: vec!["x-max-length: 10".to_string(), "x-queue-type: quorum".to_string()],
        };
        assert_eq!(
            label_html(&label),
            "<B>Q: a&lt;b&gt;</B><BR/>x-max-length: 10<BR/>x-queue-type: quorum"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = GraphDocument {
            name: "G".to_string(),
            clusters: Vec::new(),
        };
        assert_eq!(render_dot(&doc), "digraph G {\n}\n");
    }
}
