use std::cell::RefCell;

use pretty_assertions::assert_eq;
use textwrap::dedent;

use rmqgraph_collect::{GraphDocument, assemble};
use rmqgraph_core::{Definitions, Error, OrderOverrides, Result, Topology};
use rmqgraph_dot::{LayoutEngine, OutputFormat, render_dot, render_with};

fn document(json: &str) -> GraphDocument {
    let defs: Definitions = json.parse().expect("valid definitions");
    let topology = Topology::build(&defs, &OrderOverrides::default());
    assemble(&topology).expect("assemble")
}

/// Records what it was asked to lay out.
#[derive(Default)]
struct RecordingEngine {
    calls: RefCell<Vec<(String, OutputFormat)>>,
}

impl LayoutEngine for RecordingEngine {
    fn layout(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push((dot.to_string(), format));
        Ok(b"<svg/>".to_vec())
    }
}

struct FailingEngine;

impl LayoutEngine for FailingEngine {
    fn layout(&self, _dot: &str, _format: OutputFormat) -> Result<Vec<u8>> {
        Err(Error::render_failed("syntax error in line 1"))
    }
}

#[test]
fn single_binding_renders_expected_dot() {
    let doc = document(
        r#"{
            "queues": [{"name": "q1", "arguments": {}}],
            "exchanges": [{"name": "ex1", "type": "direct"}],
            "bindings": [{"source": "ex1", "destination": "q1", "destination_type": "queue", "routing_key": "rk"}]
        }"#,
    );

    let expected = dedent(
        r##"
        digraph G {
          subgraph cluster_0__ {
            label="/";
            n0[label=<<B>E: ex1</B><BR/>DIRECT>, shape="box", style="solid,rounded,filled", fillcolor="#F8CECC"];
            n1[label=<<B>Q: q1</B>>, shape="box", style="solid,filled", fillcolor="#DAE8FC"];
            n0 -> n1 [label="rk"];
          }
        }
        "##,
    );
    assert_eq!(render_dot(&doc), expected.trim_start());
}

#[test]
fn dead_letter_and_multi_vhost_rendering() {
    let doc = document(
        r#"{
            "queues": [
                {"name": "work", "vhost": "tenant-a", "arguments": {"x-dead-letter-exchange": "dlx", "x-max-length": 1000}}
            ],
            "exchanges": [
                {"name": "dlx", "vhost": "tenant-a", "type": "fanout", "internal": true},
                {"name": "amq.direct", "type": "direct"}
            ]
        }"#,
    );

    let expected = dedent(
        r##"
        digraph G {
          subgraph cluster_0_tenant_a {
            label="tenant-a";
            n0[label=<<B>E: tenant-a/dlx</B><BR/>FANOUT>, shape="box", style="dashed,rounded,filled", fillcolor="#F8CECC"];
            n1[label=<<B>Q: tenant-a/work</B><BR/>x-max-length: 1000>, shape="box", style="solid,filled", fillcolor="#DAE8FC"];
            n1 -> n0 [label="", color="red"];
          }
          subgraph cluster_1__ {
            label="/";
            n2[label=<<B>E: amq.direct</B><BR/>DIRECT>, shape="box", style="solid,rounded,filled", fillcolor="#F8CECC"];
          }
        }
        "##,
    );
    assert_eq!(render_dot(&doc), expected.trim_start());
}

#[test]
fn native_formats_skip_the_engine() {
    let doc = document(r#"{"queues": [{"name": "q1"}]}"#);
    let engine = RecordingEngine::default();

    let out = render_with(&doc, OutputFormat::Gv, &engine).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), render_dot(&doc));
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn other_formats_go_through_the_engine() {
    let doc = document(r#"{"queues": [{"name": "q1"}]}"#);
    let engine = RecordingEngine::default();

    let out = render_with(&doc, OutputFormat::Svg, &engine).unwrap();
    assert_eq!(out, b"<svg/>".to_vec());

    let calls = engine.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, render_dot(&doc));
    assert_eq!(calls[0].1, OutputFormat::Svg);
}

#[test]
fn engine_failure_is_fatal() {
    let doc = document(r#"{"queues": [{"name": "q1"}]}"#);
    let err = render_with(&doc, OutputFormat::Pdf, &FailingEngine).unwrap_err();
    assert!(err.to_string().contains("RenderFailed"));
}
