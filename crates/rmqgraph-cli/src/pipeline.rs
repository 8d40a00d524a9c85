//! Load, resolve, assemble, render.

use std::time::Instant;

use tracing::info;

use rmqgraph_collect::{GraphDocument, assemble};
use rmqgraph_core::{Definitions, Diagnostic, Result, Topology};
use rmqgraph_dot::{Graphviz, LayoutEngine, render_with};

use crate::RunOptions;

/// The artifact of a completed run and the bindings it had to skip.
#[derive(Debug)]
pub struct RunOutcome {
    pub artifact: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

/// An assembled document that has not been rendered yet.
#[derive(Debug)]
pub struct Prepared {
    pub document: GraphDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Main entry point: read `opts.input` and render it with Graphviz.
pub fn run_main(opts: &RunOptions) -> Result<RunOutcome> {
    let defs = load(opts)?;
    run_pipeline(&defs, opts, &Graphviz::default())
}

/// Read and parse the definitions export named by `opts.input`.
pub fn load(opts: &RunOptions) -> Result<Definitions> {
    let load_start = Instant::now();
    let defs = Definitions::from_path(&opts.input)?;
    info!(
        "Loading definitions: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );
    Ok(defs)
}

/// Resolve, assemble and render already-loaded definitions.
pub fn run_pipeline(
    defs: &Definitions,
    opts: &RunOptions,
    engine: &dyn LayoutEngine,
) -> Result<RunOutcome> {
    let prepared = prepare(defs, opts)?;
    let artifact = render_prepared(&prepared, opts, engine)?;
    Ok(RunOutcome {
        artifact,
        diagnostics: prepared.diagnostics,
    })
}

/// Resolve and assemble, collecting the diagnostics of skipped bindings.
pub fn prepare(defs: &Definitions, opts: &RunOptions) -> Result<Prepared> {
    let topology = Topology::build(defs, &opts.overrides);
    let document = assemble(&topology)?;
    Ok(Prepared {
        document,
        diagnostics: topology.diagnostics().to_vec(),
    })
}

/// Render a prepared document in `opts.format`.
pub fn render_prepared(
    prepared: &Prepared,
    opts: &RunOptions,
    engine: &dyn LayoutEngine,
) -> Result<Vec<u8>> {
    let render_start = Instant::now();
    let artifact = render_with(&prepared.document, opts.format, engine)
        .map_err(|err| err.with_operation("pipeline::render"))?;
    info!(
        "Graph rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );
    Ok(artifact)
}
