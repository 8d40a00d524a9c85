//! rmqgraph command-line interface.
//!
pub mod options;
pub mod output;
pub mod pipeline;

pub use options::{RunOptions, USAGE};
pub use output::write_artifact;
pub use pipeline::{Prepared, RunOutcome, load, prepare, render_prepared, run_main, run_pipeline};
