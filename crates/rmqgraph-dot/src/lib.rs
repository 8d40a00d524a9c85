//! Graph rendering for producing DOT and Graphviz output.
//!
//! A `GraphDocument` is serialized to DOT natively. Every other format is
//! produced by piping that DOT text through a layout engine (Graphviz `dot`
//! by default).
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the `DotBuilder`
//! - [`format`]: Output formats accepted on the command line
//! - [`engine`]: External layout engines
//! - [`render`]: Document serialization and format dispatch

mod dot;
mod engine;
mod format;
mod render;

pub use dot::{DotBuilder, escape_html, escape_label, sanitize_id};
pub use engine::{Graphviz, LayoutEngine};
pub use format::OutputFormat;
pub use render::{render, render_dot, render_with};
