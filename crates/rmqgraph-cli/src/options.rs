//! Run configuration.
//!
//! Flags are parsed once into a `RunOptions` value that is handed to the
//! pipeline; nothing downstream reads process-wide state.

use std::path::PathBuf;

use rmqgraph_core::{OrderOverrides, Result};
use rmqgraph_dot::OutputFormat;

/// Printed when no definitions file is given.
pub const USAGE: &str = "\
Usage:
  --format f, -f f:
    Output format like dot, pdf, png, svg, ps, etc. Default is DOT.
  --output o, -o o:
    Output file name. STDOUT, if not given.
  --order-first
  --order-last
    Comma-separated list of queues/exchanges names that should be sorted first/last.
    Depending on the schema complexity, the ordering effect may be limited.
  {JSON_FILENAME}:
    Schema export file. REQUIRED.
";

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Definitions export to read
    pub input: PathBuf,
    /// Destination file; stdout when `None`
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub overrides: OrderOverrides,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            format: OutputFormat::default(),
            overrides: OrderOverrides::default(),
        }
    }

    /// Build options from raw flag values. Fails on an unsupported format.
    pub fn from_flags(
        input: impl Into<PathBuf>,
        output: Option<PathBuf>,
        format: &str,
        order_first: Option<&str>,
        order_last: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            input: input.into(),
            output,
            format: OutputFormat::parse(format)?,
            overrides: OrderOverrides::from_csv(order_first, order_last),
        })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_overrides(mut self, overrides: OrderOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}
