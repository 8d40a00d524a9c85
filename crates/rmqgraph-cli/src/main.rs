use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use rmqgraph::{RunOptions, USAGE, load, prepare, render_prepared, write_artifact};
use rmqgraph_dot::Graphviz;

#[derive(Parser, Debug)]
#[command(
    name = "rmqgraph",
    about = "rmqgraph: draw the routing topology of a RabbitMQ definitions export",
    version
)]
pub struct Cli {
    /// Output format: dot, gv, svg, png, pdf, ps, ... (case-insensitive)
    #[arg(short = 'f', long = "format", value_name = "FORMAT", default_value = "dot")]
    format: String,

    /// Output file path (writes to stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Comma-separated queue/exchange names to place before all others
    #[arg(long = "order-first", value_name = "NAMES")]
    order_first: Option<String>,

    /// Comma-separated queue/exchange names to place after all others
    #[arg(long = "order-last", value_name = "NAMES")]
    order_last: Option<String>,

    /// Definitions export (JSON)
    #[arg(value_name = "JSON_FILENAME")]
    file: Option<PathBuf>,
}

pub fn run(args: Cli, input: PathBuf) -> anyhow::Result<()> {
    let total_start = Instant::now();

    let opts = RunOptions::from_flags(
        input,
        args.output,
        &args.format,
        args.order_first.as_deref(),
        args.order_last.as_deref(),
    )?;

    let defs = load(&opts).with_context(|| format!("failed to read {}", opts.input.display()))?;
    let prepared =
        prepare(&defs, &opts).with_context(|| format!("failed to graph {}", opts.input.display()))?;

    // Reported before rendering, which may still fail.
    for diagnostic in &prepared.diagnostics {
        eprintln!("{diagnostic}");
    }

    let artifact = render_prepared(&prepared, &opts, &Graphviz::default())
        .with_context(|| format!("failed to render {}", opts.input.display()))?;

    let mut stdout = std::io::stdout().lock();
    write_artifact(&artifact, opts.output.as_deref(), &mut stdout)?;

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let mut args = Cli::parse();
    let Some(input) = args.file.take() else {
        eprint!("{USAGE}");
        return ExitCode::from(1);
    };

    match run(args, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::FAILURE
        }
    }
}
