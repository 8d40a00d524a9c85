//! External layout engines.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use rmqgraph_core::{Error, Result};

use crate::format::OutputFormat;

/// Turns DOT text into a laid-out artifact of the requested format.
pub trait LayoutEngine {
    fn layout(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>>;
}

/// The Graphviz `dot` program, invoked as `dot -T<format>` with the graph
/// on stdin.
#[derive(Debug, Clone)]
pub struct Graphviz {
    program: PathBuf,
}

impl Default for Graphviz {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
        }
    }
}

impl Graphviz {
    /// Use a specific `dot` executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl LayoutEngine for Graphviz {
    fn layout(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>> {
        let start = Instant::now();
        let program = self.program.display().to_string();
        debug!(program = %program, format = %format, "spawning layout engine");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.as_str()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                Error::render_failed(format!("failed to start {program}: {err}"))
                    .with_operation("graphviz::layout")
                    .with_context("program", program.clone())
                    .set_source(err)
            })?;

        // stdin is written while stdout and stderr drain, or a large input
        // and a noisy engine block each other on full pipes.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(dot.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });

        let output = output.map_err(|err| {
            Error::from(err)
                .with_operation("graphviz::layout")
                .with_context("program", program.clone())
        })?;

        // A broken pipe means the engine exited early; its status says why.
        match written {
            Err(err) if output.status.success() || err.kind() != io::ErrorKind::BrokenPipe => {
                return Err(Error::from(err)
                    .with_operation("graphviz::layout")
                    .with_context("program", program.clone()));
            }
            _ => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::render_failed(stderr.trim().to_string())
                .with_operation("graphviz::layout")
                .with_context("program", program)
                .with_context("format", format.as_str())
                .with_context("status", output.status.to_string()));
        }

        info!(
            format = %format,
            bytes = output.stdout.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "layout complete"
        );
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmqgraph_core::ErrorKind;

    #[test]
    fn test_missing_program_is_render_failure() {
        let engine = Graphviz::with_program("/nonexistent/graphviz/dot");
        let err = engine
            .layout("digraph G {}\n", OutputFormat::Svg)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RenderFailed);
        assert_eq!(err.operation(), "graphviz::layout");
    }

    #[cfg(unix)]
    fn fake_engine(dir: &std::path::Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-dot");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_large_stderr_and_large_input_complete() {
        use std::sync::mpsc;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        // 200 KB of warnings before the engine reads any input.
        let program = fake_engine(
            dir.path(),
            "head -c 204800 /dev/zero | tr '\\0' w >&2\nwc -c",
        );
        let dot = format!("digraph G {{\n{}}}\n", "  n0;\n".repeat(1 << 17));
        let expected = dot.len();

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = Graphviz::with_program(program).layout(&dot, OutputFormat::Svg);
            let _ = tx.send(result);
        });

        let out = rx
            .recv_timeout(Duration::from_secs(30))
            .expect("layout returned")
            .unwrap();
        let count: usize = String::from_utf8(out).unwrap().trim().parse().unwrap();
        assert_eq!(count, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_exit_status_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_engine(dir.path(), "echo 'Error: syntax error in line 1' >&2\nexit 3");

        let err = Graphviz::with_program(program)
            .layout(&"x".repeat(1 << 20), OutputFormat::Png)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RenderFailed);
        assert!(err.message().contains("syntax error"));
    }
}
