//! Artifact output.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use rmqgraph_core::{Error, Result};

/// Write the artifact to `path`, or to `stdout` when no path is given.
pub fn write_artifact(artifact: &[u8], path: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, artifact).map_err(|err| {
                Error::from(err)
                    .with_operation("output::write_artifact")
                    .with_context("path", path.display().to_string())
            })?;
            info!(path = %path.display(), bytes = artifact.len(), "output written");
        }
        None => {
            stdout
                .write_all(artifact)
                .and_then(|_| stdout.flush())
                .map_err(|err| Error::from(err).with_operation("output::write_artifact"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_stdout_buffer() {
        let mut buf = Vec::new();
        write_artifact(b"digraph G {\n}\n", None, &mut buf).unwrap();
        assert_eq!(buf, b"digraph G {\n}\n");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dot");
        let mut buf = Vec::new();
        write_artifact(b"digraph G {\n}\n", Some(&path), &mut buf).unwrap();

        assert!(buf.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dot");
        let err = write_artifact(b"x", Some(&path), &mut Vec::new()).unwrap_err();
        assert_eq!(err.operation(), "output::write_artifact");
    }
}
