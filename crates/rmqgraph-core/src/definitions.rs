//! Raw records of a broker definitions export.
//!
//! A definitions export carries many more sections (users, permissions,
//! policies, ...). Only `queues`, `exchanges` and `bindings` are read; every
//! other key is ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::entity::{Arguments, DEFAULT_VHOST};
use crate::{Error, Result};

fn default_vhost() -> String {
    DEFAULT_VHOST.to_string()
}

/// The three sections of a definitions export that describe routing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definitions {
    #[serde(default)]
    pub queues: Vec<QueueRecord>,
    #[serde(default)]
    pub exchanges: Vec<ExchangeRecord>,
    #[serde(default)]
    pub bindings: Vec<BindingRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueRecord {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    #[serde(default)]
    pub durable: Option<bool>,
    #[serde(default)]
    pub auto_delete: Option<bool>,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRecord {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    /// Exchange type, e.g. `direct`, `topic`, `fanout`, `headers`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub durable: Option<bool>,
    #[serde(default)]
    pub auto_delete: Option<bool>,
    #[serde(default)]
    pub internal: Option<bool>,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindingRecord {
    pub source: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    pub destination: String,
    /// `"queue"` or `"exchange"`; any other value never resolves.
    #[serde(default)]
    pub destination_type: String,
    #[serde(default)]
    pub routing_key: Option<String>,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

impl Definitions {
    /// Load a definitions export from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("definitions::from_path")
                .with_context("path", path.display().to_string())
        })?;
        let defs: Definitions = text.parse().map_err(|err: Error| {
            err.with_operation("definitions::from_path")
                .with_context("path", path.display().to_string())
        })?;
        debug!(
            path = %path.display(),
            queues = defs.queues.len(),
            exchanges = defs.exchanges.len(),
            bindings = defs.bindings.len(),
            "definitions loaded"
        );
        Ok(defs)
    }
}

impl FromStr for Definitions {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| {
            Error::deserialization_failed(err.to_string())
                .with_operation("definitions::parse")
                .with_context("line", err.line().to_string())
                .with_context("column", err.column().to_string())
                .set_source(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_minimal_export() {
        let defs: Definitions = r#"{
            "queues": [{"name": "q1", "arguments": {}}],
            "exchanges": [{"name": "ex1", "type": "direct"}],
            "bindings": [{"source": "ex1", "destination": "q1", "destination_type": "queue", "routing_key": "rk"}]
        }"#
        .parse()
        .unwrap();

        assert_eq!(defs.queues.len(), 1);
        assert_eq!(defs.queues[0].vhost, "/");
        assert_eq!(defs.exchanges[0].kind, "direct");
        assert_eq!(defs.bindings[0].routing_key.as_deref(), Some("rk"));
        assert_eq!(defs.bindings[0].vhost, "/");
    }

    #[test]
    fn test_parse_nulls_and_unknown_sections() {
        let defs: Definitions = r#"{
            "rabbit_version": "3.12.0",
            "users": [{"name": "guest"}],
            "queues": [{"name": "q1", "vhost": "tenant-a", "durable": null, "auto_delete": null, "arguments": null}],
            "bindings": [{"source": "ex1", "destination": "q1", "destination_type": "queue", "routing_key": null}]
        }"#
        .parse()
        .unwrap();

        let queue = &defs.queues[0];
        assert_eq!(queue.durable, None);
        assert_eq!(queue.auto_delete, None);
        assert!(queue.arguments.is_none());
        assert!(defs.exchanges.is_empty());
        assert_eq!(defs.bindings[0].routing_key, None);
    }

    #[test]
    fn test_parse_malformed_is_fatal() {
        let err = "{\"queues\": [".parse::<Definitions>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "definitions::parse");
        assert!(err.context().iter().any(|(key, _)| *key == "line"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Definitions::from_path(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "definitions::from_path");
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defs.json");
        fs::write(&path, r#"{"exchanges": [{"name": "amq.direct", "type": "direct"}]}"#).unwrap();

        let defs = Definitions::from_path(&path).unwrap();
        assert_eq!(defs.exchanges[0].name, "amq.direct");
    }
}
