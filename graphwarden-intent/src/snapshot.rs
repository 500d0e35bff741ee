//! Request-scoped snapshot store
//!
//! Wraps an in-memory oxigraph store holding exactly the triples the
//! filtering query materialized for one request. Created fresh per
//! request, dropped when the request completes; never shared between
//! requests, even for the same role.

use crate::error::{IntentError, Result};
use oxigraph::io::RdfFormat;
use oxigraph::sparql::results::QueryResultsFormat;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

/// A serialized query result and the media type it should be served with
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub body: String,
    pub content_type: &'static str,
}

/// Ephemeral store for one request's filtered triples
pub struct SnapshotStore {
    store: Store,
}

impl SnapshotStore {
    /// Build a fresh store from a serialized graph payload, parsed in the
    /// format its `Content-Type` declares.
    pub fn load(payload: &str, content_type: &str) -> Result<Self> {
        let format = RdfFormat::from_media_type(content_type).ok_or_else(|| {
            IntentError::UpstreamPayload(format!(
                "unsupported payload content type: {content_type:?}"
            ))
        })?;

        let store = Store::new().map_err(|e| IntentError::Snapshot(e.to_string()))?;
        store
            .load_from_reader(format, payload.as_bytes())
            .map_err(|e| IntentError::UpstreamPayload(e.to_string()))?;

        Ok(Self { store })
    }

    /// Number of triples in the snapshot
    pub fn triple_count(&self) -> usize {
        // In-memory storage; length cannot fail.
        self.store.len().unwrap_or_default()
    }

    /// Execute a read-only caller query against the snapshot.
    ///
    /// SELECT and ASK results serialize as SPARQL-results JSON;
    /// CONSTRUCT and DESCRIBE results serialize as Turtle. Any parse or
    /// evaluation failure is the caller's fault and reports as
    /// [`IntentError::QueryExecution`].
    pub fn execute(&self, query: &str) -> Result<QueryOutcome> {
        let results = self
            .store
            .query(query)
            .map_err(|e| IntentError::QueryExecution(e.to_string()))?;

        if matches!(results, QueryResults::Graph(_)) {
            let buffer = results
                .write_graph(Vec::new(), RdfFormat::Turtle)
                .map_err(|e| IntentError::QueryExecution(e.to_string()))?;
            Ok(QueryOutcome {
                body: String::from_utf8_lossy(&buffer).into_owned(),
                content_type: "text/turtle",
            })
        } else {
            let buffer = results
                .write(Vec::new(), QueryResultsFormat::Json)
                .map_err(|e| IntentError::QueryExecution(e.to_string()))?;
            Ok(QueryOutcome {
                body: String::from_utf8_lossy(&buffer).into_owned(),
                content_type: "application/sparql-results+json",
            })
        }
    }
}
