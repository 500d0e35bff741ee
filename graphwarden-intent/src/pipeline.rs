//! Intent pipeline orchestration

use crate::error::Result;
use crate::snapshot::{QueryOutcome, SnapshotStore};
use crate::upstream::UpstreamClient;
use graphwarden_policy::{compile, render, NamespaceMap, RuleSet};

/// One request's (role, caller query) pair. Owned by the pipeline for the
/// duration of the request; never persisted.
#[derive(Debug, Clone)]
pub struct Intent {
    /// Caller role; `None` selects wildcard rules only
    pub role: Option<String>,
    /// The caller's SPARQL query, executed against the snapshot only
    pub query_text: String,
}

/// The two-phase pipeline: policy-filtered snapshot fetch, then caller
/// query execution against that snapshot.
///
/// Holds the only durable shared state in the system - the normalized
/// rule set and the namespace map, both immutable after construction -
/// plus the upstream client. Safe for unsynchronized concurrent use; all
/// per-request state is function-local.
pub struct IntentPipeline {
    rules: RuleSet,
    namespaces: NamespaceMap,
    upstream: UpstreamClient,
}

impl IntentPipeline {
    pub fn new(rules: RuleSet, namespaces: NamespaceMap, upstream: UpstreamClient) -> Self {
        Self {
            rules,
            namespaces,
            upstream,
        }
    }

    /// The filtering query that materializes everything `role` may see.
    /// Exposed for diagnostics; `process` renders it per request.
    pub fn filtering_query(&self, role: Option<&str>) -> String {
        let selected = self.rules.select(role);
        let tree = compile(&selected);
        render(&tree, &self.namespaces)
    }

    /// Process one intent.
    ///
    /// Selects and compiles the role's rules, issues exactly one upstream
    /// fetch of the filtering query, loads the payload into a brand-new
    /// snapshot store, and executes the caller's query against that store.
    /// The caller's query text is never forwarded upstream.
    pub async fn process(&self, intent: &Intent) -> Result<QueryOutcome> {
        tracing::debug!(role = ?intent.role, "processing intent");

        let selected = self.rules.select(intent.role.as_deref());
        tracing::debug!(rules = selected.len(), "selected applicable rules");

        let tree = compile(&selected);
        let filtering_query = render(&tree, &self.namespaces);
        tracing::debug!(query = %filtering_query, "rendered filtering query");

        let response = self.upstream.fetch(&filtering_query).await?;

        let store = SnapshotStore::load(&response.body, &response.content_type)?;
        tracing::debug!(triples = store.triple_count(), "loaded role snapshot");

        store.execute(&intent.query_text)
    }
}
