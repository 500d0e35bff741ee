//! Intent pipeline for role-scoped graph access
//!
//! One [`IntentPipeline`] per process, holding the immutable rule set and
//! namespace map plus the upstream client. Each call to
//! [`IntentPipeline::process`] handles one caller request:
//!
//! 1. select the rules applicable to the intent's role
//! 2. compile and render the filtering query (`graphwarden-policy`)
//! 3. fetch the role's snapshot from the upstream endpoint - exactly one
//!    attempt, bounded by a timeout
//! 4. load the response into a brand-new, request-scoped [`SnapshotStore`]
//! 5. execute the caller's query against that store only
//!
//! The caller's query text never reaches the upstream endpoint, and
//! nothing after the single fetch contacts it again: data a policy denied
//! was never fetched, so no caller query can observe it. Snapshot stores
//! are never shared or reused across requests, even for the same role.

mod error;
mod pipeline;
mod snapshot;
mod upstream;

pub use error::{IntentError, Result};
pub use pipeline::{Intent, IntentPipeline};
pub use snapshot::{QueryOutcome, SnapshotStore};
pub use upstream::{BasicCredentials, QueryBodyMode, UpstreamClient, UpstreamResponse};
