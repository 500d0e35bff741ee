//! Policy compilation for role-scoped graph access
//!
//! This crate turns declarative allow/deny rules into a SPARQL CONSTRUCT
//! query that materializes exactly the triples a role may see:
//!
//! - **Normalization**: raw rule declarations (`null`/`"*"`/string/array
//!   term fields) canonicalize into [`Rule`]s held by an immutable
//!   [`RuleSet`]
//! - **Selection**: [`RuleSet::select`] filters rules down to a role
//! - **Compilation**: [`compile`] reduces conflicts and folds the selected
//!   rules, in ascending priority order, into an algebra tree ([`Node`])
//! - **Rendering**: [`render`] serializes the tree and a namespace map into
//!   the filtering-query text
//!
//! # Invariants
//!
//! - A [`Union`] is never empty: its only constructor takes a first child.
//! - [`Rule`]s exist only inside a [`RuleSet`], which is produced only by
//!   [`normalize`]. The compiler operates on `&Rule`, so un-normalized
//!   input cannot reach it.
//! - Higher-priority rules wrap the accumulated structure of all
//!   lower-priority rules; when two rules constrain the identical
//!   (subject, predicate, object) pattern, only the highest-priority one
//!   survives conflict reduction.
//!
//! Everything here is pure and synchronous; the per-request fetch/execute
//! machinery lives in `graphwarden-intent`.

mod compile;
mod normalize;
mod render;
mod select;
mod types;

pub use compile::compile;
pub use normalize::{normalize, RuleDecl, TermDecl};
pub use render::{render, NamespaceMap};
pub use types::{Effect, Node, Pattern, Rule, RuleSet, TermSet, Union};
