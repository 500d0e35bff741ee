//! Rule declaration normalization
//!
//! Raw declarations allow several spellings for a term position: absent,
//! `null`, the `"*"` wildcard, a single string, or an array of strings.
//! Normalization collapses all of them into the canonical [`TermSet`]
//! shape exactly once, at startup. It never fails: missing optional fields
//! are treated as unconstrained, and arrays are taken verbatim (ordered,
//! no deduplication).

use crate::types::{Effect, Rule, RuleSet, TermSet};
use serde::Deserialize;

/// Wildcard spelling accepted in raw declarations
const WILDCARD: &str = "*";

/// A raw term-position declaration: a single term or a list of terms.
/// Absence and `null` are handled by wrapping in `Option`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TermDecl {
    One(String),
    Many(Vec<String>),
}

/// One raw rule declaration, as persisted in configuration.
///
/// Unknown fields are tolerated so declaration files can carry metadata
/// this build does not interpret.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDecl {
    /// Role the rule applies to; absent or `null` means every role
    #[serde(default)]
    pub role: Option<String>,
    /// `"allow"` or `"deny"`
    pub permission: Effect,
    #[serde(default)]
    pub subject: Option<TermDecl>,
    #[serde(default)]
    pub predicate: Option<TermDecl>,
    #[serde(default)]
    pub object: Option<TermDecl>,
    pub priority: i64,
}

/// Canonicalize raw declarations into an immutable [`RuleSet`].
///
/// Pure transform: order-preserving, no deduplication. The returned set is
/// the only source of [`Rule`] values in the system.
pub fn normalize(decls: Vec<RuleDecl>) -> RuleSet {
    let rules = decls
        .into_iter()
        .map(|decl| Rule {
            effect: decl.permission,
            role: decl.role,
            subject: normalize_term(decl.subject),
            predicate: normalize_term(decl.predicate),
            object: normalize_term(decl.object),
            priority: decl.priority,
        })
        .collect();
    RuleSet { rules }
}

fn normalize_term(decl: Option<TermDecl>) -> TermSet {
    match decl {
        None => TermSet::unconstrained(),
        Some(TermDecl::One(term)) if term == WILDCARD => TermSet::unconstrained(),
        Some(TermDecl::One(term)) => TermSet::from_terms(vec![term]),
        Some(TermDecl::Many(terms)) => TermSet::from_terms(terms),
    }
}
