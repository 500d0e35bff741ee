//! Core policy types
//!
//! This module defines the canonical rule representation and the query
//! algebra tree:
//! - `TermSet`: allowed values for one triple position, or unconstrained
//! - `Effect`: allow or deny
//! - `Rule` / `RuleSet`: normalized rules, immutable after startup
//! - `Node` / `Pattern` / `Union`: the algebra tree the compiler builds

use serde::Deserialize;

/// The canonical set of allowed terms for one triple position.
///
/// An empty set means "unconstrained / matches anything". Order is
/// preserved from the declaration; duplicates are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet(Vec<String>);

impl TermSet {
    /// The unconstrained term set (matches anything)
    pub fn unconstrained() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn from_terms(terms: Vec<String>) -> Self {
        Self(terms)
    }

    /// True if this position places no constraint on matching triples
    pub fn is_unconstrained(&self) -> bool {
        self.0.is_empty()
    }

    /// The constrained terms, in declaration order (empty if unconstrained)
    pub fn terms(&self) -> &[String] {
        &self.0
    }
}

/// Rule effect - whether matching triples are admitted or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Admit matching triples
    Allow,
    /// Remove matching triples from whatever was admitted before
    Deny,
}

/// One normalized allow/deny rule.
///
/// Rules are only ever created by `normalize`; holding a `&Rule` implies
/// the declaration it came from has been canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) effect: Effect,
    pub(crate) role: Option<String>,
    pub(crate) subject: TermSet,
    pub(crate) predicate: TermSet,
    pub(crate) object: TermSet,
    pub(crate) priority: i64,
}

impl Rule {
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// The role this rule applies to; `None` is the wildcard
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn subject(&self) -> &TermSet {
        &self.subject
    }

    pub fn predicate(&self) -> &TermSet {
        &self.predicate
    }

    pub fn object(&self) -> &TermSet {
        &self.object
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// True if this rule constrains the identical (s, p, o) pattern as
    /// `other`, element-wise in canonical order
    pub(crate) fn same_pattern(&self, other: &Rule) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

/// The process-wide rule set: created once from configuration, read-only
/// for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub(crate) rules: Vec<Rule>,
}

impl RuleSet {
    /// All rules, in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A leaf of the algebra tree: one rule's triple-pattern constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) subject: TermSet,
    pub(crate) predicate: TermSet,
    pub(crate) object: TermSet,
}

impl Pattern {
    pub(crate) fn from_rule(rule: &Rule) -> Self {
        Self {
            subject: rule.subject.clone(),
            predicate: rule.predicate.clone(),
            object: rule.object.clone(),
        }
    }

    pub fn subject(&self) -> &TermSet {
        &self.subject
    }

    pub fn predicate(&self) -> &TermSet {
        &self.predicate
    }

    pub fn object(&self) -> &TermSet {
        &self.object
    }
}

/// Set-additive combination: match if any child matches.
///
/// A `Union` always has at least one child. The only constructor takes the
/// first child, and children can only be appended, so the empty state is
/// not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Union {
    children: Vec<Node>,
}

impl Union {
    pub fn new(first: Node) -> Self {
        Self {
            children: vec![first],
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// The children, in insertion order. Guaranteed non-empty.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// The filtering-query algebra tree, built per request and discarded
/// after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Unconstrained triple pattern (matches everything)
    Any,
    /// One rule's constraints on (s, p, o)
    Pattern(Pattern),
    /// Match if any child matches
    Union(Union),
    /// Match `base`, excluding anything the subtrahend matches
    Difference { base: Box<Node>, subtrahend: Union },
}
