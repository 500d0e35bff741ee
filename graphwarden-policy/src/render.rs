//! Query text rendering: algebra tree -> SPARQL CONSTRUCT
//!
//! The rendered query materializes every triple the tree admits:
//! `PREFIX` declarations first, then a `CONSTRUCT { ?s ?p ?o. } WHERE`
//! block wrapping the tree body. Pattern constraints render as `VALUES`
//! clauses, unions as `UNION`-joined blocks, differences as `MINUS`.
//! Indentation is cosmetic; only block nesting is load-bearing.

use crate::types::{Node, Pattern, TermSet, Union};
use std::collections::BTreeMap;

/// Namespace abbreviations rendered as `PREFIX` declarations, verbatim.
/// BTreeMap iteration makes the declaration order deterministic.
pub type NamespaceMap = BTreeMap<String, String>;

const INDENT: &str = "  ";

/// Render the filtering query for an algebra tree.
pub fn render(node: &Node, namespaces: &NamespaceMap) -> String {
    let mut lines: Vec<String> = namespaces
        .iter()
        .map(|(name, iri)| format!("PREFIX {name}: {iri}"))
        .collect();
    lines.push("CONSTRUCT { ?s ?p ?o. } WHERE".to_string());
    lines.push("{".to_string());
    lines.push(indent(&render_node(node)));
    lines.push("}".to_string());
    lines.join("\n")
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Any => "?s ?p ?o".to_string(),
        Node::Pattern(pattern) => render_pattern(pattern),
        Node::Union(union) => render_union(union),
        Node::Difference { base, subtrahend } => [
            "{".to_string(),
            indent(&render_node(base)),
            "}".to_string(),
            "MINUS".to_string(),
            "{".to_string(),
            indent(&render_union(subtrahend)),
            "}".to_string(),
        ]
        .join("\n"),
    }
}

fn render_union(union: &Union) -> String {
    let children = union.children();
    if children.len() == 1 {
        // A single alternative needs no UNION wrapping.
        render_node(&children[0])
    } else {
        children
            .iter()
            .map(|child| format!("{{\n{}\n}}", indent(&render_node(child))))
            .collect::<Vec<_>>()
            .join("\nUNION\n")
    }
}

fn render_pattern(pattern: &Pattern) -> String {
    let mut lines = Vec::new();
    if let Some(clause) = values_clause("?s", pattern.subject()) {
        lines.push(clause);
    }
    if let Some(clause) = values_clause("?p", pattern.predicate()) {
        lines.push(clause);
    }
    if let Some(clause) = values_clause("?o", pattern.object()) {
        lines.push(clause);
    }
    lines.push("?s ?p ?o.".to_string());
    lines.join("\n")
}

/// `VALUES ?v { t1 t2 }` for a constrained position, nothing for an
/// unconstrained one. Duplicate terms appear verbatim.
fn values_clause(variable: &str, terms: &TermSet) -> Option<String> {
    if terms.is_unconstrained() {
        return None;
    }
    Some(format!(
        "VALUES {variable} {{ {} }}",
        terms.terms().join(" ")
    ))
}

fn indent(body: &str) -> String {
    body.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
