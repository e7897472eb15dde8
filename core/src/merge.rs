//! Graph merging with last-registration-wins conflict resolution.
//!
//! Every registration under one root name (including names introduced as
//! aliases) folds into a single canonical tree. [`merge_graphs`] unifies two
//! trees node-by-node, keyed by node kind and key string; argument nodes
//! additionally require identical parser types to unify, otherwise both are
//! kept as ordered sibling candidates. Merging never mutates its inputs: it
//! produces a new tree that structurally shares every untouched subtree, so
//! a dispatch walk holding the previous graph never observes a half-merged
//! state.
//!
//! # Example
//!
//! ```
//! use command_graph_core::{CommandDeclaration, StaticSender, literal, merge_graphs};
//!
//! let first = CommandDeclaration::<StaticSender>::new("warp")
//!     .then(literal("add").executes(|_s: &StaticSender, _a| {}))
//!     .build()
//!     .unwrap();
//! let second = CommandDeclaration::<StaticSender>::new("warp")
//!     .then(literal("remove").executes(|_s: &StaticSender, _a| {}))
//!     .build()
//!     .unwrap();
//!
//! let merged = merge_graphs(&first, &second);
//! assert_eq!(merged.root().children().len(), 2);
//! ```

use std::sync::Arc;

use crate::types::{CommandGraph, GraphNode, HelpMetadata, Usage};

/// Merges a newly registered graph into the existing canonical graph for
/// the same root, producing a new graph value.
///
/// The existing graph's primary name is kept (a registration arriving via
/// an alias folds into the graph it aliases). Where both sides define an
/// executor for the same path, the incoming one wins; children from both
/// sides are unioned with existing declaration order preserved and new
/// children appended in their own declaration order.
pub fn merge_graphs<S>(existing: &CommandGraph<S>, incoming: &CommandGraph<S>) -> CommandGraph<S> {
    CommandGraph {
        root: merge_nodes(existing.root(), incoming.root()),
        help: merge_metadata(existing.help(), incoming.help()),
        help_provider: incoming
            .help_provider
            .clone()
            .or_else(|| existing.help_provider.clone()),
    }
}

/// Unifies two nodes assumed to share an identity, returning a new node.
pub fn merge_nodes<S>(existing: &Arc<GraphNode<S>>, incoming: &Arc<GraphNode<S>>) -> Arc<GraphNode<S>> {
    Arc::new(GraphNode {
        key: existing.key.clone(),
        name: existing.name.clone(),
        bind: incoming.bind.clone().or_else(|| existing.bind.clone()),
        parser: existing.parser.clone(),
        suggestion_override: incoming
            .suggestion_override
            .clone()
            .or_else(|| existing.suggestion_override.clone()),
        children: union_children(&existing.children, &incoming.children),
        executor: incoming
            .executor
            .clone()
            .or_else(|| existing.executor.clone()),
        requirement: incoming
            .requirement
            .clone()
            .or_else(|| existing.requirement.clone()),
        permission: incoming
            .permission
            .clone()
            .or_else(|| existing.permission.clone()),
    })
}

/// Merges declared help metadata. The later registration's explicit values
/// win; an absent later value never clears an earlier explicit one. Usage
/// overrides from multiple registrations concatenate.
pub fn merge_metadata(existing: &HelpMetadata, incoming: &HelpMetadata) -> HelpMetadata {
    HelpMetadata {
        short_description: incoming
            .short_description
            .clone()
            .or_else(|| existing.short_description.clone()),
        full_description: incoming
            .full_description
            .clone()
            .or_else(|| existing.full_description.clone()),
        usage: match (&existing.usage, &incoming.usage) {
            (Usage::Override(a), Usage::Override(b)) => {
                Usage::Override(a.iter().chain(b.iter()).cloned().collect())
            }
            (_, Usage::Override(b)) => Usage::Override(b.clone()),
            (u, Usage::Generate) => u.clone(),
        },
        aliases: if incoming.aliases.is_empty() {
            existing.aliases.clone()
        } else {
            incoming.aliases.clone()
        },
        owner: incoming.owner.clone().or_else(|| existing.owner.clone()),
    }
}

/// Two nodes unify when their keys match; argument nodes additionally
/// require the same parser type. A literal and an argument never unify.
fn nodes_unify<S>(a: &GraphNode<S>, b: &GraphNode<S>) -> bool {
    if a.key != b.key {
        return false;
    }
    match (&a.parser, &b.parser) {
        (Some(pa), Some(pb)) => pa.type_name() == pb.type_name(),
        (None, None) => true,
        _ => false,
    }
}

fn union_children<S>(
    existing: &[Arc<GraphNode<S>>],
    incoming: &[Arc<GraphNode<S>>],
) -> Vec<Arc<GraphNode<S>>> {
    let mut merged: Vec<Arc<GraphNode<S>>> = existing.to_vec();
    for inc in incoming {
        match merged.iter().position(|ex| nodes_unify(ex, inc)) {
            Some(i) => merged[i] = merge_nodes(&merged[i], inc),
            None => merged.push(Arc::clone(inc)),
        }
    }
    merged
}

/// Collapses duplicate-key siblings within one declaration, so a built tree
/// satisfies the same unification invariant as a merged one.
pub(crate) fn dedupe_siblings<S>(nodes: Vec<Arc<GraphNode<S>>>) -> Vec<Arc<GraphNode<S>>> {
    let mut out: Vec<Arc<GraphNode<S>>> = Vec::new();
    for node in nodes {
        match out.iter().position(|ex| nodes_unify(ex, &node)) {
            Some(i) => out[i] = merge_nodes(&out[i], &node),
            None => out.push(node),
        }
    }
    out
}
