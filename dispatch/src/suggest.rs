//! Suggest-mode walk: tab-completion candidates for a cursor position.
//!
//! Runs the same walk as parse mode over the tokens before the cursor, but
//! instead of committing to the first successful child it follows every
//! branch that can consume the prefix. At the cursor position it collects
//! literal keys and argument suggestion candidates from every child whose
//! gate admits the caller; gated branches contribute nothing, so the result
//! is indistinguishable from a graph in which they do not exist.

use std::collections::HashSet;

use command_graph_core::{CommandGraph, CommandSender, GraphNode, TokenCursor};
use tracing::debug;

/// Collects completion candidates for the final token of `tokens` (the
/// partial word at the cursor; pass an empty last token for "just typed a
/// space"). Candidates are prefix-filtered, deduplicated, and ordered by
/// declaration order, literals before arguments at each node.
pub fn suggest<S: CommandSender>(graph: &CommandGraph<S>, tokens: &[String], ctx: &S) -> Vec<String> {
    let root = graph.root();
    if !root.passes(ctx) {
        return Vec::new();
    }
    let (prior, partial) = match tokens.split_last() {
        Some((last, init)) => (init, last.as_str()),
        None => (&[][..], ""),
    };

    let mut out = Vec::new();
    collect(root, &TokenCursor::new(prior), partial, ctx, &mut out);

    let mut seen = HashSet::new();
    out.retain(|s| seen.insert(s.clone()));
    debug!(
        command = root.display(),
        partial, candidates = out.len(), "suggestion walk"
    );
    out
}

fn collect<S: CommandSender>(
    node: &GraphNode<S>,
    cursor: &TokenCursor<'_>,
    partial: &str,
    ctx: &S,
    out: &mut Vec<String>,
) {
    let Some(token) = cursor.peek() else {
        // At the cursor position: gather candidates from visible children.
        for child in node.children().iter().filter(|c| c.is_literal()) {
            if child.passes(ctx) && child.display().starts_with(partial) {
                out.push(child.display().to_string());
            }
        }
        for child in node.children().iter().filter(|c| c.is_argument()) {
            if !child.passes(ctx) {
                continue;
            }
            let Some(parser) = child.parser() else {
                continue;
            };
            let candidates = match child.suggestion_override() {
                Some(fixed) => fixed.to_vec(),
                None => parser.suggest(partial, ctx),
            };
            out.extend(candidates.into_iter().filter(|c| c.starts_with(partial)));
        }
        return;
    };

    // Still consuming the prefix: follow every branch that accepts it.
    for child in node.children().iter().filter(|c| c.is_literal()) {
        if child.display() == token && child.passes(ctx) {
            let mut next = cursor.clone();
            next.next();
            collect(child, &next, partial, ctx, out);
        }
    }
    for child in node.children().iter().filter(|c| c.is_argument()) {
        if !child.passes(ctx) {
            continue;
        }
        let Some(parser) = child.parser() else {
            continue;
        };
        let mut next = cursor.clone();
        if parser.parse(&mut next, ctx).is_ok() {
            collect(child, &next, partial, ctx, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use command_graph_core::{
        CommandDeclaration, CommandGraph, StaticSender, argument, literal,
    };

    use super::*;
    use crate::parsers::{BoolParser, IntegerParser, WordParser};

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn sender() -> StaticSender {
        StaticSender::new("tester")
    }

    fn sample() -> CommandGraph<StaticSender> {
        CommandDeclaration::<StaticSender>::new("region")
            .then(literal("create").executes(|_, _| {}))
            .then(literal("clear").executes(|_, _| {}))
            .then(
                literal("delete")
                    .with_permission("region.admin")
                    .executes(|_, _| {}),
            )
            .then(argument("enabled", BoolParser).executes(|_, _| {}))
            .build()
            .unwrap()
    }

    #[test]
    fn test_prefix_filtered_literals_and_parser_candidates() {
        let graph = sample();
        assert_eq!(
            suggest(&graph, &tokens(&["c"]), &sender()),
            vec!["create".to_string(), "clear".to_string()]
        );
        assert_eq!(
            suggest(&graph, &tokens(&["t"]), &sender()),
            vec!["true".to_string()]
        );
        // Empty partial: everything visible.
        assert_eq!(
            suggest(&graph, &tokens(&[""]), &sender()),
            vec![
                "create".to_string(),
                "clear".to_string(),
                "true".to_string(),
                "false".to_string()
            ]
        );
    }

    #[test]
    fn test_gated_branch_invisible_in_suggestions() {
        let graph = sample();
        let without: CommandGraph<StaticSender> = CommandDeclaration::<StaticSender>::new("region")
            .then(literal("create").executes(|_, _| {}))
            .then(literal("clear").executes(|_, _| {}))
            .then(argument("enabled", BoolParser).executes(|_, _| {}))
            .build()
            .unwrap();

        // Same candidate set as a graph in which the gated node is absent.
        assert_eq!(
            suggest(&graph, &tokens(&["d"]), &sender()),
            suggest(&without, &tokens(&["d"]), &sender())
        );
        assert!(suggest(&graph, &tokens(&["d"]), &sender()).is_empty());

        let admin = StaticSender::new("admin").with_permission("region.admin");
        assert_eq!(
            suggest(&graph, &tokens(&["d"]), &admin),
            vec!["delete".to_string()]
        );
    }

    #[test]
    fn test_walks_through_arguments_before_cursor() {
        let graph = CommandDeclaration::<StaticSender>::new("warp")
            .with_arguments([
                argument("target", WordParser),
                argument("count", IntegerParser::new()),
            ])
            .executes(|_, _| {})
            .then(literal("list").executes(|_, _| {}))
            .build()
            .unwrap();

        // "warp home |" — past the word argument, the integer slot offers
        // nothing, and the literal sibling was already consumed away.
        assert!(suggest(&graph, &tokens(&["home", ""]), &sender()).is_empty());

        // At the first position both the literal and nothing-from-word show.
        assert_eq!(
            suggest(&graph, &tokens(&["l"]), &sender()),
            vec!["list".to_string()]
        );
    }

    #[test]
    fn test_suggestion_override_replaces_parser_candidates() {
        let graph = CommandDeclaration::<StaticSender>::new("warp")
            .with_arguments([
                argument("target", WordParser).replace_suggestions(["home", "spawn", "work"]),
            ])
            .executes(|_, _| {})
            .build()
            .unwrap();

        assert_eq!(
            suggest(&graph, &tokens(&[""]), &sender()),
            vec!["home".to_string(), "spawn".to_string(), "work".to_string()]
        );
        assert_eq!(
            suggest(&graph, &tokens(&["s"]), &sender()),
            vec!["spawn".to_string()]
        );
    }

    #[test]
    fn test_duplicate_candidates_collapse() {
        // Two argument siblings of different types, same override text.
        let graph = CommandDeclaration::<StaticSender>::new("set")
            .then(
                argument("count", IntegerParser::new())
                    .replace_suggestions(["10"])
                    .executes(|_, _| {}),
            )
            .then(
                argument("label", WordParser)
                    .replace_suggestions(["10", "high"])
                    .executes(|_, _| {}),
            )
            .build()
            .unwrap();

        assert_eq!(
            suggest(&graph, &tokens(&[""]), &sender()),
            vec!["10".to_string(), "high".to_string()]
        );
    }
}
