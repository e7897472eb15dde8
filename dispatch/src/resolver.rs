//! Parse-mode dispatch walk.
//!
//! Walks a command graph against tokenized input: at each node, literal
//! children are tried first in declaration order (case-sensitive exact
//! match, one token), then argument children in declaration order (each
//! parser may consume a variable number of tokens or fail without
//! consuming). The first child whose consumption succeeds commits; there is
//! no backtracking across a committed literal match. Nodes whose gate
//! rejects the caller are treated as absent, and a gated branch that would
//! have accepted the input reports the same way as a command that does not
//! exist.

use std::fmt;

use command_graph_core::{
    ArgumentError, BoundArgs, CommandGraph, CommandSender, Executor, GraphNode, ParsedValue,
    TokenCursor,
};
use tracing::{debug, trace};

use crate::error::DispatchError;

/// A successful dispatch resolution: the executor to invoke plus the
/// argument values bound along the matched path.
///
/// Resolution does not invoke; the host calls [`invoke`](Self::invoke)
/// when (and if) it wants the command to run.
pub struct BoundExecution<S> {
    executor: Executor<S>,
    args: BoundArgs,
    path: Vec<String>,
}

impl<S> BoundExecution<S> {
    /// The values bound during the walk, in binding order.
    pub fn args(&self) -> &BoundArgs {
        &self.args
    }

    /// The matched path, starting with the root name.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Runs the resolved executor with the bound arguments.
    pub fn invoke(&self, ctx: &S) {
        (self.executor)(ctx, &self.args);
    }
}

impl<S> fmt::Debug for BoundExecution<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundExecution")
            .field("path", &self.path)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Resolves tokenized input against a graph to an executable node.
///
/// `tokens` is the input line after the command name, already split by the
/// token producer.
///
/// # Errors
///
/// - [`DispatchError::NotPermitted`] when the winning path is gated away
///   from the caller (rendered as an unknown command).
/// - [`DispatchError::IncompleteCommand`] when input ends at a node with no
///   executor.
/// - [`DispatchError::UnexpectedToken`] / [`DispatchError::InvalidArgument`]
///   when a token matches no candidate at its position.
pub fn resolve<S: CommandSender>(
    graph: &CommandGraph<S>,
    tokens: &[String],
    ctx: &S,
) -> Result<BoundExecution<S>, DispatchError> {
    let root = graph.root();
    debug!(command = root.display(), tokens = tokens.len(), "dispatch walk");
    if !root.passes(ctx) {
        return Err(DispatchError::NotPermitted(root.display().to_string()));
    }
    let mut cursor = TokenCursor::new(tokens);
    let mut args = BoundArgs::new();
    let mut path = vec![root.display().to_string()];
    walk(root, root.display(), &mut cursor, ctx, &mut args, &mut path)
}

fn walk<S: CommandSender>(
    node: &GraphNode<S>,
    root_name: &str,
    cursor: &mut TokenCursor<'_>,
    ctx: &S,
    args: &mut BoundArgs,
    path: &mut Vec<String>,
) -> Result<BoundExecution<S>, DispatchError> {
    let token = match cursor.peek() {
        None => {
            // Input exhausted: the node we stopped on decides the outcome.
            return match node.executor() {
                Some(executor) => Ok(BoundExecution {
                    executor: executor.clone(),
                    args: args.clone(),
                    path: path.clone(),
                }),
                None => Err(DispatchError::IncompleteCommand {
                    consumed: path.join(" "),
                    expected: visible_tokens(node, ctx),
                }),
            };
        }
        Some(token) => token.to_string(),
    };
    let position = cursor.position();
    let mut gated = false;

    for child in node.children().iter().filter(|c| c.is_literal()) {
        if child.display() != token {
            continue;
        }
        if !child.passes(ctx) {
            gated = true;
            continue;
        }
        cursor.next();
        path.push(token.clone());
        if let Some(bind) = child.bind_name() {
            args.push(bind, ParsedValue::String(token.clone()));
        }
        trace!(literal = %token, "committed literal");
        return walk(child, root_name, cursor, ctx, args, path);
    }

    let mut failures: Vec<(String, ArgumentError)> = Vec::new();
    for child in node.children().iter().filter(|c| c.is_argument()) {
        let Some(parser) = child.parser() else {
            continue;
        };
        if !child.passes(ctx) {
            // Probe on a throwaway cursor: a gated branch that would have
            // accepted the input must read as nonexistent rather than as a
            // syntax error pointing at it.
            let mut probe = cursor.clone();
            if parser.parse(&mut probe, ctx).is_ok() {
                gated = true;
            }
            continue;
        }
        let mark = cursor.position();
        match parser.parse(cursor, ctx) {
            Ok(value) => {
                path.extend(cursor.consumed()[mark..].iter().cloned());
                args.push(child.name(), value);
                trace!(argument = child.name(), "bound argument");
                return walk(child, root_name, cursor, ctx, args, path);
            }
            Err(err) => {
                cursor.set_position(mark);
                failures.push((child.name().to_string(), err));
            }
        }
    }

    if gated {
        return Err(DispatchError::NotPermitted(root_name.to_string()));
    }
    let has_visible_literal = node
        .children()
        .iter()
        .any(|c| c.is_literal() && c.passes(ctx));
    if let [(name, err)] = failures.as_slice() {
        if !has_visible_literal {
            return Err(DispatchError::InvalidArgument {
                name: name.clone(),
                token,
                position,
                message: err.message.clone(),
            });
        }
    }
    Err(DispatchError::UnexpectedToken {
        token,
        position,
        expected: visible_tokens(node, ctx),
    })
}

fn visible_tokens<S: CommandSender>(node: &GraphNode<S>, ctx: &S) -> Vec<String> {
    node.children()
        .iter()
        .filter(|c| c.passes(ctx))
        .map(|c| c.usage_token())
        .collect()
}
