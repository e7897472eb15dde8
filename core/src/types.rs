//! Node model and value types for dispatchable command graphs.
//!
//! This module defines the core data model: [`GraphNode`] (one point in a
//! command tree, either a fixed literal or a typed argument slot),
//! [`CommandGraph`] (a merged tree plus its help metadata), the
//! [`ArgumentParser`] capability trait for pluggable argument types, and the
//! bound-value model ([`ParsedValue`], [`BoundArgs`]) produced by a
//! successful dispatch walk.
//!
//! Node trees are immutable once built. Merging never mutates an existing
//! tree; it produces a new one that structurally shares untouched subtrees,
//! so readers holding a graph snapshot always observe consistent state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sender::CommandSender;
use crate::tokens::TokenCursor;

/// Callback invoked when a dispatch walk resolves to an executable node.
///
/// Receives the caller context and the argument values bound along the
/// matched path. The engine observes no return value; fallible work belongs
/// to the host side of the callback.
pub type Executor<S> = Arc<dyn Fn(&S, &BoundArgs) + Send + Sync>;

/// Access predicate attached to a node and inherited along its path.
///
/// Must be a pure function of the caller context: predicates compose by
/// conjunction from the root down and may be short-circuited on the first
/// denial.
pub type Requirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// A typed value produced by an argument parser.
///
/// # Examples
///
/// ```
/// use command_graph_core::ParsedValue;
///
/// let v = ParsedValue::Integer(42);
/// assert_eq!(v.as_integer(), Some(42));
/// assert_eq!(v.as_str(), None);
/// assert_eq!(v.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParsedValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value (single word, quoted phrase, or greedy remainder).
    String(String),
}

impl ParsedValue {
    /// Returns the boolean value, if this is a [`ParsedValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, if this is a [`ParsedValue::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value, if this is a [`ParsedValue::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string value, if this is a [`ParsedValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Argument values bound during a dispatch walk, in binding order.
///
/// # Examples
///
/// ```
/// use command_graph_core::{BoundArgs, ParsedValue};
///
/// let mut args = BoundArgs::new();
/// args.push("count", ParsedValue::Integer(3));
/// args.push("target", ParsedValue::String("world".into()));
///
/// assert_eq!(args.get_integer("count"), Some(3));
/// assert_eq!(args.get_str("target"), Some("world"));
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundArgs {
    values: Vec<(String, ParsedValue)>,
}

impl BoundArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bound value. Binding order is the walk order.
    pub fn push(&mut self, name: impl Into<String>, value: ParsedValue) {
        self.values.push((name.into(), value));
    }

    /// Looks up a value by argument name.
    pub fn get(&self, name: &str) -> Option<&ParsedValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Looks up a boolean by argument name.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParsedValue::as_bool)
    }

    /// Looks up an integer by argument name.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParsedValue::as_integer)
    }

    /// Looks up a float by argument name.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParsedValue::as_float)
    }

    /// Looks up a string by argument name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParsedValue::as_str)
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParsedValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Failure reported by an argument parser for one consumption attempt.
///
/// Carries a human-readable message and optional suggestion candidates for
/// the failing position. A parser failure is local: the resolver tries the
/// next sibling candidate before surfacing any error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ArgumentError {
    /// What went wrong, phrased for the command issuer.
    pub message: String,
    /// Candidate inputs that would have been accepted, when known.
    pub suggestions: Vec<String>,
}

impl ArgumentError {
    /// Creates an error with the given message and no suggestions.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Attaches suggestion candidates for the failing position.
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// Capability trait for pluggable argument types.
///
/// A parser is offered the remaining token stream and either consumes one or
/// more tokens, yielding a typed value, or fails without consuming (the
/// resolver rewinds the cursor for it). Parsers may backtrack internally
/// during their own consumption but must not observe or mutate anything
/// outside the cursor and the caller context.
///
/// # Examples
///
/// Implementing a custom parser:
///
/// ```
/// use command_graph_core::{ArgumentError, ArgumentParser, ParsedValue, TokenCursor};
///
/// struct PercentParser;
///
/// impl<S> ArgumentParser<S> for PercentParser {
///     fn type_name(&self) -> &'static str {
///         "percent"
///     }
///
///     fn parse(
///         &self,
///         cursor: &mut TokenCursor<'_>,
///         _ctx: &S,
///     ) -> Result<ParsedValue, ArgumentError> {
///         let token = cursor
///             .next()
///             .ok_or_else(|| ArgumentError::new("expected a percentage"))?;
///         let digits = token.strip_suffix('%').unwrap_or(token);
///         let value: i64 = digits
///             .parse()
///             .map_err(|_| ArgumentError::new(format!("'{token}' is not a percentage")))?;
///         Ok(ParsedValue::Integer(value.clamp(0, 100)))
///     }
/// }
/// ```
pub trait ArgumentParser<S>: Send + Sync {
    /// Stable identifier for this parser type.
    ///
    /// Two argument nodes at the same position unify during merging only if
    /// their parsers report the same type name.
    fn type_name(&self) -> &'static str;

    /// Consumes tokens from `cursor` and yields a typed value, or fails.
    fn parse(&self, cursor: &mut TokenCursor<'_>, ctx: &S) -> Result<ParsedValue, ArgumentError>;

    /// Suggestion candidates for a partial token at this position.
    fn suggest(&self, _partial: &str, _ctx: &S) -> Vec<String> {
        Vec::new()
    }

    /// Returns `true` if this parser consumes the entire remaining input.
    ///
    /// Such an argument can never have children; the builder rejects that
    /// shape at construction time.
    fn consumes_all(&self) -> bool {
        false
    }
}

/// Caller-supplied help topic with its own per-context text logic.
///
/// Stored in place of generated help text when a declaration provides one;
/// the registry then consults it for every name the command is known by.
pub trait HelpProvider<S>: Send + Sync {
    /// One-line summary shown in topic listings.
    fn short_text(&self) -> String;

    /// Full topic body, which may vary per caller.
    fn full_text(&self, ctx: &S) -> String;
}

/// Identity of a node under its parent: kind plus key string.
///
/// Literals are keyed by the text they match; arguments by their binding
/// name. A literal and an argument never unify even when the strings match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Fixed keyword matched verbatim.
    Literal(String),
    /// Typed argument slot, keyed by argument name.
    Argument(String),
}

impl NodeKey {
    /// The key string (literal text or argument name).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Argument(s) => s,
        }
    }
}

/// One node in a compiled command graph.
///
/// Either a literal (matches one fixed token) or an argument (matches via
/// its parser, producing a bound value). Children are ordered by declaration
/// order, which is semantically significant both for dispatch tie-breaking
/// and for help/usage enumeration.
///
/// Nodes are immutable; graphs evolve only by merging into new trees.
pub struct GraphNode<S> {
    pub(crate) key: NodeKey,
    /// Internal identifier. For literals this defaults to the matched text
    /// and only differs when the declaration named the node explicitly.
    pub(crate) name: String,
    /// Binding name for literals that bind their matched text (expanded
    /// multi-literal alternatives declared with a node name).
    pub(crate) bind: Option<String>,
    pub(crate) parser: Option<Arc<dyn ArgumentParser<S>>>,
    pub(crate) suggestion_override: Option<Vec<String>>,
    pub(crate) children: Vec<Arc<GraphNode<S>>>,
    pub(crate) executor: Option<Executor<S>>,
    pub(crate) requirement: Option<Requirement<S>>,
    pub(crate) permission: Option<String>,
}

impl<S> GraphNode<S> {
    /// The node's identity under its parent.
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Internal node identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text dispatch matches against (literals) or the argument name.
    pub fn display(&self) -> &str {
        self.key.as_str()
    }

    /// Returns `true` for literal nodes.
    pub fn is_literal(&self) -> bool {
        matches!(self.key, NodeKey::Literal(_))
    }

    /// Returns `true` for argument nodes.
    pub fn is_argument(&self) -> bool {
        matches!(self.key, NodeKey::Argument(_))
    }

    /// Binding name, for literals that bind their matched text.
    pub fn bind_name(&self) -> Option<&str> {
        self.bind.as_deref()
    }

    /// The argument parser, for argument nodes.
    pub fn parser(&self) -> Option<&Arc<dyn ArgumentParser<S>>> {
        self.parser.as_ref()
    }

    /// Static suggestion candidates replacing the parser's own, if declared.
    pub fn suggestion_override(&self) -> Option<&[String]> {
        self.suggestion_override.as_deref()
    }

    /// Child nodes in declaration order.
    pub fn children(&self) -> &[Arc<GraphNode<S>>] {
        &self.children
    }

    /// The executor attached to this node, if any.
    pub fn executor(&self) -> Option<&Executor<S>> {
        self.executor.as_ref()
    }

    /// The requirement predicate attached to this node, if any.
    pub fn requirement(&self) -> Option<&Requirement<S>> {
        self.requirement.as_ref()
    }

    /// The permission tag attached to this node, if any.
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Finds a direct child by key.
    pub fn find_child(&self, key: &NodeKey) -> Option<&Arc<GraphNode<S>>> {
        self.children.iter().find(|c| &c.key == key)
    }

    /// Evaluates this node's own gate (requirement predicate and permission
    /// tag) against the caller. Ancestor gates are accumulated by the walk.
    pub fn passes(&self, ctx: &S) -> bool
    where
        S: CommandSender,
    {
        if let Some(req) = &self.requirement {
            if !req(ctx) {
                return false;
            }
        }
        match &self.permission {
            Some(tag) => ctx.has_permission(tag),
            None => true,
        }
    }

    /// How this node renders in a usage line: literals verbatim, arguments
    /// as `<name>`.
    pub fn usage_token(&self) -> String {
        match &self.key {
            NodeKey::Literal(text) => text.clone(),
            NodeKey::Argument(name) => format!("<{name}>"),
        }
    }

    /// Enumerates every root-to-executable-node path, in the order the
    /// paths were first introduced (pre-order over declaration order).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_graph_core::{CommandDeclaration, StaticSender, literal};
    ///
    /// let graph = CommandDeclaration::<StaticSender>::new("test")
    ///     .then(literal("start").executes(|_s: &StaticSender, _a| {}))
    ///     .then(literal("stop").executes(|_s: &StaticSender, _a| {}))
    ///     .build()
    ///     .unwrap();
    ///
    /// let paths = graph.root().executable_paths();
    /// assert_eq!(paths.len(), 2);
    /// assert_eq!(paths[0], vec!["test".to_string(), "start".to_string()]);
    /// ```
    pub fn executable_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        let mut prefix = vec![self.usage_token()];
        self.collect_paths(&mut prefix, &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        if self.executor.is_some() {
            out.push(prefix.clone());
        }
        for child in &self.children {
            prefix.push(child.usage_token());
            child.collect_paths(prefix, out);
            prefix.pop();
        }
    }
}

impl<S> fmt::Debug for GraphNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("key", &self.key)
            .field("bind", &self.bind)
            .field("permission", &self.permission)
            .field("executable", &self.executor.is_some())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Usage-line policy for a command's help text.
///
/// `Generate` derives usage from the graph shape; `Override` renders the
/// declared lines instead. An empty override list suppresses the usage
/// section entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Usage {
    /// Enumerate executable paths from the graph.
    #[default]
    Generate,
    /// Render exactly these lines.
    Override(Vec<String>),
}

impl Usage {
    /// Returns `true` for the auto-generation policy.
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generate)
    }
}

/// Declared help metadata for a command and its aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HelpMetadata {
    /// One-line summary; falls back to the full description, then to a
    /// default sentence naming the owner.
    pub short_description: Option<String>,
    /// Longer description rendered on its own `Description:` line.
    pub full_description: Option<String>,
    /// Usage-line policy.
    pub usage: Usage,
    /// Other names this command is known by.
    pub aliases: Vec<String>,
    /// Owner label used in the default description sentence.
    pub owner: Option<String>,
}

/// A fully merged command tree plus its help metadata.
///
/// This is the dispatchable unit: the registry maps the primary root name
/// and every alias to one shared graph value. Graphs are immutable; a new
/// registration under the same root produces a new graph that structurally
/// shares unchanged subtrees with the old one.
pub struct CommandGraph<S> {
    pub(crate) root: Arc<GraphNode<S>>,
    pub(crate) help: HelpMetadata,
    pub(crate) help_provider: Option<Arc<dyn HelpProvider<S>>>,
}

impl<S> CommandGraph<S> {
    /// The root node; its key is the primary command name.
    pub fn root(&self) -> &Arc<GraphNode<S>> {
        &self.root
    }

    /// Merged help metadata.
    pub fn help(&self) -> &HelpMetadata {
        &self.help
    }

    /// Custom help provider, when one was declared.
    pub fn help_provider(&self) -> Option<&Arc<dyn HelpProvider<S>>> {
        self.help_provider.as_ref()
    }
}

impl<S> fmt::Debug for CommandGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandGraph")
            .field("root", &self.root)
            .field("help", &self.help)
            .field("custom_help", &self.help_provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_value_accessors() {
        assert_eq!(ParsedValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ParsedValue::Integer(7).as_integer(), Some(7));
        assert_eq!(ParsedValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ParsedValue::String("x".into()).as_str(), Some("x"));
        assert_eq!(ParsedValue::Bool(true).as_integer(), None);
    }

    #[test]
    fn test_bound_args_lookup_and_order() {
        let mut args = BoundArgs::new();
        args.push("a", ParsedValue::Integer(1));
        args.push("b", ParsedValue::String("two".into()));

        assert_eq!(args.get_integer("a"), Some(1));
        assert_eq!(args.get_str("b"), Some("two"));
        assert!(args.get("c").is_none());

        let names: Vec<&str> = args.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_node_key_never_unifies_across_kinds() {
        let lit = NodeKey::Literal("5".into());
        let arg = NodeKey::Argument("5".into());
        assert_ne!(lit, arg);
        assert_eq!(lit.as_str(), arg.as_str());
    }

    #[test]
    fn test_argument_error_suggestions() {
        let err = ArgumentError::new("bad value")
            .with_suggestions(vec!["true".into(), "false".into()]);
        assert_eq!(err.to_string(), "bad value");
        assert_eq!(err.suggestions.len(), 2);
    }
}
