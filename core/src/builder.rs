//! Fluent builder for declaring command trees.
//!
//! A command is declared as a chain of [`then`](NodeBuilder::then) calls
//! producing a tree of literal and argument nodes, or as a linear argument
//! spine via [`with_arguments`](CommandDeclaration::with_arguments), or a
//! mix of both. [`CommandDeclaration::build`] compiles the declaration into
//! an immutable [`CommandGraph`], expanding every multi-literal into sibling
//! literal nodes that share one children subtree.
//!
//! # Example
//!
//! ```
//! use command_graph_core::{CommandDeclaration, StaticSender, literal};
//!
//! let graph = CommandDeclaration::<StaticSender>::new("region")
//!     .with_short_description("Manage regions")
//!     .then(
//!         literal("create")
//!             .executes(|_s: &StaticSender, _a| {}),
//!     )
//!     .then(
//!         literal("delete")
//!             .with_permission("region.admin")
//!             .executes(|_s: &StaticSender, _a| {}),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(graph.root().display(), "region");
//! assert_eq!(graph.root().children().len(), 2);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::merge;
use crate::types::{
    ArgumentParser, BoundArgs, CommandGraph, Executor, GraphNode, HelpMetadata, HelpProvider,
    NodeKey, Requirement, Usage,
};
use crate::validate::{self, ConstructionError};

enum BuilderKind<S> {
    Literal {
        text: String,
    },
    MultiLiteral {
        alternatives: Vec<String>,
    },
    Argument {
        name: String,
        parser: Arc<dyn ArgumentParser<S>>,
    },
}

/// Starts a literal node matching `text` verbatim.
pub fn literal<S>(text: impl Into<String>) -> NodeBuilder<S> {
    NodeBuilder::new(BuilderKind::Literal { text: text.into() })
}

/// Starts a multi-literal node: a compact declaration of several literal
/// alternatives that expand, at build time, into sibling literal nodes
/// sharing one children subtree.
///
/// Naming the node with [`NodeBuilder::named`] additionally binds the
/// matched alternative as a string argument under that name.
pub fn multi_literal<S, I, T>(alternatives: I) -> NodeBuilder<S>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    NodeBuilder::new(BuilderKind::MultiLiteral {
        alternatives: alternatives.into_iter().map(Into::into).collect(),
    })
}

/// Starts a typed argument node parsed by `parser` and bound under `name`.
pub fn argument<S>(name: impl Into<String>, parser: impl ArgumentParser<S> + 'static) -> NodeBuilder<S> {
    NodeBuilder::new(BuilderKind::Argument {
        name: name.into(),
        parser: Arc::new(parser),
    })
}

/// One node under construction, with its children, executor, and gates.
///
/// Produced by [`literal`], [`multi_literal`], or [`argument`] and composed
/// with [`then`](Self::then). A node may be both branching and executable.
pub struct NodeBuilder<S> {
    kind: BuilderKind<S>,
    name: Option<String>,
    suggestion_override: Option<Vec<String>>,
    children: Vec<NodeBuilder<S>>,
    executor: Option<Executor<S>>,
    requirement: Option<Requirement<S>>,
    permission: Option<String>,
}

impl<S> NodeBuilder<S> {
    fn new(kind: BuilderKind<S>) -> Self {
        Self {
            kind,
            name: None,
            suggestion_override: None,
            children: Vec::new(),
            executor: None,
            requirement: None,
            permission: None,
        }
    }

    /// Sets the internal node name. For a multi-literal this also binds the
    /// matched alternative as a string value under the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a child node. Declaration order is dispatch and help order.
    pub fn then(mut self, child: NodeBuilder<S>) -> Self {
        self.children.push(child);
        self
    }

    /// Attaches an executor, making this node a valid end of input.
    pub fn executes(mut self, executor: impl Fn(&S, &BoundArgs) + Send + Sync + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Attaches a requirement predicate gating visibility and execution of
    /// this node and everything below it.
    pub fn requires(mut self, predicate: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.requirement = Some(Arc::new(predicate));
        self
    }

    /// Attaches a permission tag, the common shorthand for a requirement.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Replaces the parser's suggestion candidates with a static list.
    /// Only valid on argument nodes; rejected at build time otherwise.
    pub fn replace_suggestions<I, T>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.suggestion_override = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }

    /// Compiles this builder (and its subtree) into graph nodes. A
    /// multi-literal yields one node per alternative, all sharing the same
    /// children vector by reference.
    fn build_nodes(self) -> Result<Vec<Arc<GraphNode<S>>>, ConstructionError> {
        let mut children = Vec::new();
        for child in self.children {
            children.extend(child.build_nodes()?);
        }
        let children = merge::dedupe_siblings(children);

        match self.kind {
            BuilderKind::Literal { text } => {
                validate::validate_literal(&text)?;
                if self.suggestion_override.is_some() {
                    return Err(ConstructionError::SuggestionsOnLiteral(text));
                }
                Ok(vec![Arc::new(GraphNode {
                    name: self.name.unwrap_or_else(|| text.clone()),
                    key: NodeKey::Literal(text),
                    bind: None,
                    parser: None,
                    suggestion_override: None,
                    children,
                    executor: self.executor,
                    requirement: self.requirement,
                    permission: self.permission,
                })])
            }
            BuilderKind::MultiLiteral { alternatives } => {
                if alternatives.is_empty() {
                    return Err(ConstructionError::EmptyLiteralSet);
                }
                if self.suggestion_override.is_some() {
                    return Err(ConstructionError::SuggestionsOnLiteral(
                        alternatives.join("|"),
                    ));
                }
                let mut seen = HashSet::new();
                for alt in &alternatives {
                    validate::validate_literal(alt)?;
                    if !seen.insert(alt.clone()) {
                        return Err(ConstructionError::DuplicateLiteralAlternative(alt.clone()));
                    }
                }
                let bind = self.name;
                Ok(alternatives
                    .into_iter()
                    .map(|text| {
                        Arc::new(GraphNode {
                            name: bind.clone().unwrap_or_else(|| text.clone()),
                            key: NodeKey::Literal(text),
                            bind: bind.clone(),
                            parser: None,
                            suggestion_override: None,
                            // shared, not copied: Arc clones of one subtree
                            children: children.clone(),
                            executor: self.executor.clone(),
                            requirement: self.requirement.clone(),
                            permission: self.permission.clone(),
                        })
                    })
                    .collect())
            }
            BuilderKind::Argument { name, parser } => {
                validate::validate_argument_name(&name)?;
                if parser.consumes_all() && !children.is_empty() {
                    return Err(ConstructionError::ChildrenAfterGreedy(name));
                }
                Ok(vec![Arc::new(GraphNode {
                    name: name.clone(),
                    key: NodeKey::Argument(name),
                    bind: None,
                    parser: Some(parser),
                    suggestion_override: self.suggestion_override,
                    children,
                    executor: self.executor,
                    requirement: self.requirement,
                    permission: self.permission,
                })])
            }
        }
    }
}

/// A complete command declaration: root name, node tree, and help metadata.
///
/// Supports two declaration styles that may be mixed: a linear argument
/// spine ([`with_arguments`](Self::with_arguments)) where
/// [`executes`](Self::executes) binds to the deepest spine node, and
/// explicit tree branches ([`then`](Self::then)) hung off the root.
///
/// # Examples
///
/// Spine style:
///
/// ```
/// use command_graph_core::{CommandDeclaration, StaticSender, literal, multi_literal};
///
/// let graph = CommandDeclaration::<StaticSender>::new("gamemode")
///     .with_arguments([multi_literal(["survival", "creative"]).named("mode")])
///     .executes(|_s: &StaticSender, args| {
///         let _mode = args.get_str("mode");
///     })
///     .build()
///     .unwrap();
///
/// // The multi-literal expanded into two executable literal siblings.
/// assert_eq!(graph.root().executable_paths().len(), 2);
/// ```
///
/// Tree style:
///
/// ```
/// use command_graph_core::{CommandDeclaration, StaticSender, literal};
///
/// let graph = CommandDeclaration::<StaticSender>::new("save")
///     .executes(|_s: &StaticSender, _a| {})
///     .then(literal("all").executes(|_s: &StaticSender, _a| {}))
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.root().executable_paths().len(), 2);
/// ```
pub struct CommandDeclaration<S> {
    name: String,
    aliases: Vec<String>,
    short_description: Option<String>,
    full_description: Option<String>,
    usage: Usage,
    owner: Option<String>,
    permission: Option<String>,
    requirement: Option<Requirement<S>>,
    executor: Option<Executor<S>>,
    spine: Vec<NodeBuilder<S>>,
    branches: Vec<NodeBuilder<S>>,
    help_provider: Option<Arc<dyn HelpProvider<S>>>,
}

impl<S> CommandDeclaration<S> {
    /// Starts a declaration for the given root name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            short_description: None,
            full_description: None,
            usage: Usage::Generate,
            owner: None,
            permission: None,
            requirement: None,
            executor: None,
            spine: Vec::new(),
            branches: Vec::new(),
            help_provider: None,
        }
    }

    /// Declares alias names under which the same graph is reachable.
    pub fn with_aliases<I, T>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the one-line summary used in help listings.
    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Sets the longer description rendered on the `Description:` line.
    pub fn with_full_description(mut self, text: impl Into<String>) -> Self {
        self.full_description = Some(text.into());
        self
    }

    /// Sets both descriptions at once.
    pub fn with_help(self, short: impl Into<String>, full: impl Into<String>) -> Self {
        self.with_short_description(short).with_full_description(full)
    }

    /// Overrides usage generation with explicit lines. An empty iterator
    /// suppresses the usage section entirely.
    pub fn with_usage<I, T>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.usage = Usage::Override(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the owner label used in the default description sentence.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Requires a permission tag on the root node.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Attaches a requirement predicate to the root node.
    pub fn requires(mut self, predicate: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.requirement = Some(Arc::new(predicate));
        self
    }

    /// Attaches the executor. With a non-empty argument spine the executor
    /// binds to the deepest spine node; otherwise to the root.
    pub fn executes(mut self, executor: impl Fn(&S, &BoundArgs) + Send + Sync + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Appends nodes to the linear argument spine below the root.
    pub fn with_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = NodeBuilder<S>>,
    {
        self.spine.extend(arguments);
        self
    }

    /// Adds an explicit tree branch at the root.
    pub fn then(mut self, child: NodeBuilder<S>) -> Self {
        self.branches.push(child);
        self
    }

    /// Supplies a custom help topic, replacing generated help text for this
    /// command and all of its aliases.
    pub fn with_help_topic(mut self, provider: impl HelpProvider<S> + 'static) -> Self {
        self.help_provider = Some(Arc::new(provider));
        self
    }

    /// Compiles the declaration into an immutable [`CommandGraph`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] for malformed declarations (invalid
    /// names, empty literal sets, children behind a greedy argument, ...).
    /// Nothing is partially applied on failure.
    pub fn build(mut self) -> Result<CommandGraph<S>, ConstructionError> {
        validate::validate_command_name(&self.name)?;
        for alias in &self.aliases {
            validate::validate_alias(alias)?;
        }

        // Fold the spine right-to-left into one nested chain; the
        // declaration executor lands on the deepest spine node.
        let mut executor = self.executor.take();
        let mut chain: Option<NodeBuilder<S>> = None;
        while let Some(mut node) = self.spine.pop() {
            match chain.take() {
                Some(next) => node.children.push(next),
                None => {
                    if let Some(exec) = executor.take() {
                        node.executor = Some(exec);
                    }
                }
            }
            chain = Some(node);
        }

        let mut builders = Vec::new();
        if let Some(chain) = chain {
            builders.push(chain);
        }
        builders.append(&mut self.branches);

        let mut children = Vec::new();
        for builder in builders {
            children.extend(builder.build_nodes()?);
        }
        let children = merge::dedupe_siblings(children);

        let root = Arc::new(GraphNode {
            key: NodeKey::Literal(self.name.clone()),
            name: self.name.clone(),
            bind: None,
            parser: None,
            suggestion_override: None,
            children,
            executor,
            requirement: self.requirement,
            permission: self.permission,
        });

        let mut aliases = Vec::new();
        for alias in self.aliases {
            if alias != self.name && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        Ok(CommandGraph {
            root,
            help: HelpMetadata {
                short_description: self.short_description,
                full_description: self.full_description,
                usage: self.usage,
                aliases,
                owner: self.owner,
            },
            help_provider: self.help_provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::StaticSender;

    fn noop() -> impl Fn(&StaticSender, &BoundArgs) + Send + Sync + 'static {
        |_, _| {}
    }

    #[test]
    fn test_single_path_tree() {
        let graph = CommandDeclaration::<StaticSender>::new("ping")
            .executes(noop())
            .build()
            .unwrap();
        assert_eq!(graph.root().display(), "ping");
        assert!(graph.root().executor().is_some());
        assert!(graph.root().children().is_empty());
    }

    #[test]
    fn test_multi_literal_expands_into_siblings() {
        let graph = CommandDeclaration::<StaticSender>::new("test")
            .then(
                multi_literal(["a", "b", "c"])
                    .then(literal("d").executes(noop())),
            )
            .build()
            .unwrap();

        let root = graph.root();
        assert_eq!(root.children().len(), 3);
        let keys: Vec<&str> = root.children().iter().map(|c| c.display()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);

        // The alternatives share one children subtree by reference.
        let first = &root.children()[0].children()[0];
        let second = &root.children()[1].children()[0];
        assert!(Arc::ptr_eq(first, second));
    }

    #[test]
    fn test_named_multi_literal_binds() {
        let graph = CommandDeclaration::<StaticSender>::new("mode")
            .with_arguments([multi_literal(["on", "off"]).named("state")])
            .executes(noop())
            .build()
            .unwrap();
        let child = &graph.root().children()[0];
        assert_eq!(child.bind_name(), Some("state"));
        assert!(child.executor().is_some());
    }

    #[test]
    fn test_spine_executor_binds_to_deepest_node() {
        let graph = CommandDeclaration::<StaticSender>::new("test")
            .with_arguments([literal("a"), literal("b")])
            .executes(noop())
            .build()
            .unwrap();

        let a = &graph.root().children()[0];
        assert!(a.executor().is_none());
        let b = &a.children()[0];
        assert!(b.executor().is_some());
        assert!(graph.root().executor().is_none());
    }

    #[test]
    fn test_duplicate_sibling_literals_are_merged() {
        let graph = CommandDeclaration::<StaticSender>::new("test")
            .then(literal("sub").then(literal("x").executes(noop())))
            .then(literal("sub").then(literal("y").executes(noop())))
            .build()
            .unwrap();

        let root = graph.root();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children().len(), 2);
    }

    #[test]
    fn test_invalid_command_name_rejected() {
        let err = CommandDeclaration::<StaticSender>::new("bad name")
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::InvalidCommandName("bad name".into()));
    }

    #[test]
    fn test_empty_multi_literal_rejected() {
        let err = CommandDeclaration::<StaticSender>::new("test")
            .then(multi_literal(Vec::<String>::new()))
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::EmptyLiteralSet);
    }

    #[test]
    fn test_duplicate_alternative_rejected() {
        let err = CommandDeclaration::<StaticSender>::new("test")
            .then(multi_literal(["a", "a"]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::DuplicateLiteralAlternative("a".into())
        );
    }

    #[test]
    fn test_suggestions_on_literal_rejected() {
        let err = CommandDeclaration::<StaticSender>::new("test")
            .then(literal("x").replace_suggestions(["y"]))
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::SuggestionsOnLiteral("x".into()));
    }

    #[test]
    fn test_alias_equal_to_name_dropped() {
        let graph = CommandDeclaration::<StaticSender>::new("test")
            .with_aliases(["test", "t", "t"])
            .executes(noop())
            .build()
            .unwrap();
        assert_eq!(graph.help().aliases, vec!["t".to_string()]);
    }
}
