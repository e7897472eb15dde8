//! Process-scoped command registry: root-name → graph ownership.
//!
//! The registry is the sole writer of canonical graphs. Registration builds
//! the declared tree, folds it into any existing graph for the same root
//! (or an aliased root), and swaps the new graph in atomically from the
//! perspective of readers: every dispatch, suggestion, or help consumer
//! works on an `Arc` snapshot that is never mutated in place. Aliases are
//! shared ownership, not duplication — one graph value reachable under
//! several name keys. Unregistering a root removes the graph together with
//! every name that mapped to it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use command_graph_core::{
    CommandDeclaration, CommandGraph, CommandSender, merge_graphs,
};
use command_graph_dispatch::{BoundExecution, DispatchError, resolve, suggest, tokenize};
use tracing::{debug, info, warn};

use crate::error::{RegistryError, Result};
use crate::help::{HelpTopic, generate_topic};

/// Registry-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Namespace label; every command is also reachable as
    /// `namespace:name` for resolution and suggestions.
    pub namespace: String,
    /// Owner label used in default help sentences when a declaration does
    /// not name its own owner.
    pub default_owner: String,
}

impl RegistryConfig {
    /// Creates a config with the given namespace and default owner label.
    pub fn new(namespace: impl Into<String>, default_owner: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            default_owner: default_owner.into(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new("app", "the application")
    }
}

/// Owns every registered command graph and serves dispatch, suggestion,
/// and help lookups over read-only snapshots.
///
/// # Examples
///
/// ```
/// use command_graph_core::{CommandDeclaration, StaticSender, literal};
/// use command_graph_registry::CommandRegistry;
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(
///         CommandDeclaration::new("ping")
///             .with_short_description("Check liveness")
///             .executes(|_s: &StaticSender, _a| {}),
///     )
///     .unwrap();
///
/// let sender = StaticSender::new("console");
/// assert!(registry.execute("ping", &[], &sender).is_ok());
/// assert_eq!(
///     registry.help_topic("ping").unwrap().short_text(),
///     "Check liveness"
/// );
/// ```
#[derive(Debug)]
pub struct CommandRegistry<S> {
    config: RegistryConfig,
    graphs: HashMap<String, Arc<CommandGraph<S>>>,
    topics: HashMap<String, HelpTopic<S>>,
}

impl<S: CommandSender> CommandRegistry<S> {
    /// Creates a registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            graphs: HashMap::new(),
            topics: HashMap::new(),
        }
    }

    /// Registry settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers a command, folding it into any existing graph sharing the
    /// root name (or a name aliased to it) and regenerating help topics.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the declaration is malformed or the
    /// merged graph would have no executable path. On error the registry is
    /// unchanged.
    pub fn register(&mut self, declaration: CommandDeclaration<S>) -> Result<()> {
        let incoming = declaration.build()?;
        let name = incoming.root().display().to_string();

        let existing = self.graph(&name).cloned();
        let merged = match &existing {
            Some(old) => Arc::new(merge_graphs(old, &incoming)),
            None => Arc::new(incoming),
        };
        if merged.root().executable_paths().is_empty() {
            return Err(RegistryError::NotExecutable(name));
        }

        if let Some(old) = existing {
            self.remove_bindings(&old);
        }

        let primary = merged.root().display().to_string();
        let mut names = vec![primary.clone()];
        names.extend(merged.help().aliases.iter().cloned());
        for topic_name in &names {
            if let Some(shadowed) = self
                .graphs
                .insert(topic_name.clone(), Arc::clone(&merged))
            {
                if !Arc::ptr_eq(&shadowed, &merged) {
                    warn!(name = %topic_name, "rebinding name away from another command");
                }
            }
            let topic = match merged.help_provider() {
                Some(provider) => HelpTopic::Custom(Arc::clone(provider)),
                None => HelpTopic::Generated(generate_topic(
                    &merged,
                    topic_name,
                    &self.config.default_owner,
                )),
            };
            self.topics.insert(topic_name.clone(), topic);
        }

        info!(command = %primary, aliases = names.len() - 1, "registered command");
        Ok(())
    }

    /// Removes the graph reachable under `name`, together with every name
    /// (primary and aliases) bound to it. Returns the removed graph.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<CommandGraph<S>>> {
        let graph = self.graph(name).cloned()?;
        self.remove_bindings(&graph);
        info!(command = graph.root().display(), "unregistered command");
        Some(graph)
    }

    /// Resolves tokenized input against the graph registered under `name`
    /// (plain or `namespace:`-prefixed).
    pub fn resolve(
        &self,
        name: &str,
        tokens: &[String],
        ctx: &S,
    ) -> std::result::Result<BoundExecution<S>, DispatchError> {
        match self.graph(name) {
            Some(graph) => resolve(graph, tokens, ctx),
            None => Err(DispatchError::UnknownCommand(name.to_string())),
        }
    }

    /// Resolves and immediately invokes.
    pub fn execute(
        &self,
        name: &str,
        tokens: &[String],
        ctx: &S,
    ) -> std::result::Result<(), DispatchError> {
        self.resolve(name, tokens, ctx)?.invoke(ctx);
        Ok(())
    }

    /// Tokenizes a raw line (optionally starting with `/`), treats the
    /// first token as the command name, and executes the rest.
    pub fn execute_line(&self, line: &str, ctx: &S) -> std::result::Result<(), DispatchError> {
        let line = line.strip_prefix('/').unwrap_or(line);
        let tokens = tokenize(line);
        match tokens.split_first() {
            Some((name, rest)) => self.execute(name, rest, ctx),
            None => Err(DispatchError::UnknownCommand(String::new())),
        }
    }

    /// Completion candidates for the final (partial) token, from every
    /// branch the caller is allowed to see. Unknown names yield nothing.
    pub fn suggest(&self, name: &str, tokens: &[String], ctx: &S) -> Vec<String> {
        match self.graph(name) {
            Some(graph) => suggest(graph, tokens, ctx),
            None => Vec::new(),
        }
    }

    /// The help topic for a plain command name or alias.
    pub fn help_topic(&self, name: &str) -> Option<&HelpTopic<S>> {
        self.topics.get(name)
    }

    /// The graph snapshot reachable under `name` (plain or
    /// `namespace:`-prefixed).
    pub fn graph(&self, name: &str) -> Option<&Arc<CommandGraph<S>>> {
        if let Some(graph) = self.graphs.get(name) {
            return Some(graph);
        }
        name.strip_prefix(&self.config.namespace)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|plain| self.graphs.get(plain))
    }

    /// Returns `true` if any command (or alias) is bound to `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.graph(name).is_some()
    }

    /// Iterates over every bound name, primaries and aliases alike.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(|s| s.as_str())
    }

    /// Number of distinct commands (a command and its aliases count once).
    pub fn len(&self) -> usize {
        self.graphs
            .values()
            .map(|graph| Arc::as_ptr(graph) as usize)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    fn remove_bindings(&mut self, graph: &Arc<CommandGraph<S>>) {
        let stale: Vec<String> = self
            .graphs
            .iter()
            .filter(|(_, bound)| Arc::ptr_eq(bound, graph))
            .map(|(name, _)| name.clone())
            .collect();
        for name in &stale {
            self.graphs.remove(name);
            self.topics.remove(name);
        }
        debug!(names = stale.len(), "dropped stale name bindings");
    }
}

impl<S: CommandSender> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
