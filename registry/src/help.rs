//! Help topic synthesis from graph shape and declared metadata.
//!
//! A topic is generated once per name whenever a command's graph or
//! metadata changes, never per request. Short text falls back from the
//! declared short description to the full description to a default
//! sentence naming the owner. Full text stacks the short text, an optional
//! `Description:` line, the usage section, and an `Aliases:` line; usage is
//! either the declared override lines or an enumeration of every
//! root-to-executable-node path in the graph.
//!
//! A declaration may instead carry a custom [`HelpProvider`], stored as
//! [`HelpTopic::Custom`]; its text logic replaces generation entirely and
//! may vary per caller.

use std::fmt;
use std::sync::Arc;

use command_graph_core::{CommandGraph, HelpProvider, Usage};
use serde::Serialize;

/// Static help text generated from a graph and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedHelp {
    /// One-line summary.
    pub short_text: String,
    /// Full topic body (the short text is its first line).
    pub full_text: String,
}

/// The help record stored per command name.
pub enum HelpTopic<S> {
    /// Text generated from graph shape plus declared metadata.
    Generated(GeneratedHelp),
    /// Caller-supplied topic with its own per-context text logic.
    Custom(Arc<dyn HelpProvider<S>>),
}

impl<S> HelpTopic<S> {
    /// One-line summary for topic listings.
    pub fn short_text(&self) -> String {
        match self {
            Self::Generated(help) => help.short_text.clone(),
            Self::Custom(provider) => provider.short_text(),
        }
    }

    /// Full topic body. Generated topics ignore the caller; custom
    /// providers may tailor their text to it.
    pub fn full_text(&self, ctx: &S) -> String {
        match self {
            Self::Generated(help) => help.full_text.clone(),
            Self::Custom(provider) => provider.full_text(ctx),
        }
    }

    /// Returns `true` when a custom provider backs this topic.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl<S> fmt::Debug for HelpTopic<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated(help) => f.debug_tuple("Generated").field(help).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

/// Generates the topic for one name (the primary root name or an alias).
///
/// Alias topics differ from the primary's only in the `Aliases:` line: an
/// alias lists the primary name first, then every other alias, never
/// itself.
pub fn generate_topic<S>(
    graph: &CommandGraph<S>,
    topic_name: &str,
    default_owner: &str,
) -> GeneratedHelp {
    let meta = graph.help();
    let primary = graph.root().display();

    let short_text = meta
        .short_description
        .clone()
        .or_else(|| meta.full_description.clone())
        .unwrap_or_else(|| {
            format!(
                "A command provided by {}.",
                meta.owner.as_deref().unwrap_or(default_owner)
            )
        });

    let mut lines: Vec<String> = Vec::new();
    if let Some(full) = &meta.full_description {
        lines.push(format!("Description: {full}"));
    }

    let usage_lines: Vec<String> = match &meta.usage {
        Usage::Override(declared) => declared.clone(),
        Usage::Generate => graph
            .root()
            .executable_paths()
            .iter()
            .map(|path| format!("/{}", path.join(" ")))
            .collect(),
    };
    match usage_lines.len() {
        0 => {}
        1 => lines.push(format!("Usage: {}", usage_lines[0])),
        _ => {
            lines.push("Usage:".to_string());
            lines.extend(usage_lines.iter().map(|line| format!("- {line}")));
        }
    }

    let other_names: Vec<String> = if topic_name == primary {
        meta.aliases.clone()
    } else {
        std::iter::once(primary.to_string())
            .chain(
                meta.aliases
                    .iter()
                    .filter(|alias| alias.as_str() != topic_name)
                    .cloned(),
            )
            .collect()
    };
    if !other_names.is_empty() {
        lines.push(format!("Aliases: {}", other_names.join(", ")));
    }

    GeneratedHelp {
        full_text: format!("{short_text}\n{}", lines.join("\n")),
        short_text,
    }
}

#[cfg(test)]
mod tests {
    use command_graph_core::{CommandDeclaration, StaticSender, literal};

    use super::*;

    #[test]
    fn test_short_text_fallback_chain() {
        let with_short = CommandDeclaration::<StaticSender>::new("a")
            .with_short_description("short")
            .with_full_description("full")
            .executes(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(generate_topic(&with_short, "a", "tests").short_text, "short");

        let full_only = CommandDeclaration::<StaticSender>::new("a")
            .with_full_description("full")
            .executes(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(generate_topic(&full_only, "a", "tests").short_text, "full");

        let bare = CommandDeclaration::<StaticSender>::new("a")
            .executes(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(
            generate_topic(&bare, "a", "tests").short_text,
            "A command provided by tests."
        );
    }

    #[test]
    fn test_owner_label_overrides_default() {
        let graph = CommandDeclaration::<StaticSender>::new("a")
            .with_owner("the worldgen module")
            .executes(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(
            generate_topic(&graph, "a", "tests").short_text,
            "A command provided by the worldgen module."
        );
    }

    #[test]
    fn test_description_line_only_when_declared() {
        let graph = CommandDeclaration::<StaticSender>::new("a")
            .with_help("short", "full")
            .executes(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(
            generate_topic(&graph, "a", "tests").full_text,
            "short\nDescription: full\nUsage: /a"
        );
    }

    #[test]
    fn test_non_executable_branch_absent_from_usage() {
        let graph = CommandDeclaration::<StaticSender>::new("tree")
            .then(
                literal("branch")
                    .then(literal("leaf").executes(|_, _| {})),
            )
            .build()
            .unwrap();
        assert_eq!(
            generate_topic(&graph, "tree", "tests").full_text,
            "A command provided by tests.\nUsage: /tree branch leaf"
        );
    }
}
