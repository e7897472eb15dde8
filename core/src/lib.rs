//! Node model, fluent builder, and merge engine for dispatchable command
//! graphs.
//!
//! This crate defines the foundational types for declaring command syntax
//! and compiling it into an immutable, mergeable tree:
//!
//! - [`CommandDeclaration`] — fluent declaration of a command: literals,
//!   typed arguments, branching subcommands, executors, access gates, and
//!   help metadata.
//! - [`GraphNode`] / [`CommandGraph`] — the compiled tree: ordered children,
//!   optional executor, optional requirement predicate and permission tag
//!   per node.
//! - [`merge_graphs`] — folds every registration under one root name into a
//!   single canonical tree, copy-on-update with structural sharing.
//! - [`ArgumentParser`] — the capability trait for pluggable argument
//!   types; [`ParsedValue`] / [`BoundArgs`] carry the values a dispatch
//!   walk binds.
//! - [`CommandSender`] — the caller-context capability (name + permission
//!   lookup), with [`StaticSender`] as a ready-made implementation.
//!
//! Walking the compiled graph against input, generating suggestions, and
//! synthesizing help text live in the companion `command-graph-dispatch`
//! and `command-graph-registry` crates.
//!
//! # Example
//!
//! ```
//! use command_graph_core::{CommandDeclaration, StaticSender, literal, multi_literal};
//!
//! let graph = CommandDeclaration::<StaticSender>::new("test")
//!     .then(
//!         multi_literal(["a", "b", "c"])
//!             .then(literal("d").executes(|_s: &StaticSender, _a| {})),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // The multi-literal expanded into three literal siblings sharing one
//! // subtree, each reaching the executable "d" node.
//! assert_eq!(graph.root().children().len(), 3);
//! assert_eq!(graph.root().executable_paths().len(), 3);
//! ```

mod builder;
mod merge;
mod sender;
mod tokens;
mod types;
mod validate;

pub use builder::{CommandDeclaration, NodeBuilder, argument, literal, multi_literal};
pub use merge::{merge_graphs, merge_metadata, merge_nodes};
pub use sender::{CommandSender, StaticSender};
pub use tokens::TokenCursor;
pub use types::{
    ArgumentError, ArgumentParser, BoundArgs, CommandGraph, Executor, GraphNode, HelpMetadata,
    HelpProvider, NodeKey, ParsedValue, Requirement, Usage,
};
pub use validate::ConstructionError;
