//! Command registry with alias sharing, dispatch, and help synthesis.
//!
//! This crate owns the canonical graph per root name and exposes the
//! operations a host wires its command pipeline to:
//!
//! - [`CommandRegistry::register`] / [`CommandRegistry::unregister`] —
//!   fold declarations into canonical graphs (copy-on-update, aliases
//!   share one graph by reference) and tear them down wholesale.
//! - [`CommandRegistry::resolve`] / [`CommandRegistry::execute`] — parse
//!   tokenized input to a bound executable node, or run it directly.
//! - [`CommandRegistry::suggest`] — tab-completion candidates filtered by
//!   the caller's access.
//! - [`CommandRegistry::help_topic`] — per-name help text, generated from
//!   graph shape and metadata ([`GeneratedHelp`]) or supplied by a custom
//!   provider ([`HelpTopic::Custom`]).
//!
//! # Example
//!
//! ```
//! use command_graph_core::{CommandDeclaration, StaticSender, argument, literal};
//! use command_graph_dispatch::IntegerParser;
//! use command_graph_registry::CommandRegistry;
//!
//! let mut registry = CommandRegistry::new();
//! registry
//!     .register(
//!         CommandDeclaration::new("warp")
//!             .with_short_description("Teleport between waypoints")
//!             .with_aliases(["w"])
//!             .then(
//!                 literal("to").then(
//!                     argument("slot", IntegerParser::bounded(1, 9))
//!                         .executes(|_s: &StaticSender, args| {
//!                             let _slot = args.get_integer("slot");
//!                         }),
//!                 ),
//!             ),
//!     )
//!     .unwrap();
//!
//! let sender = StaticSender::new("console");
//! // The alias reaches the same graph.
//! assert!(registry.execute_line("/w to 3", &sender).is_ok());
//! assert_eq!(registry.suggest("warp", &["t".into()], &sender), vec!["to"]);
//! ```

mod error;
mod help;
mod registry;

pub use error::{RegistryError, Result};
pub use help::{GeneratedHelp, HelpTopic, generate_topic};
pub use registry::{CommandRegistry, RegistryConfig};
