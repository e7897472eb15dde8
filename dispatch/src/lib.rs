//! Dispatch resolver, suggestion engine, and built-in argument parsers for
//! command graphs.
//!
//! This crate walks the immutable graphs compiled by `command-graph-core`:
//!
//! - [`resolve`] — parse mode: match tokenized input to an executable node,
//!   binding typed argument values along the way, and return a
//!   [`BoundExecution`] for the host to invoke.
//! - [`suggest`] — suggest mode: the same walk, collecting tab-completion
//!   candidates at the cursor position from every branch the caller is
//!   allowed to see.
//! - Built-in parsers ([`BoolParser`], [`IntegerParser`], [`FloatParser`],
//!   [`WordParser`], [`GreedyStringParser`]) covering the common argument
//!   types; hosts add their own by implementing
//!   [`ArgumentParser`](command_graph_core::ArgumentParser).
//! - [`tokenize`] — a convenience tokenizer with double-quote grouping.
//!
//! Both walks are read-only over a graph snapshot and evaluate each node's
//! requirement predicate and permission tag against the caller; branches
//! the caller may not see behave exactly as if they were never declared.
//!
//! # Example
//!
//! ```
//! use command_graph_core::{CommandDeclaration, StaticSender, argument, literal};
//! use command_graph_dispatch::{IntegerParser, resolve, suggest, tokenize};
//!
//! let graph = CommandDeclaration::<StaticSender>::new("fill")
//!     .then(
//!         literal("up")
//!             .then(argument("amount", IntegerParser::at_least(1)).executes(
//!                 |_s: &StaticSender, args| {
//!                     let _amount = args.get_integer("amount");
//!                 },
//!             )),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let sender = StaticSender::new("console");
//! let bound = resolve(&graph, &tokenize("up 5"), &sender).unwrap();
//! assert_eq!(bound.args().get_integer("amount"), Some(5));
//!
//! assert_eq!(suggest(&graph, &tokenize("u"), &sender), vec!["up"]);
//! ```

mod error;
mod parsers;
mod resolver;
mod suggest;
mod tokenize;

pub use error::DispatchError;
pub use parsers::{BoolParser, FloatParser, GreedyStringParser, IntegerParser, WordParser};
pub use resolver::{BoundExecution, resolve};
pub use suggest::suggest;
pub use tokenize::tokenize;
