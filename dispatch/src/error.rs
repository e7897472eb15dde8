//! Error model for dispatch walks.
//!
//! All variants are per-dispatch values, never process-fatal; the host
//! decides user-facing rendering. Note that [`DispatchError::NotPermitted`]
//! deliberately renders with the same text as
//! [`DispatchError::UnknownCommand`], so callers probing a gated branch
//! cannot distinguish it from a command that does not exist.

use thiserror::Error;

/// Why a dispatch walk did not produce an executable node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No command is registered under the given root name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A requirement predicate or permission tag failed along the winning
    /// path. Display text is identical to [`Self::UnknownCommand`] so the
    /// existence of restricted branches does not leak.
    #[error("Unknown command: {0}")]
    NotPermitted(String),

    /// Input ended at a node without an executor.
    #[error("incomplete command '{consumed}', expected one of: {}", expected.join(", "))]
    IncompleteCommand {
        /// The path matched so far, space-joined.
        consumed: String,
        /// Visible continuations at the stopping point.
        expected: Vec<String>,
    },

    /// A token matched no candidate at its position.
    #[error("unexpected token '{token}' at position {position}, expected one of: {}", expected.join(", "))]
    UnexpectedToken {
        /// The offending token.
        token: String,
        /// Zero-based token position after the command name.
        position: usize,
        /// Visible candidates at the position.
        expected: Vec<String>,
    },

    /// The only candidate at a position was a single argument slot and its
    /// parser rejected the input.
    #[error("invalid value '{token}' for <{name}> at position {position}: {message}")]
    InvalidArgument {
        /// Argument name of the rejecting slot.
        name: String,
        /// The offending token.
        token: String,
        /// Zero-based token position after the command name.
        position: usize,
        /// The parser's failure message.
        message: String,
    },
}
