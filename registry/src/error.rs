//! Error types for registry operations.

use command_graph_core::ConstructionError;
use thiserror::Error;

/// Errors raised while registering a command.
///
/// Registration is all-or-nothing: on any error the registry is left
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The declaration itself was malformed.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The (merged) graph has no executable path, so nothing could ever
    /// dispatch through it.
    #[error("command '{0}' declares no executable path")]
    NotExecutable(String),
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
