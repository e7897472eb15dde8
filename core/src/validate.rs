//! Construction-time validation for command declarations.
//!
//! Malformed declarations are caller bugs and fail fast with a
//! [`ConstructionError`] when the tree is built, before anything reaches the
//! registry. A failed build is never partially applied.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Command, alias, and argument names: word characters, dots, and dashes.
/// Literal text is freer (any non-whitespace token) and checked separately.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("name pattern compiles"));

/// Errors raised while compiling a declaration into a node tree.
///
/// Each variant is fatal to the registration call that produced it; the
/// registry applies nothing when a build fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Command name is empty or not a valid name.
    #[error("invalid command name: '{0}'")]
    InvalidCommandName(String),

    /// Alias is empty or not a valid name.
    #[error("invalid alias: '{0}'")]
    InvalidAlias(String),

    /// Literal text is empty or contains whitespace.
    #[error("invalid literal text: '{0}'")]
    InvalidLiteral(String),

    /// Argument name is empty or not a valid name.
    #[error("invalid argument name: '{0}'")]
    InvalidArgumentName(String),

    /// Multi-literal declared without any alternatives.
    #[error("multi-literal must declare at least one alternative")]
    EmptyLiteralSet,

    /// The same alternative appears twice in one multi-literal.
    #[error("duplicate multi-literal alternative: '{0}'")]
    DuplicateLiteralAlternative(String),

    /// A suggestion override was placed on a literal node.
    #[error("suggestion override is only valid on argument nodes: '{0}'")]
    SuggestionsOnLiteral(String),

    /// A greedy argument (one that consumes all remaining input) was given
    /// children, which could never match.
    #[error("argument '{0}' consumes the remaining input and cannot have children")]
    ChildrenAfterGreedy(String),
}

pub(crate) fn validate_command_name(name: &str) -> Result<(), ConstructionError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConstructionError::InvalidCommandName(name.to_string()))
    }
}

pub(crate) fn validate_alias(alias: &str) -> Result<(), ConstructionError> {
    if NAME_PATTERN.is_match(alias) {
        Ok(())
    } else {
        Err(ConstructionError::InvalidAlias(alias.to_string()))
    }
}

pub(crate) fn validate_literal(text: &str) -> Result<(), ConstructionError> {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        Err(ConstructionError::InvalidLiteral(text.to_string()))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_argument_name(name: &str) -> Result<(), ConstructionError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConstructionError::InvalidArgumentName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_command_name("teleport").is_ok());
        assert!(validate_command_name("with-dash_and.dot").is_ok());
        assert!(validate_argument_name("arg1").is_ok());
        assert!(validate_alias("tp").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            validate_command_name(""),
            Err(ConstructionError::InvalidCommandName(String::new()))
        );
        assert!(validate_command_name("has space").is_err());
        assert!(validate_argument_name("arg!").is_err());
        assert!(validate_alias("a b").is_err());
    }

    #[test]
    fn test_literal_allows_symbols_but_not_whitespace() {
        assert!(validate_literal("=>").is_ok());
        assert!(validate_literal("d").is_ok());
        assert!(validate_literal("").is_err());
        assert!(validate_literal("two words").is_err());
    }
}
