//! Caller-context abstraction for dispatch and requirement evaluation.
//!
//! The engine never inspects the host's caller type beyond the
//! [`CommandSender`] capability: a display name and a permission lookup.
//! Hosts implement the trait for their own session/user/console types;
//! [`StaticSender`] is a ready-made implementation for tests and simple
//! embeddings.

use std::collections::HashSet;

/// Capability trait for the caller context passed through dispatch.
///
/// Requirement predicates receive the concrete sender type directly, so this
/// trait only needs to cover what the engine itself evaluates: node-level
/// permission tags.
///
/// # Examples
///
/// ```
/// use command_graph_core::{CommandSender, StaticSender};
///
/// let sender = StaticSender::new("console").with_permission("admin");
/// assert_eq!(sender.name(), "console");
/// assert!(sender.has_permission("admin"));
/// assert!(!sender.has_permission("owner"));
/// ```
pub trait CommandSender {
    /// Display name of the caller.
    fn name(&self) -> &str;

    /// Returns `true` if the caller holds the given permission tag.
    fn has_permission(&self, permission: &str) -> bool;
}

/// Simple [`CommandSender`] backed by a fixed permission set.
///
/// Used by the test suites and the demo shell; hosts with richer permission
/// systems implement [`CommandSender`] on their own types instead.
///
/// # Examples
///
/// ```
/// use command_graph_core::{CommandSender, StaticSender};
///
/// let player = StaticSender::new("alex").with_permission("build");
/// assert!(player.has_permission("build"));
///
/// let op = StaticSender::new("op").with_all_permissions();
/// assert!(op.has_permission("anything.at.all"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSender {
    name: String,
    permissions: HashSet<String>,
    all_permissions: bool,
}

impl StaticSender {
    /// Creates a sender with the given name and no permissions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
            all_permissions: false,
        }
    }

    /// Grants a single permission tag.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Grants every permission tag.
    pub fn with_all_permissions(mut self) -> Self {
        self.all_permissions = true;
        self
    }
}

impl CommandSender for StaticSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.all_permissions || self.permissions.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_sender_permissions() {
        let sender = StaticSender::new("console").with_permission("admin");
        assert!(sender.has_permission("admin"));
        assert!(!sender.has_permission("other"));
    }

    #[test]
    fn test_all_permissions_overrides_set() {
        let sender = StaticSender::new("op").with_all_permissions();
        assert!(sender.has_permission("never.granted.explicitly"));
    }
}
