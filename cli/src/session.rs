//! YAML session configuration for the shell.
//!
//! Controls who the shell dispatches as: the sender name and the permission
//! tags it holds. Missing fields fall back to an unprivileged console
//! session.
//!
//! # Example YAML
//!
//! ```yaml
//! name: operator
//! permissions:
//!   - admin
//!   - world.edit
//! all_permissions: false
//! ```

use std::path::Path;

use command_graph_core::StaticSender;
use serde::{Deserialize, Serialize};

/// Who the shell acts as when dispatching commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sender name shown to executors and custom help providers.
    pub name: String,
    /// Permission tags granted to the session.
    pub permissions: Vec<String>,
    /// Grant every permission (overrides the explicit list).
    pub all_permissions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "console".to_string(),
            permissions: Vec::new(),
            all_permissions: false,
        }
    }
}

impl SessionConfig {
    /// Loads a session config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read '{}': {err}", path.display()))?;
        serde_yaml::from_str(&text)
            .map_err(|err| format!("invalid session config '{}': {err}", path.display()))
    }

    /// Builds the sender this session dispatches as.
    pub fn sender(&self) -> StaticSender {
        let mut sender = StaticSender::new(&self.name);
        if self.all_permissions {
            return sender.with_all_permissions();
        }
        for permission in &self.permissions {
            sender = sender.with_permission(permission);
        }
        sender
    }
}

#[cfg(test)]
mod tests {
    use command_graph_core::CommandSender;

    use super::*;

    #[test]
    fn test_defaults_are_unprivileged_console() {
        let config = SessionConfig::default();
        let sender = config.sender();
        assert_eq!(sender.name(), "console");
        assert!(!sender.has_permission("admin"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = "name: operator\npermissions:\n  - admin\n";
        let config: SessionConfig = serde_yaml::from_str(yaml).unwrap();
        let sender = config.sender();
        assert_eq!(sender.name(), "operator");
        assert!(sender.has_permission("admin"));
        assert!(!sender.has_permission("other"));
    }

    #[test]
    fn test_all_permissions_flag() {
        let yaml = "all_permissions: true\n";
        let config: SessionConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.sender().has_permission("anything"));
    }
}
