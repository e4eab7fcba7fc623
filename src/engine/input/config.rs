// Key binding configuration

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<KeyCode, Action>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

impl InputConfig {
    /// Create a configuration with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::empty();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InputConfig::default();
        assert_eq!(config.get_action(KeyCode::ArrowUp), Some(Action::MoveUp));
        assert_eq!(config.get_action(KeyCode::Space), Some(Action::Attack));
        assert_eq!(config.get_action(KeyCode::KeyW), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut config = InputConfig::default();
        config.bind(KeyCode::Space, Action::MoveUp);
        assert_eq!(config.get_action(KeyCode::Space), Some(Action::MoveUp));
    }

    #[test]
    fn test_multiple_keys_per_action() {
        let mut config = InputConfig::default();
        config.bind(KeyCode::KeyA, Action::MoveLeft);
        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::MoveLeft));
        assert_eq!(config.get_action(KeyCode::ArrowLeft), Some(Action::MoveLeft));
    }

    #[test]
    fn test_empty_config() {
        let config = InputConfig::empty();
        assert_eq!(config.get_action(KeyCode::Space), None);

        let config = InputConfig::from_bindings(vec![(KeyCode::KeyJ, Action::Attack)]);
        assert_eq!(config.get_action(KeyCode::KeyJ), Some(Action::Attack));
        assert_eq!(config.get_action(KeyCode::Space), None);
    }
}
