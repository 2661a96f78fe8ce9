//! Keyboard Shortcuts
//!
//! Fixed key combinations as a UI-level trigger into command resolution.
//! A shortcut binds to a command id; firing it goes through the same
//! enablement gates as a spoken utterance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use atech_features::FeatureRegistry;

use crate::command::{Command, CommandId};
use crate::registry::CommandRegistry;
use crate::CommandError;

/// Keyboard shortcut
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyboardShortcut {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyboardShortcut {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Cmd");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

/// Shortcut-to-command bindings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutMap {
    bindings: HashMap<KeyboardShortcut, CommandId>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a shortcut to a command; rebinding replaces the old target
    pub fn bind(&mut self, shortcut: KeyboardShortcut, command: CommandId) {
        if let Some(previous) = self.bindings.insert(shortcut.clone(), command) {
            tracing::debug!(
                shortcut = %shortcut.display(),
                previous = %previous,
                command = %command,
                "shortcut rebound"
            );
        }
    }

    pub fn unbind(&mut self, shortcut: &KeyboardShortcut) -> Option<CommandId> {
        self.bindings.remove(shortcut)
    }

    pub fn command_for(&self, shortcut: &KeyboardShortcut) -> Option<CommandId> {
        self.bindings.get(shortcut).copied()
    }

    /// Resolve a pressed shortcut through the command registry's enablement
    /// gates
    pub fn resolve<'a>(
        &self,
        shortcut: &KeyboardShortcut,
        context: &str,
        commands: &'a CommandRegistry,
        features: &FeatureRegistry,
    ) -> Result<&'a Command, CommandError> {
        let id = self
            .command_for(shortcut)
            .ok_or(CommandError::NotFound)?;
        commands.resolve_id(id, context, features)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandAction, CommandSpec};
    use atech_features::{FeatureConfig, FeatureId, FeaturePatch};

    #[test]
    fn test_display() {
        let shortcut = KeyboardShortcut::new("m").ctrl().alt();
        assert_eq!(shortcut.display(), "Ctrl+Alt+m");
    }

    #[test]
    fn test_shortcut_honors_feature_enablement() {
        let mut features = FeatureRegistry::new();
        features
            .register(
                FeatureId::Magnifier,
                FeatureConfig::defaults(FeatureId::Magnifier).enabled(true),
            )
            .unwrap();

        let mut commands = CommandRegistry::new();
        let id = commands
            .register(
                CommandSpec::new(
                    FeatureId::Magnifier,
                    CommandAction::ToggleFeature(FeatureId::Magnifier),
                )
                .phrase("en", "toggle magnifier"),
            )
            .unwrap();

        let mut shortcuts = ShortcutMap::new();
        let combo = KeyboardShortcut::new("m").ctrl().alt();
        shortcuts.bind(combo.clone(), id);

        assert!(shortcuts
            .resolve(&combo, "global", &commands, &features)
            .is_ok());

        features
            .update_configuration(FeatureId::Magnifier, &FeaturePatch::new().enabled(false))
            .unwrap();
        assert!(matches!(
            shortcuts.resolve(&combo, "global", &commands, &features),
            Err(CommandError::NotFound)
        ));
    }
}
