//! Command Registry
//!
//! Registration and resolution of utterance commands. Resolution is an exact
//! match over normalized phrases, filtered by locale, context, the command's
//! own enabled flag, and the owning feature's enablement.

use std::collections::BTreeSet;

use atech_features::{FeatureId, FeatureRegistry, Locale};

use crate::command::{Command, CommandId, CommandSpec, GLOBAL_CONTEXT};
use crate::phrase::normalize;
use crate::CommandError;

/// Registry of voice/shortcut commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandRegistry {
    /// Registration order preserved; newest-last for last-write-wins
    commands: Vec<Command>,
    next_id: u64,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A phrase colliding with an already *enabled*
    /// command in the same locale and an overlapping context is a
    /// configuration error and fails fast.
    pub fn register(&mut self, spec: CommandSpec) -> Result<CommandId, CommandError> {
        if spec.phrases.is_empty() || spec.phrases.iter().any(|p| p.text.is_empty()) {
            return Err(CommandError::EmptyPhrase);
        }

        let contexts: BTreeSet<String> = if spec.contexts.is_empty() {
            [GLOBAL_CONTEXT.to_string()].into_iter().collect()
        } else {
            spec.contexts
        };

        if spec.enabled {
            for phrase in &spec.phrases {
                for existing in self.commands.iter().filter(|c| c.enabled) {
                    let collision = existing.phrases.iter().any(|p| {
                        p.locale == phrase.locale && p.text == phrase.text
                    }) && contexts_overlap(&contexts, &existing.contexts);
                    if collision {
                        return Err(CommandError::DuplicatePhrase {
                            phrase: phrase.text.clone(),
                            locale: phrase.locale.clone(),
                        });
                    }
                }
            }
        }

        let id = CommandId(self.next_id);
        self.next_id += 1;

        tracing::debug!(
            command = %id,
            feature = %spec.feature,
            phrases = spec.phrases.len(),
            "command registered"
        );

        self.commands.push(Command {
            id,
            feature: spec.feature,
            phrases: spec.phrases,
            action: spec.action,
            contexts,
            enabled: spec.enabled,
        });
        Ok(id)
    }

    /// Resolve an utterance to a command.
    ///
    /// Ties after normalization go to the most recently registered command
    /// (last-write-wins); the ambiguity is logged as a warning.
    pub fn resolve(
        &self,
        utterance: &str,
        locale: &Locale,
        context: &str,
        features: &FeatureRegistry,
    ) -> Result<&Command, CommandError> {
        let phrase = normalize(utterance);
        if phrase.is_empty() {
            return Err(CommandError::NotFound);
        }

        let mut matches = self.commands.iter().rev().filter(|c| {
            c.enabled
                && features.is_enabled(c.feature)
                && c.applies_in(context)
                && c.matches_phrase(&phrase, locale)
        });

        let winner = matches.next().ok_or(CommandError::NotFound)?;
        if let Some(shadowed) = matches.next() {
            tracing::warn!(
                phrase = %phrase,
                winner = %winner.id,
                shadowed = %shadowed.id,
                "ambiguous phrase, most recent registration wins"
            );
        }
        Ok(winner)
    }

    /// Resolve a known command id through the same enablement gates as
    /// [`resolve`](Self::resolve). Used by the keyboard-shortcut surface.
    pub fn resolve_id(
        &self,
        id: CommandId,
        context: &str,
        features: &FeatureRegistry,
    ) -> Result<&Command, CommandError> {
        self.commands
            .iter()
            .find(|c| {
                c.id == id && c.enabled && features.is_enabled(c.feature) && c.applies_in(context)
            })
            .ok_or(CommandError::NotFound)
    }

    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Flip a command's own enabled flag. Registration data stays intact.
    pub fn set_enabled(&mut self, id: CommandId, enabled: bool) -> Result<(), CommandError> {
        let command = self
            .commands
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CommandError::NotFound)?;
        command.enabled = enabled;
        Ok(())
    }

    pub fn commands_for_feature(&self, feature: FeatureId) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| c.feature == feature)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Two context sets overlap when they intersect or either contains the
/// global context
fn contexts_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    a.contains(GLOBAL_CONTEXT) || b.contains(GLOBAL_CONTEXT) || a.intersection(b).next().is_some()
}
