//! Commands
//!
//! An utterance-to-action binding owned by a feature. Phrases are stored
//! normalized; contexts scope where a command may fire ("global", "booking",
//! "checkout", ...).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use atech_features::{FeatureId, Locale};

use crate::phrase::normalize;

/// Context every command belongs to unless narrowed
pub const GLOBAL_CONTEXT: &str = "global";

/// Registry-allocated command identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd#{}", self.0)
    }
}

/// What a matched utterance triggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandAction {
    /// Navigate to a named page or section
    Navigate(String),
    /// Activate a named control
    Activate(String),
    /// Toggle an assistive feature on or off
    ToggleFeature(FeatureId),
    /// Speak or display a message
    Announce(String),
    /// Embedder-defined action
    Custom(String),
}

/// A phrase bound to one locale, stored normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedPhrase {
    pub locale: Locale,
    pub text: String,
}

/// A registered command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    pub feature: FeatureId,
    pub phrases: Vec<LocalizedPhrase>,
    pub action: CommandAction,
    pub contexts: BTreeSet<String>,
    pub enabled: bool,
}

impl Command {
    /// Whether this command carries `phrase` (already normalized) for an
    /// utterance in `locale`
    pub fn matches_phrase(&self, phrase: &str, locale: &Locale) -> bool {
        self.phrases
            .iter()
            .any(|p| p.locale.matches(locale) && p.text == phrase)
    }

    pub fn applies_in(&self, context: &str) -> bool {
        self.contexts.contains(context) || self.contexts.contains(GLOBAL_CONTEXT)
    }
}

/// Builder-style description of a command to register
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub feature: FeatureId,
    pub action: CommandAction,
    pub phrases: Vec<LocalizedPhrase>,
    pub contexts: BTreeSet<String>,
    pub enabled: bool,
}

impl CommandSpec {
    pub fn new(feature: FeatureId, action: CommandAction) -> Self {
        Self {
            feature,
            action,
            phrases: Vec::new(),
            contexts: BTreeSet::new(),
            enabled: true,
        }
    }

    /// Add a phrase under a locale; normalized on the way in
    pub fn phrase(mut self, locale: impl Into<Locale>, text: &str) -> Self {
        self.phrases.push(LocalizedPhrase {
            locale: locale.into(),
            text: normalize(text),
        });
        self
    }

    /// Narrow the command to a context. Without any call the command is
    /// registered under the global context.
    pub fn context(mut self, context: &str) -> Self {
        self.contexts.insert(context.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
