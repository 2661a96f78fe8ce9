//! ATech Commands
//!
//! Command registry for the assistive technology hub: phrase-to-action
//! bindings with locale variants, context scoping, normalized matching, and
//! a keyboard-shortcut trigger surface.
//!
//! Enablement is two-level: a command resolves only when its own flag and its
//! owning feature's configuration are both enabled. Disabling a feature
//! silences its commands without deleting them.

pub mod command;
pub mod phrase;
pub mod registry;
pub mod shortcut;

pub use command::{
    Command, CommandAction, CommandId, CommandSpec, LocalizedPhrase, GLOBAL_CONTEXT,
};
pub use phrase::normalize;
pub use registry::CommandRegistry;
pub use shortcut::{KeyboardShortcut, ShortcutMap};

use atech_features::Locale;

/// Command registry error
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("duplicate phrase {phrase:?} for locale {locale}")]
    DuplicatePhrase { phrase: String, locale: Locale },

    #[error("command not recognized")]
    NotFound,

    #[error("command has no usable phrase")]
    EmptyPhrase,
}
