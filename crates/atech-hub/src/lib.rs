//! ATech Hub
//!
//! Coordinating owner of the assistive feature and command registries.
//!
//! Features:
//! - Explicit lifecycle: `Uninitialized → Initialized → TornDown`, idempotent init
//! - Utterance and keyboard-shortcut dispatch through shared enablement gates
//! - Aggregate accessibility report (score, active features, capabilities)
//! - Cancellable recognition sessions over a channel (voice, captioning)
//! - Alt-text generation with provider fallback
//! - Addresses for the external monitoring stack

pub mod alt_text;
pub mod config;
pub mod hub;
pub mod recognition;
pub mod report;
pub mod telemetry;

pub use alt_text::{
    AltText, AltTextProvider, AltTextSource, ImageRef, ProviderError, StaticDescriptions,
    DEFAULT_DESCRIPTION,
};
pub use config::{HubConfig, MonitoringConfig, MonitoringService};
pub use hub::{DispatchOutcome, Hub, HubState};
pub use recognition::{
    CancellationToken, RecognitionChunk, RecognitionEvent, RecognitionSession, ScriptedRecognizer,
    SpeechRecognizer,
};
pub use report::AccessibilityReport;

pub use atech_commands::{
    Command, CommandAction, CommandId, CommandRegistry, CommandSpec, KeyboardShortcut,
    ShortcutMap, GLOBAL_CONTEXT,
};
pub use atech_features::{
    AiProvider, BrailleGrade, CaptionQuality, FeatureConfig, FeatureId, FeatureOptions,
    FeaturePatch, FeatureRegistry, Locale, OptionsPatch,
};

use atech_commands::CommandError;
use atech_features::FeatureError;

/// Hub error
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("hub has been torn down; create a new instance")]
    TornDown,

    #[error("hub not initialized")]
    NotInitialized,

    #[error("feature disabled: {0}")]
    FeatureDisabled(FeatureId),

    #[error("feature does not support recognition sessions: {0}")]
    UnsupportedFeature(FeatureId),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
