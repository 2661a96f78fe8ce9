//! Hub - Coordinating owner of all registries
//!
//! Explicitly constructed and passed by reference; there is no process-wide
//! singleton. Lifecycle is `Uninitialized → Initialized → TornDown`, with an
//! idempotent `Initialized → Initialized` self-loop. A torn-down hub cannot
//! be revived; construct a new one.

use atech_commands::{
    CommandAction, CommandError, CommandId, CommandRegistry, CommandSpec, KeyboardShortcut,
    ShortcutMap,
};
use atech_features::{
    FeatureConfig, FeatureId, FeatureOptions, FeaturePatch, FeatureRegistry, Locale,
};

use crate::alt_text::{AltText, AltTextProvider, AltTextSource, ImageRef, ProviderError};
use crate::config::HubConfig;
use crate::recognition::{spawn_session, CancellationToken, RecognitionSession, SpeechRecognizer};
use crate::report::AccessibilityReport;
use crate::HubError;

/// Hub lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubState {
    Uninitialized,
    Initialized,
    TornDown,
}

/// Outcome of dispatching an utterance or shortcut
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Matched {
        command: CommandId,
        action: CommandAction,
    },
    /// Non-fatal miss; a no-op apart from the optional user-facing notice
    NotRecognized,
}

impl DispatchOutcome {
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::NotRecognized => Some("Command not recognized"),
            Self::Matched { .. } => None,
        }
    }
}

struct SessionHandle {
    token: CancellationToken,
    task: smol::Task<()>,
}

/// The assistive technology hub
pub struct Hub {
    config: HubConfig,
    state: HubState,
    features: FeatureRegistry,
    commands: CommandRegistry,
    shortcuts: ShortcutMap,
    sessions: Vec<SessionHandle>,
}

impl Hub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            config,
            state: HubState::Uninitialized,
            features: FeatureRegistry::new(),
            commands: CommandRegistry::new(),
            shortcuts: ShortcutMap::new(),
            sessions: Vec::new(),
        }
    }

    pub fn state(&self) -> HubState {
        self.state
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureRegistry {
        &mut self.features
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMap {
        &mut self.shortcuts
    }

    /// Bring the hub up. Idempotent: a second call is a no-op and leaves
    /// both registries exactly as a single call would.
    pub fn initialize(&mut self) -> Result<(), HubError> {
        match self.state {
            HubState::TornDown => return Err(HubError::TornDown),
            HubState::Initialized => return Ok(()),
            HubState::Uninitialized => {}
        }

        if self.config.register_default_features {
            for feature in FeatureId::ALL {
                self.features
                    .register(feature, FeatureConfig::defaults(feature))?;
            }
        }
        if self.config.register_builtin_commands {
            self.register_builtins()?;
        }

        self.state = HubState::Initialized;
        tracing::info!(
            features = self.features.len(),
            commands = self.commands.len(),
            "hub initialized"
        );
        Ok(())
    }

    /// Release everything. Live recognition sessions are cancelled
    /// cooperatively and drained before the registries are cleared. A second
    /// call is a no-op.
    pub fn teardown(&mut self) -> Result<(), HubError> {
        if self.state == HubState::TornDown {
            return Ok(());
        }

        for handle in self.sessions.drain(..) {
            handle.token.cancel();
            smol::block_on(handle.task);
        }
        self.commands.clear();
        self.shortcuts.clear();
        self.features.clear();
        self.state = HubState::TornDown;
        tracing::info!("hub torn down");
        Ok(())
    }

    /// Resolve and act on an utterance. A resolution miss is non-fatal and
    /// reported as [`DispatchOutcome::NotRecognized`].
    pub fn dispatch(
        &mut self,
        utterance: &str,
        locale: Option<&Locale>,
        context: &str,
    ) -> Result<DispatchOutcome, HubError> {
        self.ensure_initialized()?;
        let locale = locale
            .cloned()
            .unwrap_or_else(|| self.config.default_locale.clone());

        let resolved = self
            .commands
            .resolve(utterance, &locale, context, &self.features)
            .map(|c| (c.id, c.action.clone()));
        self.finish_dispatch(resolved, utterance, context)
    }

    /// Resolve and act on a pressed keyboard shortcut. Same path and gates
    /// as [`dispatch`](Self::dispatch).
    pub fn dispatch_shortcut(
        &mut self,
        shortcut: &KeyboardShortcut,
        context: &str,
    ) -> Result<DispatchOutcome, HubError> {
        self.ensure_initialized()?;
        let resolved = self
            .shortcuts
            .resolve(shortcut, context, &self.commands, &self.features)
            .map(|c| (c.id, c.action.clone()));
        self.finish_dispatch(resolved, &shortcut.display(), context)
    }

    /// Aggregate accessibility snapshot, computed on demand
    pub fn accessibility_report(&self) -> AccessibilityReport {
        AccessibilityReport::from_registry(&self.features)
    }

    /// Start a cancellable recognition session for a recognition-capable
    /// feature (voice control or captioning). Returns immediately; results
    /// arrive on the session's event channel.
    pub fn start_recognition<R: SpeechRecognizer>(
        &mut self,
        feature: FeatureId,
        recognizer: R,
    ) -> Result<RecognitionSession, HubError> {
        self.ensure_initialized()?;
        if !matches!(feature, FeatureId::VoiceControl | FeatureId::Captioning) {
            return Err(HubError::UnsupportedFeature(feature));
        }
        if !self.features.is_enabled(feature) {
            return Err(HubError::FeatureDisabled(feature));
        }

        let threshold = match self.features.config(feature).map(|c| &c.options) {
            Some(FeatureOptions::VoiceControl {
                confidence_threshold,
                ..
            }) => *confidence_threshold,
            _ => 0.0,
        };

        self.sessions.retain(|h| !h.task.is_finished());

        let token = CancellationToken::new();
        let (session, task) = spawn_session(feature, recognizer, threshold, token.clone());
        self.sessions.push(SessionHandle { token, task });
        tracing::debug!(feature = %feature, threshold, "recognition session started");
        Ok(session)
    }

    /// Describe an image through the configured provider seam. A provider
    /// outage falls back to the manual/default description instead of
    /// failing the caller.
    pub fn generate_alt_text(
        &self,
        provider: &dyn AltTextProvider,
        image: &ImageRef,
    ) -> Result<AltText, HubError> {
        self.ensure_initialized()?;
        if !self.features.is_enabled(FeatureId::AltText) {
            tracing::debug!(url = %image.url, "alt-text feature disabled, using fallback");
            return Ok(AltText::fallback(image));
        }

        let max_len = match self.features.config(FeatureId::AltText).map(|c| &c.options) {
            Some(FeatureOptions::AltText {
                max_description_len,
                ..
            }) => *max_description_len,
            _ => usize::MAX,
        };

        match provider.describe(image) {
            Ok(text) => Ok(AltText {
                text: truncate_chars(text, max_len),
                source: AltTextSource::Generated,
            }),
            Err(ProviderError::Unavailable(reason)) => {
                tracing::warn!(
                    url = %image.url,
                    %reason,
                    "alt-text provider unavailable, using fallback"
                );
                Ok(AltText::fallback(image))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn ensure_initialized(&self) -> Result<(), HubError> {
        match self.state {
            HubState::Initialized => Ok(()),
            HubState::Uninitialized => Err(HubError::NotInitialized),
            HubState::TornDown => Err(HubError::TornDown),
        }
    }

    fn finish_dispatch(
        &mut self,
        resolved: Result<(CommandId, CommandAction), CommandError>,
        input: &str,
        context: &str,
    ) -> Result<DispatchOutcome, HubError> {
        match resolved {
            Ok((command, action)) => {
                self.apply_action(&action);
                Ok(DispatchOutcome::Matched { command, action })
            }
            Err(CommandError::NotFound) => {
                tracing::info!(input, context, "command not recognized");
                Ok(DispatchOutcome::NotRecognized)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Actions the hub handles itself; everything else is returned to the
    /// embedder untouched
    fn apply_action(&mut self, action: &CommandAction) {
        if let CommandAction::ToggleFeature(feature) = action {
            let enabled = self.features.is_enabled(*feature);
            if let Err(err) = self
                .features
                .update_configuration(*feature, &FeaturePatch::new().enabled(!enabled))
            {
                // Unknown feature is a no-op, not a dispatch failure
                tracing::warn!(feature = %feature, error = %err, "feature toggle skipped");
            }
        }
    }

    fn register_builtins(&mut self) -> Result<(), HubError> {
        let voice = FeatureId::VoiceControl;

        let stop_listening = self.commands.register(
            CommandSpec::new(voice, CommandAction::ToggleFeature(voice))
                .phrase("en", "stop listening")
                .phrase("pl", "przestań słuchać"),
        )?;
        let toggle_magnifier = self.commands.register(
            CommandSpec::new(voice, CommandAction::ToggleFeature(FeatureId::Magnifier))
                .phrase("en", "toggle magnifier")
                .phrase("pl", "przełącz lupę"),
        )?;
        let toggle_captions = self.commands.register(
            CommandSpec::new(voice, CommandAction::ToggleFeature(FeatureId::Captioning))
                .phrase("en", "toggle captions")
                .phrase("pl", "przełącz napisy"),
        )?;
        self.commands.register(
            CommandSpec::new(voice, CommandAction::Navigate("home".into()))
                .phrase("en", "go home")
                .phrase("pl", "strona główna"),
        )?;
        self.commands.register(
            CommandSpec::new(voice, CommandAction::Announce("Say a command, for example: go home".into()))
                .phrase("en", "show help")
                .phrase("pl", "pomoc"),
        )?;

        // Shortcuts mirror the spoken toggles and go through the same
        // enablement gates
        self.shortcuts
            .bind(KeyboardShortcut::new("v").ctrl().alt(), stop_listening);
        self.shortcuts
            .bind(KeyboardShortcut::new("m").ctrl().alt(), toggle_magnifier);
        self.shortcuts
            .bind(KeyboardShortcut::new("c").ctrl().alt(), toggle_captions);
        Ok(())
    }
}

fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        text
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized_hub() -> Hub {
        let mut hub = Hub::new(HubConfig::default());
        hub.initialize().unwrap();
        hub
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut hub = initialized_hub();
        let features = hub.features().clone();
        let commands = hub.commands().clone();
        let shortcuts = hub.shortcuts().clone();

        hub.initialize().unwrap();
        assert_eq!(hub.state(), HubState::Initialized);
        assert_eq!(hub.features(), &features);
        assert_eq!(hub.commands(), &commands);
        assert_eq!(hub.shortcuts(), &shortcuts);
    }

    #[test]
    fn test_no_revival_after_teardown() {
        let mut hub = initialized_hub();
        hub.teardown().unwrap();
        assert_eq!(hub.state(), HubState::TornDown);
        assert!(hub.features().is_empty());
        assert!(hub.commands().is_empty());

        assert!(matches!(hub.initialize(), Err(HubError::TornDown)));
        // Second teardown is a no-op
        hub.teardown().unwrap();
    }

    #[test]
    fn test_dispatch_requires_initialization() {
        let mut hub = Hub::new(HubConfig::default());
        assert!(matches!(
            hub.dispatch("go home", None, "global"),
            Err(HubError::NotInitialized)
        ));
    }

    #[test]
    fn test_dispatch_not_recognized_is_non_fatal() {
        let mut hub = initialized_hub();
        let outcome = hub.dispatch("make me a sandwich", None, "global").unwrap();
        assert_eq!(outcome, DispatchOutcome::NotRecognized);
        assert_eq!(outcome.notice(), Some("Command not recognized"));
    }

    #[test]
    fn test_toggle_feature_action_applies() {
        let mut hub = initialized_hub();
        hub.features_mut()
            .update_configuration(FeatureId::VoiceControl, &FeaturePatch::new().enabled(true))
            .unwrap();
        assert!(!hub.features().is_enabled(FeatureId::Magnifier));

        let outcome = hub.dispatch("Toggle Magnifier", None, "global").unwrap();
        assert!(matches!(outcome, DispatchOutcome::Matched { .. }));
        assert!(hub.features().is_enabled(FeatureId::Magnifier));

        hub.dispatch("toggle magnifier", None, "global").unwrap();
        assert!(!hub.features().is_enabled(FeatureId::Magnifier));
    }

    #[test]
    fn test_shortcut_dispatch_shares_gates() {
        let mut hub = initialized_hub();
        let combo = KeyboardShortcut::new("m").ctrl().alt();

        // Voice control disabled: the mirrored shortcut is gated too
        let outcome = hub.dispatch_shortcut(&combo, "global").unwrap();
        assert_eq!(outcome, DispatchOutcome::NotRecognized);

        hub.features_mut()
            .update_configuration(FeatureId::VoiceControl, &FeaturePatch::new().enabled(true))
            .unwrap();
        let outcome = hub.dispatch_shortcut(&combo, "global").unwrap();
        assert!(matches!(outcome, DispatchOutcome::Matched { .. }));
        assert!(hub.features().is_enabled(FeatureId::Magnifier));
    }

    #[test]
    fn test_recognition_requires_enabled_feature() {
        use crate::recognition::ScriptedRecognizer;

        let mut hub = initialized_hub();
        assert!(matches!(
            hub.start_recognition(FeatureId::VoiceControl, ScriptedRecognizer::default()),
            Err(HubError::FeatureDisabled(FeatureId::VoiceControl))
        ));
        assert!(matches!(
            hub.start_recognition(FeatureId::Braille, ScriptedRecognizer::default()),
            Err(HubError::UnsupportedFeature(FeatureId::Braille))
        ));
    }

    #[test]
    fn test_alt_text_disabled_feature_falls_back() {
        let hub = initialized_hub();
        let image = ImageRef::new(url::Url::parse("https://cdn.example.com/a.jpg").unwrap())
            .with_fallback("Salon entrance");

        let alt = hub
            .generate_alt_text(&crate::alt_text::StaticDescriptions::new(), &image)
            .unwrap();
        assert_eq!(alt.source, AltTextSource::Fallback);
        assert_eq!(alt.text, "Salon entrance");
    }
}
