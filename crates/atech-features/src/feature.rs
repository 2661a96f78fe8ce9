//! Feature Identity
//!
//! Identifiers for the assistive capabilities and locale tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One assistive-technology capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureId {
    VoiceControl,
    SwitchNavigation,
    Magnifier,
    Captioning,
    AltText,
    Braille,
}

impl FeatureId {
    /// All known features, in registration order
    pub const ALL: [FeatureId; 6] = [
        Self::VoiceControl,
        Self::SwitchNavigation,
        Self::Magnifier,
        Self::Captioning,
        Self::AltText,
        Self::Braille,
    ];

    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VoiceControl => "voice-control",
            Self::SwitchNavigation => "switch-navigation",
            Self::Magnifier => "magnifier",
            Self::Captioning => "captioning",
            Self::AltText => "alt-text",
            Self::Braille => "braille",
        }
    }

    /// Parse the stable string form
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::VoiceControl => "Voice Control",
            Self::SwitchNavigation => "Switch Navigation",
            Self::Magnifier => "Magnifier",
            Self::Captioning => "Captioning",
            Self::AltText => "Alt Text",
            Self::Braille => "Braille",
        }
    }

    /// Capability tag exposed through the accessibility report
    pub fn capability(&self) -> &'static str {
        match self {
            Self::VoiceControl => "speech-input",
            Self::SwitchNavigation => "switch-input",
            Self::Magnifier => "screen-magnification",
            Self::Captioning => "live-captions",
            Self::AltText => "image-descriptions",
            Self::Braille => "braille-output",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language/region tag ("en", "pl-PL", "de-DE")
///
/// Stored lowercased so comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Language part of the tag ("pl-pl" → "pl")
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Whether a phrase registered under `self` applies to an utterance in
    /// `other`. Exact tags match, and a language-only tag matches any region
    /// of the same language.
    pub fn matches(&self, other: &Locale) -> bool {
        self.0 == other.0 || self.language() == other.language()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".into())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_name_round_trip() {
        for feature in FeatureId::ALL {
            assert_eq!(FeatureId::from_name(feature.as_str()), Some(feature));
        }
        assert_eq!(FeatureId::from_name("teleportation"), None);
    }

    #[test]
    fn test_locale_matching() {
        let pl = Locale::new("pl");
        let pl_pl = Locale::new("pl-PL");
        let en = Locale::new("en");

        assert!(pl.matches(&pl_pl));
        assert!(pl_pl.matches(&pl));
        assert!(!en.matches(&pl_pl));
        assert_eq!(pl_pl.as_str(), "pl-pl");
    }
}
