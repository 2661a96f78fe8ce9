//! Feature Configuration
//!
//! Typed per-feature options with documented defaults, partial updates, and
//! merge-time validation. Every recognized option is enumerated here; there
//! are no open-ended key/value bags.

use serde::{Deserialize, Serialize};

use crate::feature::{FeatureId, Locale};
use crate::FeatureError;

/// AI content-description provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiProvider {
    OpenAi,
    Azure,
    Google,
    /// No external provider; descriptions are authored by hand
    #[default]
    Manual,
}

/// Caption rendering quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionQuality {
    Low,
    #[default]
    Standard,
    High,
}

/// Braille translation grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrailleGrade {
    /// Uncontracted, letter-for-letter
    #[default]
    Grade1,
    /// Contracted
    Grade2,
}

/// Per-feature typed options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureOptions {
    VoiceControl {
        /// Minimum recognition confidence, 0.0–1.0
        confidence_threshold: f64,
        /// Keep listening after each final result
        continuous: bool,
    },
    SwitchNavigation {
        scan_interval_ms: u32,
        auto_scan: bool,
    },
    Magnifier {
        /// Magnification factor, >= 1.0
        zoom_level: f64,
        follow_focus: bool,
    },
    Captioning {
        quality: CaptionQuality,
        show_speaker_labels: bool,
    },
    AltText {
        provider: AiProvider,
        max_description_len: usize,
    },
    Braille {
        cells_per_line: u32,
        grade: BrailleGrade,
    },
}

impl FeatureOptions {
    /// Documented defaults for a feature
    pub fn defaults_for(feature: FeatureId) -> Self {
        match feature {
            FeatureId::VoiceControl => Self::VoiceControl {
                confidence_threshold: 0.7,
                continuous: true,
            },
            FeatureId::SwitchNavigation => Self::SwitchNavigation {
                scan_interval_ms: 1000,
                auto_scan: true,
            },
            FeatureId::Magnifier => Self::Magnifier {
                zoom_level: 2.0,
                follow_focus: true,
            },
            FeatureId::Captioning => Self::Captioning {
                quality: CaptionQuality::Standard,
                show_speaker_labels: false,
            },
            FeatureId::AltText => Self::AltText {
                provider: AiProvider::Manual,
                max_description_len: 250,
            },
            FeatureId::Braille => Self::Braille {
                cells_per_line: 40,
                grade: BrailleGrade::Grade1,
            },
        }
    }

    /// Which feature these options belong to
    pub fn feature(&self) -> FeatureId {
        match self {
            Self::VoiceControl { .. } => FeatureId::VoiceControl,
            Self::SwitchNavigation { .. } => FeatureId::SwitchNavigation,
            Self::Magnifier { .. } => FeatureId::Magnifier,
            Self::Captioning { .. } => FeatureId::Captioning,
            Self::AltText { .. } => FeatureId::AltText,
            Self::Braille { .. } => FeatureId::Braille,
        }
    }

    /// Range checks for numeric options
    pub fn validate(&self) -> Result<(), FeatureError> {
        let invalid = |reason: String| FeatureError::InvalidOption {
            feature: self.feature(),
            reason,
        };

        match self {
            Self::VoiceControl {
                confidence_threshold,
                ..
            } => {
                if !(0.0..=1.0).contains(confidence_threshold) {
                    return Err(invalid(format!(
                        "confidence_threshold {confidence_threshold} outside 0.0..=1.0"
                    )));
                }
            }
            Self::SwitchNavigation {
                scan_interval_ms, ..
            } => {
                if *scan_interval_ms == 0 {
                    return Err(invalid("scan_interval_ms must be > 0".into()));
                }
            }
            Self::Magnifier { zoom_level, .. } => {
                // NaN fails the range check too
                if !(1.0..).contains(zoom_level) {
                    return Err(invalid(format!("zoom_level {zoom_level} below 1.0")));
                }
            }
            Self::AltText {
                max_description_len,
                ..
            } => {
                if *max_description_len == 0 {
                    return Err(invalid("max_description_len must be > 0".into()));
                }
            }
            Self::Braille { cells_per_line, .. } => {
                if *cells_per_line == 0 {
                    return Err(invalid("cells_per_line must be > 0".into()));
                }
            }
            Self::Captioning { .. } => {}
        }
        Ok(())
    }
}

/// Configuration for one registered feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub enabled: bool,
    pub locale: Locale,
    /// Shared display flag honored by all visual features
    pub high_contrast: bool,
    pub options: FeatureOptions,
}

impl FeatureConfig {
    /// Default configuration for a feature: disabled, "en", default options
    pub fn defaults(feature: FeatureId) -> Self {
        Self {
            enabled: false,
            locale: Locale::default(),
            high_contrast: false,
            options: FeatureOptions::defaults_for(feature),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn feature(&self) -> FeatureId {
        self.options.feature()
    }

    /// Apply a patch, validating before anything is committed. On error the
    /// original configuration is untouched.
    pub fn merged(&self, patch: &FeaturePatch) -> Result<Self, FeatureError> {
        let mut next = self.clone();
        if let Some(enabled) = patch.enabled {
            next.enabled = enabled;
        }
        if let Some(locale) = &patch.locale {
            next.locale = locale.clone();
        }
        if let Some(high_contrast) = patch.high_contrast {
            next.high_contrast = high_contrast;
        }
        if let Some(options) = &patch.options {
            if options.feature() != self.feature() {
                return Err(FeatureError::InvalidOption {
                    feature: self.feature(),
                    reason: format!("options patch targets {}", options.feature()),
                });
            }
            options.apply(&mut next.options);
        }
        next.options.validate()?;
        Ok(next)
    }
}

/// Partial configuration update; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturePatch {
    pub enabled: Option<bool>,
    pub locale: Option<Locale>,
    pub high_contrast: Option<bool>,
    pub options: Option<OptionsPatch>,
}

impl FeaturePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn high_contrast(mut self, on: bool) -> Self {
        self.high_contrast = Some(on);
        self
    }

    pub fn options(mut self, options: OptionsPatch) -> Self {
        self.options = Some(options);
        self
    }
}

/// Partial per-feature options, mirroring [`FeatureOptions`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsPatch {
    VoiceControl {
        confidence_threshold: Option<f64>,
        continuous: Option<bool>,
    },
    SwitchNavigation {
        scan_interval_ms: Option<u32>,
        auto_scan: Option<bool>,
    },
    Magnifier {
        zoom_level: Option<f64>,
        follow_focus: Option<bool>,
    },
    Captioning {
        quality: Option<CaptionQuality>,
        show_speaker_labels: Option<bool>,
    },
    AltText {
        provider: Option<AiProvider>,
        max_description_len: Option<usize>,
    },
    Braille {
        cells_per_line: Option<u32>,
        grade: Option<BrailleGrade>,
    },
}

impl OptionsPatch {
    pub fn feature(&self) -> FeatureId {
        match self {
            Self::VoiceControl { .. } => FeatureId::VoiceControl,
            Self::SwitchNavigation { .. } => FeatureId::SwitchNavigation,
            Self::Magnifier { .. } => FeatureId::Magnifier,
            Self::Captioning { .. } => FeatureId::Captioning,
            Self::AltText { .. } => FeatureId::AltText,
            Self::Braille { .. } => FeatureId::Braille,
        }
    }

    /// Copy set fields onto `target`. Caller has already checked the variants
    /// line up; mismatches leave `target` untouched.
    fn apply(&self, target: &mut FeatureOptions) {
        match (self, target) {
            (
                Self::VoiceControl {
                    confidence_threshold,
                    continuous,
                },
                FeatureOptions::VoiceControl {
                    confidence_threshold: t_threshold,
                    continuous: t_continuous,
                },
            ) => {
                if let Some(v) = confidence_threshold {
                    *t_threshold = *v;
                }
                if let Some(v) = continuous {
                    *t_continuous = *v;
                }
            }
            (
                Self::SwitchNavigation {
                    scan_interval_ms,
                    auto_scan,
                },
                FeatureOptions::SwitchNavigation {
                    scan_interval_ms: t_interval,
                    auto_scan: t_auto,
                },
            ) => {
                if let Some(v) = scan_interval_ms {
                    *t_interval = *v;
                }
                if let Some(v) = auto_scan {
                    *t_auto = *v;
                }
            }
            (
                Self::Magnifier {
                    zoom_level,
                    follow_focus,
                },
                FeatureOptions::Magnifier {
                    zoom_level: t_zoom,
                    follow_focus: t_follow,
                },
            ) => {
                if let Some(v) = zoom_level {
                    *t_zoom = *v;
                }
                if let Some(v) = follow_focus {
                    *t_follow = *v;
                }
            }
            (
                Self::Captioning {
                    quality,
                    show_speaker_labels,
                },
                FeatureOptions::Captioning {
                    quality: t_quality,
                    show_speaker_labels: t_labels,
                },
            ) => {
                if let Some(v) = quality {
                    *t_quality = *v;
                }
                if let Some(v) = show_speaker_labels {
                    *t_labels = *v;
                }
            }
            (
                Self::AltText {
                    provider,
                    max_description_len,
                },
                FeatureOptions::AltText {
                    provider: t_provider,
                    max_description_len: t_len,
                },
            ) => {
                if let Some(v) = provider {
                    *t_provider = *v;
                }
                if let Some(v) = max_description_len {
                    *t_len = *v;
                }
            }
            (
                Self::Braille {
                    cells_per_line,
                    grade,
                },
                FeatureOptions::Braille {
                    cells_per_line: t_cells,
                    grade: t_grade,
                },
            ) => {
                if let Some(v) = cells_per_line {
                    *t_cells = *v;
                }
                if let Some(v) = grade {
                    *t_grade = *v;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        for feature in FeatureId::ALL {
            assert!(FeatureOptions::defaults_for(feature).validate().is_ok());
        }
    }

    #[test]
    fn test_merge_round_trip() {
        let config = FeatureConfig::defaults(FeatureId::Magnifier);
        let patch = FeaturePatch::new().options(OptionsPatch::Magnifier {
            zoom_level: Some(3.5),
            follow_focus: None,
        });

        let merged = config.merged(&patch).unwrap();
        assert_eq!(
            merged.options,
            FeatureOptions::Magnifier {
                zoom_level: 3.5,
                follow_focus: true, // unchanged default
            }
        );
        assert!(!merged.enabled);
        assert_eq!(merged.locale, config.locale);
    }

    #[test]
    fn test_merge_rejects_out_of_range() {
        let config = FeatureConfig::defaults(FeatureId::VoiceControl);
        let patch = FeaturePatch::new().options(OptionsPatch::VoiceControl {
            confidence_threshold: Some(1.5),
            continuous: None,
        });

        assert!(config.merged(&patch).is_err());
    }

    #[test]
    fn test_merge_rejects_mismatched_variant() {
        let config = FeatureConfig::defaults(FeatureId::Braille);
        let patch = FeaturePatch::new().options(OptionsPatch::Magnifier {
            zoom_level: Some(2.0),
            follow_focus: None,
        });

        assert!(config.merged(&patch).is_err());
    }
}
