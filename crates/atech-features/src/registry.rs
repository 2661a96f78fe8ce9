//! Feature Registry
//!
//! Enabled/disabled state and configuration for every registered assistive
//! capability. Changes are visible to dependents immediately; there is no
//! caching layer in front of this map.

use std::collections::BTreeMap;

use crate::config::{FeatureConfig, FeaturePatch};
use crate::feature::FeatureId;
use crate::FeatureError;

/// Registry of assistive features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRegistry {
    features: BTreeMap<FeatureId, FeatureConfig>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every known feature registered at its documented
    /// defaults (disabled, locale "en")
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for feature in FeatureId::ALL {
            // Fresh registry, duplicates impossible
            let _ = registry.register(feature, FeatureConfig::defaults(feature));
        }
        registry
    }

    /// Register a feature. Duplicate registration is a configuration error
    /// and fails fast rather than overwriting.
    pub fn register(
        &mut self,
        feature: FeatureId,
        config: FeatureConfig,
    ) -> Result<(), FeatureError> {
        if self.features.contains_key(&feature) {
            return Err(FeatureError::DuplicateFeature(feature));
        }
        if config.feature() != feature {
            return Err(FeatureError::InvalidOption {
                feature,
                reason: format!("options belong to {}", config.feature()),
            });
        }
        config.options.validate()?;
        tracing::debug!(feature = %feature, enabled = config.enabled, "feature registered");
        self.features.insert(feature, config);
        Ok(())
    }

    /// Merge a partial update into a feature's configuration. The merge is
    /// atomic: validation runs against the merged result and on error the
    /// stored configuration is unchanged.
    pub fn update_configuration(
        &mut self,
        feature: FeatureId,
        patch: &FeaturePatch,
    ) -> Result<(), FeatureError> {
        let config = self
            .features
            .get_mut(&feature)
            .ok_or(FeatureError::UnknownFeature(feature))?;
        let merged = config.merged(patch)?;
        tracing::debug!(feature = %feature, enabled = merged.enabled, "configuration updated");
        *config = merged;
        Ok(())
    }

    /// Whether a feature is registered and enabled. Unknown ids are simply
    /// `false`, never an error.
    pub fn is_enabled(&self, feature: FeatureId) -> bool {
        self.features.get(&feature).is_some_and(|c| c.enabled)
    }

    pub fn config(&self, feature: FeatureId) -> Option<&FeatureConfig> {
        self.features.get(&feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &FeatureConfig)> {
        self.features.iter().map(|(id, config)| (*id, config))
    }

    /// Registered features currently enabled, in stable order
    pub fn enabled_features(&self) -> Vec<FeatureId> {
        self.features
            .iter()
            .filter(|(_, config)| config.enabled)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop all registrations
    pub fn clear(&mut self) {
        self.features.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionsPatch;
    use crate::feature::Locale;

    #[test]
    fn test_unknown_feature_is_disabled() {
        let registry = FeatureRegistry::new();
        for feature in FeatureId::ALL {
            assert!(!registry.is_enabled(feature));
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = FeatureRegistry::new();
        let config = FeatureConfig::defaults(FeatureId::Braille);
        registry.register(FeatureId::Braille, config.clone()).unwrap();

        assert!(matches!(
            registry.register(FeatureId::Braille, config),
            Err(FeatureError::DuplicateFeature(FeatureId::Braille))
        ));
    }

    #[test]
    fn test_update_unknown_feature_fails() {
        let mut registry = FeatureRegistry::new();
        assert!(matches!(
            registry.update_configuration(FeatureId::Magnifier, &FeaturePatch::new().enabled(true)),
            Err(FeatureError::UnknownFeature(FeatureId::Magnifier))
        ));
    }

    #[test]
    fn test_update_round_trip_preserves_other_fields() {
        let mut registry = FeatureRegistry::new();
        registry
            .register(
                FeatureId::VoiceControl,
                FeatureConfig::defaults(FeatureId::VoiceControl)
                    .enabled(true)
                    .locale(Locale::new("pl-PL")),
            )
            .unwrap();

        registry
            .update_configuration(
                FeatureId::VoiceControl,
                &FeaturePatch::new().options(OptionsPatch::VoiceControl {
                    confidence_threshold: Some(0.9),
                    continuous: None,
                }),
            )
            .unwrap();

        let config = registry.config(FeatureId::VoiceControl).unwrap();
        assert!(config.enabled);
        assert_eq!(config.locale, Locale::new("pl-pl"));
        assert_eq!(
            config.options,
            crate::config::FeatureOptions::VoiceControl {
                confidence_threshold: 0.9,
                continuous: true,
            }
        );
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let mut registry = FeatureRegistry::with_defaults();
        let before = registry.config(FeatureId::Magnifier).cloned();

        let result = registry.update_configuration(
            FeatureId::Magnifier,
            &FeaturePatch::new().enabled(true).options(OptionsPatch::Magnifier {
                zoom_level: Some(0.5),
                follow_focus: Some(false),
            }),
        );

        assert!(result.is_err());
        assert_eq!(registry.config(FeatureId::Magnifier).cloned(), before);
        assert!(!registry.is_enabled(FeatureId::Magnifier));
    }

    #[test]
    fn test_with_defaults_registers_everything_disabled() {
        let registry = FeatureRegistry::with_defaults();
        assert_eq!(registry.len(), FeatureId::ALL.len());
        assert!(registry.enabled_features().is_empty());
    }
}
