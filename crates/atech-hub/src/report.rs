//! Accessibility Report
//!
//! Read-only snapshot derived from the feature registry on demand; never
//! persisted.

use serde::Serialize;

use atech_features::{FeatureId, FeatureRegistry};

/// Aggregate accessibility state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityReport {
    /// Enabled features as a proportion of registered features, 0–100
    pub score: u8,
    pub active_features: Vec<FeatureId>,
    pub capabilities: Vec<String>,
}

impl AccessibilityReport {
    pub fn from_registry(features: &FeatureRegistry) -> Self {
        let total = features.len();
        let active_features = features.enabled_features();
        let score = if total == 0 {
            0
        } else {
            ((active_features.len() as f64 / total as f64) * 100.0).round() as u8
        };
        let capabilities = active_features
            .iter()
            .map(|f| f.capability().to_string())
            .collect();

        Self {
            score,
            active_features,
            capabilities,
        }
    }
}
