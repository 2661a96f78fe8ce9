//! ATech Features
//!
//! Feature registry for the assistive technology hub: per-feature typed
//! configuration, enabled/disabled state, and atomic partial updates.
//!
//! Leaf crate; the command registry and the hub sit on top of it.

pub mod config;
pub mod feature;
pub mod registry;

pub use config::{
    AiProvider, BrailleGrade, CaptionQuality, FeatureConfig, FeatureOptions, FeaturePatch,
    OptionsPatch,
};
pub use feature::{FeatureId, Locale};
pub use registry::FeatureRegistry;

/// Feature registry error
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("feature already registered: {0}")]
    DuplicateFeature(FeatureId),

    #[error("unknown feature: {0}")]
    UnknownFeature(FeatureId),

    #[error("invalid option for {feature}: {reason}")]
    InvalidOption { feature: FeatureId, reason: String },
}
