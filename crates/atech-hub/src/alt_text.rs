//! Alt-Text Generation
//!
//! Image descriptions through an external AI provider, with a local
//! fallback. A provider outage degrades to the manual/default description
//! instead of failing the surrounding page render.

use std::collections::HashMap;

use serde::Serialize;
use url::Url;

/// Description used when neither the provider nor the image supplies one
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Reference to an image needing a description
#[derive(Debug, Clone)]
pub struct ImageRef {
    pub url: Url,
    /// Manually authored description used when generation is unavailable
    pub fallback_description: Option<String>,
}

impl ImageRef {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            fallback_description: None,
        }
    }

    pub fn with_fallback(mut self, description: &str) -> Self {
        self.fallback_description = Some(description.to_string());
        self
    }
}

/// Where a description came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AltTextSource {
    Generated,
    Fallback,
}

/// A resolved image description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AltText {
    pub text: String,
    pub source: AltTextSource,
}

impl AltText {
    pub(crate) fn fallback(image: &ImageRef) -> Self {
        Self {
            text: image
                .fallback_description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            source: AltTextSource::Fallback,
        }
    }
}

/// External provider error
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Service unreachable; callers fall back to a local description
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Service reachable but refused the request
    #[error("provider rejected request: {0}")]
    Rejected(String),
}

/// Seam to the external content-description service
pub trait AltTextProvider {
    fn describe(&self, image: &ImageRef) -> Result<String, ProviderError>;
}

/// In-memory provider keyed by image URL; for tests and offline use
#[derive(Debug, Default)]
pub struct StaticDescriptions {
    descriptions: HashMap<String, String>,
}

impl StaticDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: &Url, description: &str) {
        self.descriptions
            .insert(url.as_str().to_string(), description.to_string());
    }
}

impl AltTextProvider for StaticDescriptions {
    fn describe(&self, image: &ImageRef) -> Result<String, ProviderError> {
        self.descriptions
            .get(image.url.as_str())
            .cloned()
            .ok_or_else(|| ProviderError::Unavailable(format!("no description for {}", image.url)))
    }
}
