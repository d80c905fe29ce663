//! Texture I/O configuration
//!
//! Settings for plugin lookup and the fallback strategy. Usually built in
//! code; can also be read from YAML.

use crate::texture::extension::PluginKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use texture_io_core::{ALTERNATE_PLUGIN_KEY, IMAGE_PLUGIN_DOMAIN, Result, TextureIoError};

/// Fallback used when no codec plugin matches a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// Missing plugins are a hard failure
    #[default]
    Unavailable,
    /// Decode and encode through the `image` crate
    ImageCrate,
}

/// Configuration for texture loading and saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureIoConfig {
    /// Plugin key used when the caller asks for the alternate loader
    pub alternate_plugin_key: String,
    /// Plugin domain searched for image codecs
    pub plugin_domain: String,
    /// Strategy when no plugin matches
    pub fallback: FallbackKind,
    /// Keep `.exr` files as half floats on fallback load
    pub exr_as_half: bool,
}

impl Default for TextureIoConfig {
    fn default() -> Self {
        Self {
            alternate_plugin_key: ALTERNATE_PLUGIN_KEY.to_string(),
            plugin_domain: IMAGE_PLUGIN_DOMAIN.to_string(),
            fallback: FallbackKind::Unavailable,
            exr_as_half: true,
        }
    }
}

impl TextureIoConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alternate_plugin_key<S: Into<String>>(mut self, key: S) -> Self {
        self.alternate_plugin_key = key.into();
        self
    }

    pub fn with_plugin_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.plugin_domain = domain.into();
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackKind) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_exr_as_half(mut self, exr_as_half: bool) -> Self {
        self.exr_as_half = exr_as_half;
        self
    }

    /// Parse a configuration from YAML text; missing fields take defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| TextureIoError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TextureIoError::config(format!("Failed to serialize config: {}", e)))
    }

    /// Check that the alternate key is a usable plugin key and the domain is set
    pub fn validate(&self) -> Result<()> {
        self.alternate_key()?;
        if self.plugin_domain.is_empty() {
            return Err(TextureIoError::config("plugin_domain must not be empty"));
        }
        Ok(())
    }

    /// The alternate loader key, validated
    pub fn alternate_key(&self) -> Result<PluginKey> {
        PluginKey::new(&self.alternate_plugin_key).ok_or_else(|| {
            TextureIoError::config(format!(
                "invalid alternate_plugin_key {:?}",
                self.alternate_plugin_key
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TextureIoConfig::default();
        assert_eq!(config.alternate_plugin_key, "OCV");
        assert_eq!(config.plugin_domain, "IMAGE");
        assert_eq!(config.fallback, FallbackKind::Unavailable);
        assert!(config.exr_as_half);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_config() {
        let config = TextureIoConfig::from_yaml_str("fallback: image_crate\nexr_as_half: false\n").unwrap();
        assert_eq!(config.fallback, FallbackKind::ImageCrate);
        assert!(!config.exr_as_half);
        assert_eq!(config.alternate_plugin_key, "OCV");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = TextureIoConfig::new()
            .with_alternate_plugin_key("QT")
            .with_fallback(FallbackKind::ImageCrate);
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(TextureIoConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        let err = TextureIoConfig::from_yaml_str("alternate_plugin_key: \"no way\"\n").unwrap_err();
        assert!(matches!(err, TextureIoError::Config(_)));

        assert!(TextureIoConfig::from_yaml_str("fallback: [1, 2]").is_err());
        assert!(TextureIoConfig::new().with_plugin_domain("").validate().is_err());
    }
}
