//! File extension classification
//!
//! Plugin keys and container facts derived from a file name's suffix. All
//! case folding is ASCII-only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use texture_io_core::{
    COMPRESSED_CONTAINER_EXTENSIONS, ChannelFormat, DataType, MAX_PLUGIN_KEY_LEN, MipSet,
    PixelFormat,
};

/// Suffix of `filename` without the dot, as written
fn suffix(filename: &str) -> Option<&str> {
    Path::new(filename).extension().and_then(|ext| ext.to_str())
}

/// Validated codec plugin key
///
/// 1 to 16 ASCII alphanumerics, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginKey(String);

impl PluginKey {
    /// Create a plugin key, returning `None` for empty, overlong or
    /// non-alphanumeric input
    pub fn new(key: &str) -> Option<Self> {
        if key.is_empty()
            || key.len() > MAX_PLUGIN_KEY_LEN
            || !key.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(Self(key.to_ascii_uppercase()))
    }

    /// Key for a file name's suffix
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::new(&ExtensionClassifier::plugin_key(filename))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PluginKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("invalid plugin key: {:?}", value))
    }
}

impl From<PluginKey> for String {
    fn from(key: PluginKey) -> Self {
        key.0
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classifies file names by suffix
pub struct ExtensionClassifier;

impl ExtensionClassifier {
    /// False for containers that hold block-compressed payloads at rest
    /// (`.dds`, `.astc`, `.ktx`, `.raw`), true for everything else
    pub fn is_uncompressed_container(filename: &str) -> bool {
        match suffix(filename) {
            Some(ext) => !COMPRESSED_CONTAINER_EXTENSIONS
                .iter()
                .any(|c| ext.eq_ignore_ascii_case(c)),
            None => true,
        }
    }

    /// Uppercased suffix without the dot; empty when there is none
    pub fn plugin_key(filename: &str) -> String {
        suffix(filename)
            .map(|ext| ext.to_ascii_uppercase())
            .unwrap_or_default()
    }

    /// Case-insensitive suffix comparison; `ext` may include the dot
    pub fn is_file_ext(filename: &str, ext: &str) -> bool {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match suffix(filename) {
            Some(actual) => actual.eq_ignore_ascii_case(ext),
            None => ext.is_empty(),
        }
    }

    /// Set up `mip_set` for what an image file of this type decodes to
    ///
    /// `.exr` decodes to half floats, everything else to 8-bit channels.
    /// Both set the data type to ARGB.
    pub fn format_by_file_extension(filename: &str, mip_set: &mut MipSet) -> PixelFormat {
        mip_set.data_type = DataType::ARGB;

        if Self::is_file_ext(filename, "exr") {
            mip_set.channel_format = ChannelFormat::Float16;
            return PixelFormat::ARGB_16F;
        }

        mip_set.channel_format = ChannelFormat::Bit8;
        PixelFormat::ARGB_8888
    }
}
