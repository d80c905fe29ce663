//! Constants shared by the texture I/O crates

/// Block footprint edge lengths available to 2D ASTC blocks
pub const ASTC_BLOCK_DIMS: [u8; 6] = [4, 5, 6, 8, 10, 12];

/// Bits stored in every ASTC block regardless of footprint
pub const ASTC_BLOCK_BITS: f32 = 128.0;

/// Extensions whose files hold compressed payloads at rest
pub const COMPRESSED_CONTAINER_EXTENSIONS: [&str; 4] = ["dds", "astc", "ktx", "raw"];

/// Plugin domain for image codecs
pub const IMAGE_PLUGIN_DOMAIN: &str = "IMAGE";

/// Plugin key selected when the caller asks for the alternate loader
pub const ALTERNATE_PLUGIN_KEY: &str = "OCV";

/// Plugin key that triggers the save-time swizzle patch
pub const TGA_PLUGIN_KEY: &str = "TGA";

/// Longest accepted plugin key
pub const MAX_PLUGIN_KEY_LEN: usize = 16;
