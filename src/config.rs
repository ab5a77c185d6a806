//! Serializer configuration.
//!
//! Built with `typed-builder`; every option has a default that matches the
//! plain read/write behaviour of the envelope and resolver.

use typed_builder::TypedBuilder;

/// Configuration for [`Serializer`](crate::serializer::Serializer).
///
/// # Examples
///
/// ```
/// use versioned_codec::config::SerializerConfig;
///
/// // Defaults: accept legacy data, migrate older data, no size limit.
/// let config = SerializerConfig::default();
/// assert!(config.accept_legacy);
///
/// // Customize options
/// let config = SerializerConfig::builder()
///     .max_payload_bytes(Some(64 * 1024))
///     .accept_legacy(false)
///     .build();
/// assert_eq!(config.max_payload_bytes, Some(65536));
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct SerializerConfig {
    /// Reject payloads (excluding the envelope header) larger than this
    #[builder(default = None)]
    pub max_payload_bytes: Option<usize>,

    /// Whether header-less (version 0) data may be read
    #[builder(default = true)]
    pub accept_legacy: bool,

    /// Whether data older than the record's version is migrated forward.
    /// Legacy data read into an initial record needs no upgrade step and is
    /// not affected.
    #[builder(default = true)]
    pub auto_migrate: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SerializerConfig {
    /// Configuration that only reads data written at the record's own version.
    pub fn strict() -> Self {
        Self::builder().accept_legacy(false).auto_migrate(false).build()
    }
}
