//! Version context reported by migration-aware reads.
//!
//! A [`VersionContext`] records which version a record type expects and which
//! version the data it was read from actually carried. The serializer returns
//! one from [`Serializer::deserialize_with_context`](crate::serializer::Serializer::deserialize_with_context)
//! so callers can decide whether to rewrite upgraded data.

use crate::envelope::EnvelopeHeader;

/// Version context for a single read.
///
/// # Example
///
/// ```
/// use versioned_codec::traits::migration::VersionContext;
///
/// let mut ctx = VersionContext::new(3);
/// assert!(!ctx.needs_migration());
///
/// ctx.actual_version = Some(1);
/// assert!(ctx.needs_migration());
/// assert_eq!(ctx.version_delta(), 2);
/// assert!(!ctx.is_legacy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionContext {
    /// The version of the record type being read into.
    pub expected_version: u32,
    /// The version found in the data (set during deserialization).
    pub actual_version: Option<u32>,
}

impl VersionContext {
    /// Create a context expecting a specific version.
    pub fn new(expected_version: u32) -> Self {
        Self {
            expected_version,
            actual_version: None,
        }
    }

    /// Record the version found in the data.
    pub fn with_actual(mut self, actual_version: u32) -> Self {
        self.actual_version = Some(actual_version);
        self
    }

    /// Check if the read had to walk the migration chain.
    pub fn needs_migration(&self) -> bool {
        match self.actual_version {
            Some(actual) => actual != self.expected_version,
            None => false,
        }
    }

    /// Get the version delta (positive = upgrade needed, negative = data is newer).
    pub fn version_delta(&self) -> i64 {
        match self.actual_version {
            Some(actual) => i64::from(self.expected_version) - i64::from(actual),
            None => 0,
        }
    }

    /// Whether the data had no envelope header.
    pub fn is_legacy(&self) -> bool {
        self.actual_version == Some(EnvelopeHeader::LEGACY_VERSION)
    }
}
