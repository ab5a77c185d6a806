//! Record serializer.
//!
//! Pairs the envelope header with a payload codec and the migration chain
//! resolver: records are written at their own version and read back from any
//! version their chain understands.

use log::debug;

use crate::codec::{BincodeCodec, PayloadCodec};
use crate::config::SerializerConfig;
use crate::envelope::EnvelopeHeader;
use crate::errors::{CodecError, CodecResult};
use crate::resolver;
use crate::traits::migration::{VersionContext, VersionedRecord};

/// Writes and reads versioned records.
///
/// ```
/// use versioned_codec::prelude::*;
///
/// let serializer = Serializer::new();
/// assert!(serializer.config().auto_migrate);
///
/// let strict = Serializer::new().with_config(SerializerConfig::strict());
/// assert!(!strict.config().accept_legacy);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Serializer<C: PayloadCodec = BincodeCodec> {
    codec: C,
    config: SerializerConfig,
}

impl Serializer<BincodeCodec> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: PayloadCodec> Serializer<C> {
    /// Use a different payload codec.
    pub fn with_codec<D: PayloadCodec>(self, codec: D) -> Serializer<D> {
        Serializer {
            codec,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: SerializerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encode `record` behind an envelope at its own version.
    pub fn serialize<T: VersionedRecord>(&self, record: &T) -> CodecResult<Vec<u8>> {
        let payload = self.codec.encode(&record.to_document())?;
        Ok(EnvelopeHeader::encode(&payload, T::SERIALIZATION_VERSION))
    }

    /// Decode `data` into `T`, migrating older data forward.
    pub fn deserialize<T: VersionedRecord>(&self, data: &[u8]) -> CodecResult<T> {
        self.deserialize_with_context(data).map(|(record, _)| record)
    }

    /// Decode `data` into `T` and report the version it was written at.
    pub fn deserialize_with_context<T: VersionedRecord>(
        &self,
        data: &[u8],
    ) -> CodecResult<(T, VersionContext)> {
        let (header, payload) = EnvelopeHeader::split(data);
        let context = VersionContext::new(T::SERIALIZATION_VERSION).with_actual(header.version);
        self.check(&header, payload, &context, T::IS_INITIAL)?;

        if context.needs_migration() {
            debug!(
                "reading {} from version {} data",
                T::record_name(),
                header.version
            );
        }
        let record = resolver::resolve(&self.codec, payload, header.version)?;
        Ok((record, context))
    }

    /// Populate `instance` from `data`; `instance` is untouched on error.
    pub fn initialize_from<T: VersionedRecord>(&self, instance: &mut T, data: &[u8]) -> CodecResult<()> {
        *instance = self.deserialize(data)?;
        Ok(())
    }

    fn check(
        &self,
        header: &EnvelopeHeader,
        payload: &[u8],
        context: &VersionContext,
        initial_record: bool,
    ) -> CodecResult<()> {
        if let Some(limit) = self.config.max_payload_bytes {
            if payload.len() > limit {
                return Err(CodecError::PayloadTooLarge {
                    size: payload.len(),
                    limit,
                });
            }
        }
        if header.is_legacy() && !self.config.accept_legacy {
            return Err(CodecError::LegacyRejected);
        }
        // The initial record reads legacy data directly; no upgrade step runs.
        let direct_legacy = initial_record && header.version == EnvelopeHeader::LEGACY_VERSION;
        if !self.config.auto_migrate && context.version_delta() > 0 && !direct_legacy {
            return Err(CodecError::MigrationDisabled {
                expected: context.expected_version,
                found: header.version,
            });
        }
        Ok(())
    }
}
