//! Migration chain resolver.
//!
//! Turns payload bytes written at any supported version into a fully
//! populated instance of the current record type:
//!
//! - the initial record (version 1) accepts legacy (0) and version 1 data and
//!   decodes it directly;
//! - a derived record at version `N` rejects data newer than `N`, decodes data
//!   at exactly `N` directly, and otherwise resolves its predecessor from the
//!   same bytes and upgrades it.
//!
//! The byte stream is never re-sliced while walking down the chain; only the
//! target type narrows at each level.

use log::{debug, warn};

use crate::codec::PayloadCodec;
use crate::errors::{CodecError, CodecResult};
use crate::traits::migration::{VersionedRecord, chain_versions};

/// Read `payload` (written at `data_version`) into a new `T`.
///
/// The chain is validated before any decoding, so a mis-declared chain fails
/// with [`CodecError::BrokenChain`] instead of recursing.
pub fn resolve<T, C>(codec: &C, payload: &[u8], data_version: u32) -> CodecResult<T>
where
    T: VersionedRecord,
    C: PayloadCodec + ?Sized,
{
    chain_versions::<T>()?;
    resolve_link::<T, C>(codec, payload, data_version)
}

/// Populate `instance` from `payload` (written at `data_version`).
///
/// `instance` is only overwritten once the whole chain has succeeded; on
/// error it is left untouched.
pub fn initialize_from<T, C>(
    instance: &mut T,
    codec: &C,
    payload: &[u8],
    data_version: u32,
) -> CodecResult<()>
where
    T: VersionedRecord,
    C: PayloadCodec + ?Sized,
{
    *instance = resolve(codec, payload, data_version)?;
    Ok(())
}

fn resolve_link<T, C>(codec: &C, payload: &[u8], data_version: u32) -> CodecResult<T>
where
    T: VersionedRecord,
    C: PayloadCodec + ?Sized,
{
    let version = T::SERIALIZATION_VERSION;

    if T::IS_INITIAL {
        if data_version > 1 {
            return Err(version_mismatch::<T>(data_version));
        }
        return decode_direct(codec, payload);
    }

    if data_version > version {
        return Err(version_mismatch::<T>(data_version));
    }
    if data_version == version {
        return decode_direct(codec, payload);
    }

    let previous = resolve_link::<T::Previous, C>(codec, payload, data_version)?;
    debug!(
        "migrating {} -> {} (version {} -> {version})",
        <T::Previous as VersionedRecord>::record_name(),
        T::record_name(),
        <T::Previous as VersionedRecord>::SERIALIZATION_VERSION,
    );
    Ok(T::upgrade_from(previous))
}

fn decode_direct<T, C>(codec: &C, payload: &[u8]) -> CodecResult<T>
where
    T: VersionedRecord,
    C: PayloadCodec + ?Sized,
{
    let document = codec.decode(payload)?;
    T::from_document(&document)
}

fn version_mismatch<T: VersionedRecord>(found: u32) -> CodecError {
    warn!(
        "{} understands up to version {}, refusing version {found} data",
        T::record_name(),
        T::SERIALIZATION_VERSION
    );
    CodecError::VersionMismatch {
        record: T::record_name(),
        supported: T::SERIALIZATION_VERSION,
        found,
    }
}
