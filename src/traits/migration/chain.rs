//! Migration chain introspection.

use super::traits::VersionedRecord;
use crate::errors::{CodecError, CodecResult};

/// Versions of `T`'s chain, from `T` itself down to the initial record.
///
/// Fails with [`CodecError::BrokenChain`] if the initial record is not at
/// version 1 or a predecessor does not have a strictly lower version. The walk
/// stops at the first violation, so a mis-declared cycle cannot loop.
///
/// ```
/// use versioned_codec::prelude::*;
/// # use versioned_codec::versioned_record;
/// # #[derive(Default)] struct A; #[derive(Default)] struct B;
/// # impl TryFrom<&Document> for A { type Error = PayloadError; fn try_from(_: &Document) -> Result<Self, PayloadError> { Ok(A) } }
/// # impl TryFrom<&Document> for B { type Error = PayloadError; fn try_from(_: &Document) -> Result<Self, PayloadError> { Ok(B) } }
/// # impl From<&A> for Document { fn from(_: &A) -> Self { Document::new() } }
/// # impl From<&B> for Document { fn from(_: &B) -> Self { Document::new() } }
/// # impl MigrateFrom<A> for B { fn migrate_from(_: A) -> Self { B } }
/// versioned_record!(A, version = 1);
/// versioned_record!(B, version = 4, previous = A);
///
/// assert_eq!(chain_versions::<B>().unwrap(), vec![4, 1]);
/// ```
pub fn chain_versions<T: VersionedRecord>() -> CodecResult<Vec<u32>> {
    Ok(chain_links::<T>()?.into_iter().map(|(version, _)| version).collect())
}

/// `(version, record name)` pairs of `T`'s chain, newest first.
fn chain_links<T: VersionedRecord>() -> CodecResult<Vec<(u32, &'static str)>> {
    let mut links = Vec::new();
    collect_links::<T>(&mut links)?;
    Ok(links)
}

fn collect_links<T: VersionedRecord>(links: &mut Vec<(u32, &'static str)>) -> CodecResult<()> {
    let version = T::SERIALIZATION_VERSION;
    links.push((version, T::record_name()));

    if T::IS_INITIAL {
        if version != 1 {
            return Err(CodecError::BrokenChain(format!(
                "initial record {} declares version {version}, expected 1",
                T::record_name()
            )));
        }
        return Ok(());
    }

    let previous = <T::Previous as VersionedRecord>::SERIALIZATION_VERSION;
    if previous >= version {
        return Err(CodecError::BrokenChain(format!(
            "{} (version {version}) names {} (version {previous}) as its predecessor",
            T::record_name(),
            <T::Previous as VersionedRecord>::record_name()
        )));
    }
    collect_links::<T::Previous>(links)
}

/// The steps a read of `from_version` data into a record will take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPath {
    /// The record being read into.
    pub record: &'static str,
    /// Version found in the data (0 for legacy).
    pub from_version: u32,
    /// The record's own version.
    pub to_version: u32,
    /// Chain versions whose upgrade step runs, in the order they run.
    pub upgrades: Vec<u32>,
}

impl MigrationPath {
    /// Plan a read of `data_version` data into `T`.
    ///
    /// Fails the same way a read would: data newer than the link it lands on
    /// is a [`CodecError::VersionMismatch`], a mis-declared chain a
    /// [`CodecError::BrokenChain`]. When versions are skipped between two
    /// links, data at a skipped version cannot be read.
    pub fn plan<T: VersionedRecord>(data_version: u32) -> CodecResult<Self> {
        let links = chain_links::<T>()?;
        let last = links.len() - 1;
        let mut upgrades = Vec::new();

        for (index, &(version, record)) in links.iter().enumerate() {
            let newest_readable = if index == last { 1 } else { version };
            if data_version > newest_readable {
                return Err(CodecError::VersionMismatch {
                    record,
                    supported: version,
                    found: data_version,
                });
            }
            if index == last || data_version == version {
                break;
            }
            upgrades.push(version);
        }
        upgrades.reverse();

        Ok(Self {
            record: T::record_name(),
            from_version: data_version,
            to_version: T::SERIALIZATION_VERSION,
            upgrades,
        })
    }

    /// Number of upgrade steps.
    pub fn steps(&self) -> usize {
        self.upgrades.len()
    }

    /// Whether the data is already at the record's version.
    pub fn is_direct(&self) -> bool {
        self.upgrades.is_empty()
    }
}
