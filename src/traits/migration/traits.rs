//! Core traits for versioned record contracts.

use crate::document::Document;
use crate::errors::{CodecError, CodecResult};

/// Trait for upgrading from an older version to a newer version.
///
/// This is the author-supplied forward step of a migration chain. It must be a
/// pure field mapping: the resolver calls it exactly once per chain link, in
/// ascending version order.
///
/// # Example
///
/// ```
/// use versioned_codec::traits::migration::MigrateFrom;
///
/// struct UserV1 {
///     id: u64,
///     name: String,
/// }
///
/// struct UserV2 {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// impl MigrateFrom<UserV1> for UserV2 {
///     fn migrate_from(old: UserV1) -> Self {
///         UserV2 {
///             id: old.id,
///             name: old.name,
///             email: String::from("unknown@example.com"),
///         }
///     }
/// }
///
/// let v2 = UserV2::migrate_from(UserV1 { id: 1, name: "Alice".to_string() });
/// assert_eq!(v2.email, "unknown@example.com");
/// ```
pub trait MigrateFrom<OldVersion>: Sized {
    /// Convert from the previous version to this version.
    fn migrate_from(old: OldVersion) -> Self;
}

/// A record type that takes part in a migration chain.
///
/// Each record declares its own version and names its immediate predecessor.
/// The first record of a chain is version 1 and names [`Genesis`]; every other
/// record names a predecessor with a strictly lower version. The chain is
/// fixed when the types are written and is walked by
/// [`resolve`](crate::resolver::resolve) when reading older data.
///
/// Implementations are usually produced by [`versioned_record!`](crate::versioned_record).
pub trait VersionedRecord: Sized {
    /// Version written into the envelope for this record.
    const SERIALIZATION_VERSION: u32;

    /// Immediate predecessor, or [`Genesis`] for the initial record.
    type Previous: VersionedRecord;

    /// Whether this is the first record of its chain.
    const IS_INITIAL: bool =
        <Self::Previous as VersionedRecord>::SERIALIZATION_VERSION == GENESIS_VERSION;

    /// Build the record from a decoded document.
    fn from_document(document: &Document) -> CodecResult<Self>;

    /// Flatten the record into a document.
    fn to_document(&self) -> Document;

    /// Forward migration step from the predecessor.
    fn upgrade_from(previous: Self::Previous) -> Self;

    /// Short name used in errors and logs.
    fn record_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Version reported by [`Genesis`].
pub const GENESIS_VERSION: u32 = 0;

/// Predecessor of every initial record. It has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genesis {}

impl VersionedRecord for Genesis {
    const SERIALIZATION_VERSION: u32 = GENESIS_VERSION;
    type Previous = Genesis;

    fn from_document(_document: &Document) -> CodecResult<Self> {
        Err(CodecError::BrokenChain(
            "migration walked past the initial record".to_string(),
        ))
    }

    fn to_document(&self) -> Document {
        match *self {}
    }

    fn upgrade_from(previous: Self::Previous) -> Self {
        match previous {}
    }
}

/// Implement [`VersionedRecord`] for a record type.
///
/// The record must implement `TryFrom<&Document>` (with an error convertible
/// into [`CodecError`]) and `From<&Record> for Document`. Derived records must
/// also implement [`MigrateFrom`] for their predecessor.
///
/// ```
/// use versioned_codec::prelude::*;
/// use versioned_codec::versioned_record;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct NoteV1 {
///     text: String,
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct NoteV2 {
///     text: String,
///     pinned: bool,
/// }
///
/// impl TryFrom<&Document> for NoteV1 {
///     type Error = PayloadError;
///     fn try_from(doc: &Document) -> Result<Self, Self::Error> {
///         Ok(NoteV1 { text: doc.field("text")? })
///     }
/// }
///
/// impl From<&NoteV1> for Document {
///     fn from(note: &NoteV1) -> Self {
///         Document::new().with("text", note.text.as_str())
///     }
/// }
///
/// impl TryFrom<&Document> for NoteV2 {
///     type Error = PayloadError;
///     fn try_from(doc: &Document) -> Result<Self, Self::Error> {
///         Ok(NoteV2 { text: doc.field("text")?, pinned: doc.field("pinned")? })
///     }
/// }
///
/// impl From<&NoteV2> for Document {
///     fn from(note: &NoteV2) -> Self {
///         Document::new().with("text", note.text.as_str()).with("pinned", note.pinned)
///     }
/// }
///
/// impl MigrateFrom<NoteV1> for NoteV2 {
///     fn migrate_from(old: NoteV1) -> Self {
///         NoteV2 { text: old.text, pinned: false }
///     }
/// }
///
/// versioned_record!(NoteV1, version = 1);
/// versioned_record!(NoteV2, version = 2, previous = NoteV1);
///
/// assert!(NoteV1::IS_INITIAL);
/// assert!(!NoteV2::IS_INITIAL);
/// ```
#[macro_export]
macro_rules! versioned_record {
    ($record:ty, version = 1) => {
        impl $crate::traits::migration::VersionedRecord for $record {
            const SERIALIZATION_VERSION: u32 = 1;
            type Previous = $crate::traits::migration::Genesis;

            fn from_document(
                document: &$crate::document::Document,
            ) -> $crate::errors::CodecResult<Self> {
                <$record>::try_from(document).map_err($crate::errors::CodecError::from)
            }

            fn to_document(&self) -> $crate::document::Document {
                $crate::document::Document::from(self)
            }

            fn upgrade_from(previous: Self::Previous) -> Self {
                match previous {}
            }
        }
    };
    ($record:ty, version = $version:literal, previous = $previous:ty) => {
        impl $crate::traits::migration::VersionedRecord for $record {
            const SERIALIZATION_VERSION: u32 = $version;
            type Previous = $previous;

            fn from_document(
                document: &$crate::document::Document,
            ) -> $crate::errors::CodecResult<Self> {
                <$record>::try_from(document).map_err($crate::errors::CodecError::from)
            }

            fn to_document(&self) -> $crate::document::Document {
                $crate::document::Document::from(self)
            }

            fn upgrade_from(previous: Self::Previous) -> Self {
                <$record as $crate::traits::migration::MigrateFrom<$previous>>::migrate_from(
                    previous,
                )
            }
        }
    };
}
