//! Prelude module for convenient imports.
//!
//! ```rust
//! use versioned_codec::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - [`VersionedRecord`], [`MigrateFrom`], [`Genesis`]: record contracts
//! - [`Document`], [`FieldValue`]: the named-field form records map to
//! - [`Serializer`], [`SerializerConfig`]: writing and reading records
//! - [`EnvelopeHeader`]: the version header on its own
//! - [`TypeSignature`], [`ModuleBinder`]: cross-version type names

pub use crate::binder::{InMemoryRegistry, ModuleBinder, ModuleIdentity, ModuleRegistry, TypeResolver};
pub use crate::codec::{BincodeCodec, PayloadCodec};
pub use crate::config::SerializerConfig;
pub use crate::document::{Document, FieldKind, FieldValue};
pub use crate::envelope::EnvelopeHeader;
pub use crate::errors::{CodecError, CodecResult, PayloadError};
pub use crate::resolver::{initialize_from, resolve};
pub use crate::serializer::Serializer;
pub use crate::signature::TypeSignature;
pub use crate::traits::migration::{
    Genesis, MigrateFrom, MigrationPath, VersionContext, VersionedRecord, chain_versions,
};
