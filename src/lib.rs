//! # Versioned Codec
//!
//! Schema-evolution-safe binary persistence for Rust records, and the type
//! name tooling needed to read payloads written by a different module set.
//!
//! ## Features
//!
//! - **Version Envelope**: every payload carries a 5-byte version header;
//!   header-less data is read as legacy version 0
//! - **Forward Migration**: records form a chain of versions, and older data
//!   is upgraded one step at a time on read
//! - **Strict Rejection**: data newer than the reading code is refused, never
//!   truncated
//! - **Type Signatures**: qualified type names with nested generics and array
//!   ranks parse to a tree and serialize back exactly
//! - **Module Binding**: module references inside a signature are rebound to
//!   whichever version of the module is loaded
//!
//! ## Quick Start
//!
//! ```rust
//! use versioned_codec::prelude::*;
//! use versioned_codec::versioned_record;
//!
//! #[derive(Debug, PartialEq)]
//! struct Setting {
//!     key: String,
//!     value: String,
//! }
//!
//! impl TryFrom<&Document> for Setting {
//!     type Error = PayloadError;
//!     fn try_from(doc: &Document) -> Result<Self, Self::Error> {
//!         Ok(Setting { key: doc.field("key")?, value: doc.field("value")? })
//!     }
//! }
//!
//! impl From<&Setting> for Document {
//!     fn from(setting: &Setting) -> Self {
//!         Document::new()
//!             .with("key", setting.key.as_str())
//!             .with("value", setting.value.as_str())
//!     }
//! }
//!
//! versioned_record!(Setting, version = 1);
//!
//! let serializer = Serializer::new();
//! let setting = Setting { key: "theme".into(), value: "dark".into() };
//! let bytes = serializer.serialize(&setting)?;
//! assert_eq!(&bytes[..5], &[0, 0, 0, 1, 0xAA]);
//!
//! let read: Setting = serializer.deserialize(&bytes)?;
//! assert_eq!(read, setting);
//! # Ok::<(), versioned_codec::errors::CodecError>(())
//! ```

pub mod binder;
pub mod codec;
pub mod config;
pub mod document;
pub mod envelope;
pub mod errors;
pub mod prelude;
pub mod resolver;
pub mod serializer;
pub mod signature;
pub mod traits;
