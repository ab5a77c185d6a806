//! Migration traits for versioned record evolution.
//!
//! A record family is a chain of types, one per persisted shape. The first
//! type is version 1; each later type names its immediate predecessor and
//! implements `MigrateFrom<Predecessor>` to define the upgrade path. Reading
//! data written at any older version walks the chain down to the version the
//! data carries, decodes there, and upgrades back up one step at a time.
//!
//! # Example
//!
//! ```rust
//! use versioned_codec::prelude::*;
//! use versioned_codec::versioned_record;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct UserV1 {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct UserV2 {
//!     pub id: u64,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! impl TryFrom<&Document> for UserV1 {
//!     type Error = PayloadError;
//!     fn try_from(doc: &Document) -> Result<Self, Self::Error> {
//!         Ok(UserV1 { id: doc.field("id")?, name: doc.field("name")? })
//!     }
//! }
//!
//! impl From<&UserV1> for Document {
//!     fn from(user: &UserV1) -> Self {
//!         Document::new().with("id", user.id).with("name", user.name.as_str())
//!     }
//! }
//!
//! impl TryFrom<&Document> for UserV2 {
//!     type Error = PayloadError;
//!     fn try_from(doc: &Document) -> Result<Self, Self::Error> {
//!         Ok(UserV2 {
//!             id: doc.field("id")?,
//!             first_name: doc.field("first_name")?,
//!             last_name: doc.field("last_name")?,
//!         })
//!     }
//! }
//!
//! impl From<&UserV2> for Document {
//!     fn from(user: &UserV2) -> Self {
//!         Document::new()
//!             .with("id", user.id)
//!             .with("first_name", user.first_name.as_str())
//!             .with("last_name", user.last_name.as_str())
//!     }
//! }
//!
//! impl MigrateFrom<UserV1> for UserV2 {
//!     fn migrate_from(old: UserV1) -> Self {
//!         let mut parts = old.name.split_whitespace();
//!         UserV2 {
//!             id: old.id,
//!             first_name: parts.next().unwrap_or_default().to_string(),
//!             last_name: parts.next().unwrap_or_default().to_string(),
//!         }
//!     }
//! }
//!
//! versioned_record!(UserV1, version = 1);
//! versioned_record!(UserV2, version = 2, previous = UserV1);
//!
//! let serializer = Serializer::new();
//! let old = serializer.serialize(&UserV1 { id: 1, name: "Ada Lovelace".into() }).unwrap();
//! let user: UserV2 = serializer.deserialize(&old).unwrap();
//! assert_eq!(user.first_name, "Ada");
//! assert_eq!(user.last_name, "Lovelace");
//! ```

mod chain;
mod context;
mod traits;

pub use chain::*;
pub use context::*;
pub use traits::*;
