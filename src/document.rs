//! Flat named-field documents.
//!
//! A [`Document`] is what a versioned record is written as before the payload
//! codec turns it into bytes. Records build one in `to_document` and read
//! their fields back with the typed getters in `from_document`.
//!
//! ```
//! use versioned_codec::document::Document;
//!
//! let doc = Document::new()
//!     .with("id", 7u64)
//!     .with("name", "Alice");
//!
//! let id: u64 = doc.field("id").unwrap();
//! let name: String = doc.field("name").unwrap();
//! let email: Option<String> = doc.optional_field("email").unwrap();
//! assert_eq!((id, name.as_str(), email), (7, "Alice", None));
//! ```

use std::collections::BTreeMap;

use bincode::{Decode, Encode};
use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::errors::PayloadError;

/// A single self-describing field value.
#[derive(Debug, Clone, PartialEq, From, Encode, Decode, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(FieldKind), derive(strum::Display, strum::IntoStaticStr, Hash))]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::UInt(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        self.discriminant()
    }
}

/// Conversion out of a [`FieldValue`] for the typed document getters.
pub trait FromField: Sized {
    const KIND: FieldKind;

    fn from_field(value: &FieldValue) -> Option<Self>;
}

macro_rules! impl_from_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromField for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn from_field(value: &FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_field!(
    bool => Bool,
    i64 => Int,
    u64 => UInt,
    f64 => Float,
    String => Text,
    Vec<u8> => Bytes,
    Vec<FieldValue> => List,
);

impl FromField for u32 {
    const KIND: FieldKind = FieldKind::UInt;

    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::UInt(inner) => u32::try_from(*inner).ok(),
            _ => None,
        }
    }
}

/// Ordered set of named fields.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Read a required field.
    pub fn field<T: FromField>(&self, name: &str) -> Result<T, PayloadError> {
        let value = self
            .fields
            .get(name)
            .ok_or_else(|| PayloadError::MissingField(name.to_string()))?;
        Self::convert(name, value)
    }

    /// Read a field that may be absent or `Null`.
    pub fn optional_field<T: FromField>(&self, name: &str) -> Result<Option<T>, PayloadError> {
        match self.fields.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(value) => Self::convert(name, value).map(Some),
        }
    }

    fn convert<T: FromField>(name: &str, value: &FieldValue) -> Result<T, PayloadError> {
        T::from_field(value).ok_or_else(|| PayloadError::FieldKind {
            field: name.to_string(),
            expected: T::KIND,
            found: value.kind(),
        })
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut document = Document::new();
        for (name, value) in iter {
            document.insert(name, value);
        }
        document
    }
}
