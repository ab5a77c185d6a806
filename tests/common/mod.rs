// Common test fixtures: a three-version profile chain and a counting codec.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use versioned_codec::prelude::*;
use versioned_codec::versioned_record;

thread_local! {
    static UPGRADES: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
}

/// Versions whose upgrade step ran on this thread, in call order.
pub fn take_upgrades() -> Vec<u32> {
    UPGRADES.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

fn record_upgrade(version: u32) {
    UPGRADES.with(|log| log.borrow_mut().push(version));
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileV1 {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileV2 {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileV3 {
    pub id: u64,
    pub display_name: String,
    pub email: Option<String>,
    pub verified: bool,
}

impl TryFrom<&Document> for ProfileV1 {
    type Error = PayloadError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Ok(ProfileV1 {
            id: doc.field("id")?,
            name: doc.field("name")?,
        })
    }
}

impl From<&ProfileV1> for Document {
    fn from(profile: &ProfileV1) -> Self {
        Document::new()
            .with("id", profile.id)
            .with("name", profile.name.as_str())
    }
}

impl TryFrom<&Document> for ProfileV2 {
    type Error = PayloadError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Ok(ProfileV2 {
            id: doc.field("id")?,
            name: doc.field("name")?,
            email: doc.optional_field("email")?,
        })
    }
}

impl From<&ProfileV2> for Document {
    fn from(profile: &ProfileV2) -> Self {
        Document::new()
            .with("id", profile.id)
            .with("name", profile.name.as_str())
            .with("email", profile.email.clone())
    }
}

impl TryFrom<&Document> for ProfileV3 {
    type Error = PayloadError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Ok(ProfileV3 {
            id: doc.field("id")?,
            display_name: doc.field("display_name")?,
            email: doc.optional_field("email")?,
            verified: doc.field("verified")?,
        })
    }
}

impl From<&ProfileV3> for Document {
    fn from(profile: &ProfileV3) -> Self {
        Document::new()
            .with("id", profile.id)
            .with("display_name", profile.display_name.as_str())
            .with("email", profile.email.clone())
            .with("verified", profile.verified)
    }
}

impl MigrateFrom<ProfileV1> for ProfileV2 {
    fn migrate_from(old: ProfileV1) -> Self {
        record_upgrade(2);
        ProfileV2 {
            id: old.id,
            name: old.name,
            email: None,
        }
    }
}

impl MigrateFrom<ProfileV2> for ProfileV3 {
    fn migrate_from(old: ProfileV2) -> Self {
        record_upgrade(3);
        ProfileV3 {
            id: old.id,
            display_name: old.name,
            email: old.email,
            verified: false,
        }
    }
}

versioned_record!(ProfileV1, version = 1);
versioned_record!(ProfileV2, version = 2, previous = ProfileV1);
versioned_record!(ProfileV3, version = 3, previous = ProfileV2);

/// Bincode codec that counts how often it decodes.
#[derive(Debug, Default)]
pub struct CountingCodec {
    inner: BincodeCodec,
    decodes: Cell<usize>,
}

impl CountingCodec {
    pub fn decodes(&self) -> usize {
        self.decodes.get()
    }
}

impl PayloadCodec for CountingCodec {
    fn encode(&self, document: &Document) -> CodecResult<Vec<u8>> {
        self.inner.encode(document)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document> {
        self.decodes.set(self.decodes.get() + 1);
        self.inner.decode(bytes)
    }
}

pub fn sample_v1() -> ProfileV1 {
    ProfileV1 {
        id: 7,
        name: "Grace Hopper".to_string(),
    }
}

/// Raw bytes of a v1 profile written before envelopes existed.
pub fn legacy_v1_bytes() -> Vec<u8> {
    BincodeCodec
        .encode(&Document::from(&sample_v1()))
        .expect("encode legacy profile")
}

/// Frame an arbitrary document at an arbitrary version.
pub fn framed(document: &Document, version: u32) -> Vec<u8> {
    let payload = BincodeCodec.encode(document).expect("encode document");
    EnvelopeHeader::encode(&payload, version)
}
