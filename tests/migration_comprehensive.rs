/// Migration chain tests
///
/// This test suite validates:
/// - Direct reads at the current version
/// - Forward migration through every chain link, in order
/// - Rejection of data newer than the reading record
/// - Legacy (header-less) reads and serializer configuration
mod common;

use assert_matches::assert_matches;
use common::*;
use versioned_codec::prelude::*;
use versioned_codec::versioned_record;

/// Chain that skips versions 2 and 3.
#[derive(Debug, Clone, PartialEq)]
struct GapV1 {
    id: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct GapV4 {
    id: u64,
    archived: bool,
}

impl TryFrom<&Document> for GapV1 {
    type Error = PayloadError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Ok(GapV1 { id: doc.field("id")? })
    }
}

impl From<&GapV1> for Document {
    fn from(record: &GapV1) -> Self {
        [("id", FieldValue::from(record.id))].into_iter().collect()
    }
}

impl TryFrom<&Document> for GapV4 {
    type Error = PayloadError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Ok(GapV4 {
            id: doc.field("id")?,
            archived: doc.field("archived")?,
        })
    }
}

impl From<&GapV4> for Document {
    fn from(record: &GapV4) -> Self {
        [
            ("id", FieldValue::from(record.id)),
            ("archived", FieldValue::from(record.archived)),
        ]
        .into_iter()
        .collect()
    }
}

impl MigrateFrom<GapV1> for GapV4 {
    fn migrate_from(old: GapV1) -> Self {
        GapV4 {
            id: old.id,
            archived: false,
        }
    }
}

versioned_record!(GapV1, version = 1);
versioned_record!(GapV4, version = 4, previous = GapV1);

/// Derived record that does not raise the version of its predecessor.
#[derive(Debug)]
struct SameVersion;

impl TryFrom<&Document> for SameVersion {
    type Error = PayloadError;

    fn try_from(_doc: &Document) -> Result<Self, Self::Error> {
        Ok(SameVersion)
    }
}

impl From<&SameVersion> for Document {
    fn from(_record: &SameVersion) -> Self {
        Document::new()
    }
}

impl MigrateFrom<GapV1> for SameVersion {
    fn migrate_from(_old: GapV1) -> Self {
        SameVersion
    }
}

versioned_record!(SameVersion, version = 1, previous = GapV1);

/// Initial record declared at the wrong version.
#[derive(Debug)]
struct MisnumberedInitial;

impl VersionedRecord for MisnumberedInitial {
    const SERIALIZATION_VERSION: u32 = 2;
    type Previous = Genesis;

    fn from_document(_document: &Document) -> CodecResult<Self> {
        Ok(MisnumberedInitial)
    }

    fn to_document(&self) -> Document {
        Document::new()
    }

    fn upgrade_from(previous: Self::Previous) -> Self {
        match previous {}
    }
}

#[test]
fn test_current_version_decodes_once_without_upgrades() -> CodecResult<()> {
    let profile = ProfileV3 {
        id: 1,
        display_name: "Ada".to_string(),
        email: Some("ada@example.com".to_string()),
        verified: true,
    };
    let serializer = Serializer::new().with_codec(CountingCodec::default());
    let bytes = serializer.serialize(&profile)?;

    let read: ProfileV3 = serializer.deserialize(&bytes)?;

    assert_eq!(read, profile);
    assert_eq!(serializer.codec().decodes(), 1);
    assert!(take_upgrades().is_empty());
    Ok(())
}

#[test_log::test]
fn test_v1_data_runs_each_upgrade_once_in_order() -> CodecResult<()> {
    let serializer = Serializer::new().with_codec(CountingCodec::default());
    let bytes = serializer.serialize(&sample_v1())?;
    assert_eq!(EnvelopeHeader::decode(&bytes).version, 1);

    let read: ProfileV3 = serializer.deserialize(&bytes)?;

    assert_eq!(take_upgrades(), vec![2, 3]);
    assert_eq!(serializer.codec().decodes(), 1);
    assert_eq!(
        read,
        ProfileV3 {
            id: 7,
            display_name: "Grace Hopper".to_string(),
            email: None,
            verified: false,
        }
    );
    Ok(())
}

#[test]
fn test_v2_data_runs_only_last_upgrade() -> CodecResult<()> {
    let v2 = ProfileV2 {
        id: 3,
        name: "Linus".to_string(),
        email: Some("linus@example.com".to_string()),
    };
    let bytes = Serializer::new().serialize(&v2)?;

    let read: ProfileV3 = Serializer::new().deserialize(&bytes)?;

    assert_eq!(take_upgrades(), vec![3]);
    assert_eq!(read.display_name, "Linus");
    assert_eq!(read.email.as_deref(), Some("linus@example.com"));
    Ok(())
}

#[test]
fn test_newer_data_is_rejected() {
    let document = Document::new()
        .with("id", 1u64)
        .with("display_name", "Future")
        .with("verified", true);
    let bytes = framed(&document, 5);

    let result = Serializer::new().deserialize::<ProfileV3>(&bytes);
    assert_matches!(
        result,
        Err(CodecError::VersionMismatch { supported: 3, found: 5, .. })
    );

    let result = Serializer::new().deserialize::<ProfileV1>(&framed(&document, 2));
    assert_matches!(
        result,
        Err(CodecError::VersionMismatch { supported: 1, found: 2, .. })
    );
}

#[test]
fn test_legacy_data_reads_as_initial_version() -> CodecResult<()> {
    let legacy = legacy_v1_bytes();
    assert!(EnvelopeHeader::decode(&legacy).is_legacy());

    let serializer = Serializer::new();
    let v1: ProfileV1 = serializer.deserialize(&legacy)?;
    assert_eq!(v1, sample_v1());

    let (v3, context) = serializer.deserialize_with_context::<ProfileV3>(&legacy)?;
    assert!(context.is_legacy());
    assert_eq!(context.version_delta(), 3);
    assert_eq!(v3.display_name, "Grace Hopper");
    assert_eq!(take_upgrades(), vec![2, 3]);
    Ok(())
}

#[test]
fn test_context_reports_versions() -> CodecResult<()> {
    let serializer = Serializer::new();
    let bytes = serializer.serialize(&sample_v1())?;

    let (_, context) = serializer.deserialize_with_context::<ProfileV2>(&bytes)?;
    assert_eq!(context.expected_version, 2);
    assert_eq!(context.actual_version, Some(1));
    assert!(context.needs_migration());
    assert!(!context.is_legacy());
    Ok(())
}

#[test]
fn test_malformed_payload_is_fatal() {
    let mut bytes = Serializer::new().serialize(&sample_v1()).unwrap();
    bytes.truncate(bytes.len() - 4);

    let result = Serializer::new().deserialize::<ProfileV3>(&bytes);
    assert_matches!(result, Err(CodecError::MalformedPayload(_)));
    assert!(take_upgrades().is_empty());
}

#[test]
fn test_missing_field_is_malformed() {
    let bytes = framed(&Document::new().with("id", 1u64), 2);
    let result = Serializer::new().deserialize::<ProfileV2>(&bytes);
    assert_matches!(
        result,
        Err(CodecError::MalformedPayload(PayloadError::MissingField(field))) if field == "name"
    );
}

#[test]
fn test_initialize_from_leaves_target_untouched_on_error() {
    let mut target = ProfileV3 {
        id: 99,
        display_name: "unchanged".to_string(),
        email: None,
        verified: true,
    };
    let before = target.clone();

    let result = Serializer::new().initialize_from(&mut target, &framed(&Document::new(), 9));
    assert_matches!(result, Err(CodecError::VersionMismatch { .. }));
    assert_eq!(target, before);
}

#[test]
fn test_initialize_from_populates_target() -> CodecResult<()> {
    let bytes = Serializer::new().serialize(&sample_v1())?;
    let mut target = ProfileV2::default();

    Serializer::new().initialize_from(&mut target, &bytes)?;
    assert_eq!(target.name, "Grace Hopper");

    let mut direct = ProfileV1::default();
    let (header, payload) = EnvelopeHeader::split(&bytes);
    initialize_from(&mut direct, &BincodeCodec, payload, header.version)?;
    assert_eq!(direct, sample_v1());
    Ok(())
}

#[test]
fn test_resolve_uses_same_bytes_at_every_level() -> CodecResult<()> {
    let payload = BincodeCodec.encode(&Document::from(&sample_v1()))?;
    let codec = CountingCodec::default();

    let read: ProfileV3 = resolve(&codec, &payload, 1)?;
    assert_eq!(read.id, 7);
    assert_eq!(codec.decodes(), 1);
    Ok(())
}

#[test]
fn test_strict_config_rejects_legacy_and_old_data() {
    let strict = Serializer::new().with_config(SerializerConfig::strict());

    assert_matches!(
        strict.deserialize::<ProfileV1>(&legacy_v1_bytes()),
        Err(CodecError::LegacyRejected)
    );

    let v1 = strict.serialize(&sample_v1()).unwrap();
    assert_matches!(
        strict.deserialize::<ProfileV3>(&v1),
        Err(CodecError::MigrationDisabled { expected: 3, found: 1 })
    );
    assert!(strict.deserialize::<ProfileV1>(&v1).is_ok());
}

#[test]
fn test_payload_limit() {
    let config = SerializerConfig::builder().max_payload_bytes(Some(4)).build();
    let serializer = Serializer::new().with_config(config);
    let bytes = serializer.serialize(&sample_v1()).unwrap();

    assert_matches!(
        serializer.deserialize::<ProfileV1>(&bytes),
        Err(CodecError::PayloadTooLarge { limit: 4, .. })
    );
}

#[test]
fn test_chain_introspection() -> CodecResult<()> {
    assert_eq!(chain_versions::<ProfileV3>()?, vec![3, 2, 1]);
    assert_eq!(chain_versions::<ProfileV1>()?, vec![1]);

    let path = MigrationPath::plan::<ProfileV3>(1)?;
    assert_eq!(path.upgrades, vec![2, 3]);
    assert_eq!(path.steps(), 2);

    let legacy = MigrationPath::plan::<ProfileV3>(0)?;
    assert_eq!(legacy.upgrades, vec![2, 3]);

    assert!(MigrationPath::plan::<ProfileV3>(3)?.is_direct());
    assert_matches!(
        MigrationPath::plan::<ProfileV3>(4),
        Err(CodecError::VersionMismatch { found: 4, .. })
    );
    Ok(())
}

#[test]
fn test_predecessor_at_same_version_is_broken_chain() {
    assert_matches!(chain_versions::<SameVersion>(), Err(CodecError::BrokenChain(_)));
    assert_matches!(
        MigrationPath::plan::<SameVersion>(1),
        Err(CodecError::BrokenChain(_))
    );

    let bytes = framed(&Document::new().with("id", 1u64), 1);
    assert_matches!(
        Serializer::new().deserialize::<SameVersion>(&bytes),
        Err(CodecError::BrokenChain(message)) if message.contains("SameVersion")
    );
}

#[test]
fn test_initial_record_not_at_version_one_is_broken_chain() {
    assert_matches!(
        chain_versions::<MisnumberedInitial>(),
        Err(CodecError::BrokenChain(message)) if message.contains("version 2")
    );

    let bytes = framed(&Document::new(), 2);
    assert_matches!(
        Serializer::new().deserialize::<MisnumberedInitial>(&bytes),
        Err(CodecError::BrokenChain(_))
    );
}

#[test]
fn test_skipped_version_is_rejected_by_resolver_and_plan() -> CodecResult<()> {
    assert_eq!(chain_versions::<GapV4>()?, vec![4, 1]);

    let document = Document::new().with("id", 5u64);
    let payload = BincodeCodec.encode(&document)?;

    assert_matches!(
        resolve::<GapV4, _>(&BincodeCodec, &payload, 2),
        Err(CodecError::VersionMismatch { supported: 1, found: 2, .. })
    );
    assert_matches!(
        MigrationPath::plan::<GapV4>(2),
        Err(CodecError::VersionMismatch { supported: 1, found: 2, .. })
    );

    let read: GapV4 = resolve(&BincodeCodec, &payload, 1)?;
    assert_eq!(read, GapV4 { id: 5, archived: false });
    assert_eq!(MigrationPath::plan::<GapV4>(1)?.upgrades, vec![4]);

    let written = Serializer::new().serialize(&GapV4 { id: 6, archived: true })?;
    let direct: GapV4 = Serializer::new().deserialize(&written)?;
    assert!(direct.archived);
    Ok(())
}

#[test]
fn test_migration_disabled_still_reads_legacy_into_initial_record() -> CodecResult<()> {
    let config = SerializerConfig::builder()
        .accept_legacy(true)
        .auto_migrate(false)
        .build();
    let serializer = Serializer::new().with_config(config);

    let v1: ProfileV1 = serializer.deserialize(&legacy_v1_bytes())?;
    assert_eq!(v1, sample_v1());

    assert_matches!(
        serializer.deserialize::<ProfileV3>(&legacy_v1_bytes()),
        Err(CodecError::MigrationDisabled { expected: 3, found: 0 })
    );
    Ok(())
}
