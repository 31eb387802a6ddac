use crate::{
    cache::CacheArtifact,
    error::Error,
    model::column::{
        ActionDescriptor, ActionKind, ColumnDescriptor, ColumnKind, ColumnOptions, ColumnSet,
    },
};
use serde::{Deserialize, Serialize};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error as ThisError;
use xxhash_rust::xxh3::xxh3_64;

///
/// Artifact codec
///
/// Layout (all integers little-endian):
///
/// | bytes | field                         |
/// |-------|-------------------------------|
/// | 4     | magic `CGCA`                  |
/// | 2     | format version                |
/// | 8     | xxh3-64 checksum of payload   |
/// | 4     | payload length                |
/// | n     | CBOR-encoded `ArtifactRecord` |
///
/// Every decode failure is reported as a `CodecError`; nothing here panics.
///

pub(crate) const MAGIC: [u8; 4] = *b"CGCA";
pub(crate) const FORMAT_VERSION: u16 = 1;
pub(crate) const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;
pub(crate) const HEADER_LEN: usize = 4 + 2 + 8 + 4;

///
/// CodecError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("artifact truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("artifact magic mismatch")]
    BadMagic,

    #[error("unsupported artifact format version {0} (expected {FORMAT_VERSION})")]
    UnsupportedVersion(u16),

    #[error("payload size {len} exceeds limit {max_bytes}")]
    PayloadTooLarge { len: usize, max_bytes: usize },

    #[error("payload length mismatch: header says {declared}, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("payload checksum mismatch")]
    ChecksumMismatch,

    #[error("artifact belongs to '{found}', expected '{expected}'")]
    EntityMismatch { expected: String, found: String },

    #[error("duplicate column key '{0}'")]
    DuplicateKey(String),

    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Self::cache_corruption(format!("artifact codec: {err}"))
    }
}

//
// records
//

#[derive(Debug, Deserialize, Serialize)]
struct ArtifactRecord {
    entity: String,
    /// `None` is the "no annotation columns" sentinel.
    entries: Option<Vec<DescriptorRecord>>,
}

#[derive(Debug, Deserialize, Serialize)]
enum DescriptorRecord {
    Column {
        key: String,
        label: String,
        sortable: bool,
        searchable: bool,
    },
    ActionColumn {
        key: String,
        label: String,
        actions: Vec<ActionRecord>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
struct ActionRecord {
    label: String,
    route: String,
    action: ActionTag,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
enum ActionTag {
    Show,
    Delete,
    Other,
}

impl From<ActionKind> for ActionTag {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Show => Self::Show,
            ActionKind::Delete => Self::Delete,
            ActionKind::Other => Self::Other,
        }
    }
}

impl From<ActionTag> for ActionKind {
    fn from(tag: ActionTag) -> Self {
        match tag {
            ActionTag::Show => Self::Show,
            ActionTag::Delete => Self::Delete,
            ActionTag::Other => Self::Other,
        }
    }
}

impl From<&ColumnDescriptor> for DescriptorRecord {
    fn from(column: &ColumnDescriptor) -> Self {
        match &column.kind {
            ColumnKind::Data => Self::Column {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.options.sortable,
                searchable: column.searchable,
            },
            ColumnKind::Action(actions) => Self::ActionColumn {
                key: column.key.clone(),
                label: column.label.clone(),
                actions: actions
                    .iter()
                    .map(|a| ActionRecord {
                        label: a.label.clone(),
                        route: a.route.clone(),
                        action: a.action.into(),
                    })
                    .collect(),
            },
        }
    }
}

impl From<DescriptorRecord> for ColumnDescriptor {
    fn from(record: DescriptorRecord) -> Self {
        match record {
            DescriptorRecord::Column {
                key,
                label,
                sortable,
                searchable,
            } => Self::data(key, label)
                .with_options(ColumnOptions { sortable })
                .with_searchable(searchable),

            DescriptorRecord::ActionColumn {
                key,
                label,
                actions,
            } => Self {
                key,
                label,
                options: ColumnOptions::default(),
                searchable: false,
                kind: ColumnKind::Action(
                    actions
                        .into_iter()
                        .map(|a| ActionDescriptor::new(a.label, a.route, a.action.into()))
                        .collect(),
                ),
            },
        }
    }
}

//
// encode / decode
//

/// Encode one entity's discovery result into artifact bytes.
pub(crate) fn encode(entity: &str, artifact: &CacheArtifact) -> Result<Vec<u8>, CodecError> {
    let record = ArtifactRecord {
        entity: entity.to_string(),
        entries: match artifact {
            CacheArtifact::Absent => None,
            CacheArtifact::Columns(columns) => Some(columns.iter().map(Into::into).collect()),
        },
    };

    let payload = to_vec(&record).map_err(|e| CodecError::Serialize(e.to_string()))?;
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(CodecError::PayloadTooLarge {
            len: payload.len(),
            max_bytes: MAX_PAYLOAD_BYTES,
        });
    }
    let len = u32::try_from(payload.len()).map_err(|_| CodecError::PayloadTooLarge {
        len: payload.len(),
        max_bytes: MAX_PAYLOAD_BYTES,
    })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&xxh3_64(&payload).to_le_bytes());
    bytes.extend_from_slice(&len.to_le_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode artifact bytes, validating the header and the owning entity.
pub(crate) fn decode(entity: &str, bytes: &[u8]) -> Result<CacheArtifact, CodecError> {
    let (header, payload) = bytes
        .split_first_chunk::<HEADER_LEN>()
        .ok_or(CodecError::Truncated { len: bytes.len() })?;

    let (magic, rest) = header.split_at(4);
    let (version, rest) = rest.split_at(2);
    let (checksum, len) = rest.split_at(8);

    if magic != MAGIC {
        return Err(CodecError::BadMagic);
    }

    let version = u16::from_le_bytes([version[0], version[1]]);
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let declared = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
    if declared > MAX_PAYLOAD_BYTES {
        return Err(CodecError::PayloadTooLarge {
            len: declared,
            max_bytes: MAX_PAYLOAD_BYTES,
        });
    }
    if declared != payload.len() {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let mut sum = [0u8; 8];
    sum.copy_from_slice(checksum);
    if u64::from_le_bytes(sum) != xxh3_64(payload) {
        return Err(CodecError::ChecksumMismatch);
    }

    let record = deserialize_record(payload)?;
    if record.entity != entity {
        return Err(CodecError::EntityMismatch {
            expected: entity.to_string(),
            found: record.entity,
        });
    }

    let Some(entries) = record.entries else {
        return Ok(CacheArtifact::Absent);
    };

    let mut columns = ColumnSet::new();
    for entry in entries {
        let column = ColumnDescriptor::from(entry);
        if columns.contains_key(&column.key) {
            return Err(CodecError::DuplicateKey(column.key));
        }
        columns.insert(column);
    }

    Ok(CacheArtifact::Columns(columns))
}

// any panic inside the CBOR decoder is reported, never propagated
fn deserialize_record(payload: &[u8]) -> Result<ArtifactRecord, CodecError> {
    match catch_unwind(AssertUnwindSafe(|| from_slice(payload))) {
        Ok(Ok(record)) => Ok(record),
        Ok(Err(err)) => Err(CodecError::Deserialize(err.to_string())),
        Err(_) => Err(CodecError::Deserialize(
            "panic during CBOR deserialization".into(),
        )),
    }
}
