//! Document metadata attached to contracts.

use alloc::string::String;

use bon::Builder;
use chrono::{DateTime, Utc};
use dissolve_derive::Dissolve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ContractId, DocumentId, UserId};

/// Metadata describing an uploaded file.
///
/// The bytes themselves live in an external content-addressed blob store; `content_hash` is
/// the hex digest computed by the uploader and `storage_pointer` locates the blob.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentMeta {
    /// The original file name.
    file_name: String,

    /// The MIME type reported at upload.
    mime_type: String,

    /// The file size in bytes.
    size: u64,

    /// Hex digest of the file content.
    content_hash: String,

    /// Location of the blob in the external store.
    storage_pointer: String,

    /// The user that uploaded the file.
    uploaded_by: UserId,
}

/// A persisted, immutable document record.
#[derive(Debug, Clone, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// The unique identifier of this document.
    id: DocumentId,

    /// The contract this document belongs to.
    contract_id: ContractId,

    /// The file metadata.
    meta: DocumentMeta,

    /// When the document was recorded.
    created_at: DateTime<Utc>,
}

impl DocumentMeta {
    /// Returns the original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the content hash.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Returns the storage pointer.
    pub fn storage_pointer(&self) -> &str {
        &self.storage_pointer
    }

    /// Returns the uploader's id.
    pub fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }
}

impl Document {
    /// Returns the document id.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the id of the owning contract.
    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }

    /// Returns the file metadata.
    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    /// Returns when the document was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
