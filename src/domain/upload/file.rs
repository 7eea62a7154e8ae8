//! Upload file metadata and document kinds

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    mime_type: String,
    size: u64,
    content: Bytes,
}

impl UploadFile {
    /// Creates a file descriptor carrying its content; size is taken from the content
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Creates a metadata-only descriptor, useful when validating before reading the file
    pub fn metadata(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            content: Bytes::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Extension after the last dot, lower-cased and prefixed with `.`
    ///
    /// Returns `None` when the name has no dot or ends with one.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;

        if ext.is_empty() {
            return None;
        }

        Some(format!(".{}", ext.to_lowercase()))
    }
}

/// Documents a team registration may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PaymentReceipt,
    IdentityDocument,
    MembershipDocument,
}

impl DocumentKind {
    /// Form field name the document is submitted under
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::PaymentReceipt => "payment_receipt",
            Self::IdentityDocument => "identity_document",
            Self::MembershipDocument => "membership_document",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaymentReceipt => write!(f, "payment receipt"),
            Self::IdentityDocument => write!(f, "identity document"),
            Self::MembershipDocument => write!(f, "membership document"),
        }
    }
}
