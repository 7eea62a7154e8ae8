//! Pre-upload file checks
//!
//! Every check is a pure decision: an invalid file produces a result describing why,
//! never an error. The MIME check runs even when the extension passed, since the
//! extension is only a user-facing hint.

use serde::Serialize;

use super::{DocumentKind, FileValidationPolicy, UploadFile};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Outcome of validating a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// First document that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRejection {
    pub kind: DocumentKind,
    pub message: String,
}

pub fn is_valid_file_extension(file: &UploadFile, policy: &FileValidationPolicy) -> bool {
    file.extension()
        .map(|ext| policy.allows_extension(&ext))
        .unwrap_or(false)
}

pub fn is_valid_mime_type(file: &UploadFile, policy: &FileValidationPolicy) -> bool {
    policy.allows_mime_type(file.mime_type())
}

/// Size check; a file of exactly the limit is accepted
pub fn is_valid_file_size(file: &UploadFile, policy: &FileValidationPolicy) -> bool {
    file.size() <= policy.max_size_bytes()
}

/// Runs extension, MIME and size checks in that order and reports the first failure
pub fn validate_file(file: &UploadFile, policy: &FileValidationPolicy) -> FileValidationResult {
    if !is_valid_file_extension(file, policy) {
        let ext = file.extension().unwrap_or_else(|| "(none)".to_string());
        return FileValidationResult::invalid(format!(
            "Invalid file extension: {}. Allowed: {}",
            ext,
            policy.allowed_extensions().join(", ")
        ));
    }

    if !is_valid_mime_type(file, policy) {
        return FileValidationResult::invalid(format!(
            "Invalid file type: {}. Allowed: {}",
            file.mime_type(),
            policy.allowed_mime_types().join(", ")
        ));
    }

    if !is_valid_file_size(file, policy) {
        return FileValidationResult::invalid(format!(
            "File too large: {:.1}MB. Maximum allowed: {}MB",
            file.size() as f64 / BYTES_PER_MB,
            format_limit_mb(policy.max_size_bytes())
        ));
    }

    FileValidationResult::valid()
}

impl FileValidationPolicy {
    /// Validates each document in order, stopping at the first rejection
    pub fn validate_all(
        &self,
        documents: &[(DocumentKind, &UploadFile)],
    ) -> Result<(), DocumentRejection> {
        for (kind, file) in documents {
            let result = validate_file(file, self);

            if !result.valid {
                return Err(DocumentRejection {
                    kind: *kind,
                    message: result.error.unwrap_or_default(),
                });
            }
        }

        Ok(())
    }
}

fn format_limit_mb(bytes: u64) -> String {
    let mb = bytes as f64 / BYTES_PER_MB;

    if mb.fract() == 0.0 {
        format!("{}", mb as u64)
    } else {
        format!("{:.1}", mb)
    }
}
