//! File validation policy

use serde::Deserialize;

/// Default maximum upload size (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];
const DEFAULT_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".pdf"];

/// Accept/reject policy applied to every uploaded artifact
///
/// Entries are normalised to lower case on construction; extensions always carry a
/// leading dot. Listing order is kept so error messages are stable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "PolicyConfig")]
pub struct FileValidationPolicy {
    allowed_mime_types: Vec<String>,
    allowed_extensions: Vec<String>,
    max_size_bytes: u64,
}

impl Default for FileValidationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIME_TYPES, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

impl FileValidationPolicy {
    pub fn new<M, E>(mime_types: M, extensions: E, max_size_bytes: u64) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut allowed_mime_types: Vec<String> = Vec::new();
        for mime in mime_types {
            let mime = mime.as_ref().trim().to_lowercase();
            if !mime.is_empty() && !allowed_mime_types.contains(&mime) {
                allowed_mime_types.push(mime);
            }
        }

        let mut allowed_extensions: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if ext.is_empty() {
                continue;
            }
            let ext = format!(".{}", ext);
            if !allowed_extensions.contains(&ext) {
                allowed_extensions.push(ext);
            }
        }

        Self {
            allowed_mime_types,
            allowed_extensions,
            max_size_bytes,
        }
    }

    /// Sets the size limit (builder pattern)
    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn allowed_mime_types(&self) -> &[String] {
        &self.allowed_mime_types
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim().to_lowercase();
        self.allowed_mime_types.iter().any(|m| *m == mime_type)
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

/// Serde shape of the `upload` configuration section
#[derive(Debug, Clone, Deserialize)]
struct PolicyConfig {
    #[serde(default = "default_mime_types")]
    allowed_mime_types: Vec<String>,
    #[serde(default = "default_extensions")]
    allowed_extensions: Vec<String>,
    #[serde(default = "default_max_size")]
    max_size_bytes: u64,
}

impl From<PolicyConfig> for FileValidationPolicy {
    fn from(config: PolicyConfig) -> Self {
        Self::new(
            config.allowed_mime_types,
            config.allowed_extensions,
            config.max_size_bytes,
        )
    }
}

fn default_mime_types() -> Vec<String> {
    DEFAULT_MIME_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE_BYTES
}
