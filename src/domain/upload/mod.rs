//! Upload domain - Documents attached to a registration and the pre-upload gate

mod file;
mod policy;
mod validator;

pub use file::{DocumentKind, UploadFile};
pub use policy::{FileValidationPolicy, DEFAULT_MAX_FILE_SIZE_BYTES};
pub use validator::{
    is_valid_file_extension, is_valid_file_size, is_valid_mime_type, validate_file,
    DocumentRejection, FileValidationResult,
};
