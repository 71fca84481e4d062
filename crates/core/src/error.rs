//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, user-recoverable failures (validation,
/// bad ratings, rejected images). None of them are fatal: the editor turns
/// each one into an inline message or an alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form field failed validation (empty text, non-positive price, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A rating was not an integer in `1..=5`.
    #[error("invalid rating: {0}")]
    InvalidRating(String),

    /// An image selection was refused by intake.
    #[error("image rejected: {0}")]
    ImageRejected(ImageRejection),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested product was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_rating(msg: impl Into<String>) -> Self {
        Self::InvalidRating(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<ImageRejection> for DomainError {
    fn from(value: ImageRejection) -> Self {
        Self::ImageRejected(value)
    }
}

/// Why an image selection was refused.
///
/// The `Display` text is the message shown next to the form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRejection {
    #[error("Invalid file type! Please upload a JPG, JPEG or PNG file.")]
    InvalidType { subtype: String },

    #[error("File size exceeds {}! Please upload a smaller file.", size_label(.max_bytes))]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

/// Largest whole unit that represents `bytes` exactly: `5MB`, `512KB`, `100 bytes`.
fn size_label(bytes: &u64) -> String {
    let bytes = *bytes;
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}
