//! Image intake: type/size checks and conversion to a previewable reference.

use base64::Engine;
use serde::{Deserialize, Serialize};

use storefront_core::ImageRejection;

use crate::product::ImageRef;

/// Upper bound on an accepted image (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_SUBTYPES: [&str; 3] = ["jpg", "jpeg", "png"];

/// Metadata of a file the user picked, before its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub file_name: String,
    /// MIME type reported by the picker; may be empty.
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ImageCandidate {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Subtype used for the type check: the part of the MIME type after `/`,
    /// or the file extension when no MIME type was reported.
    pub fn subtype(&self) -> String {
        let mime = self.mime_type.trim();
        let raw = if mime.is_empty() {
            self.file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
        } else {
            mime.split_once('/').map(|(_, sub)| sub).unwrap_or("")
        };
        raw.to_ascii_lowercase()
    }
}

/// Image selection that passed intake and is waiting for its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedImage {
    file_name: String,
    mime_type: &'static str,
}

impl AcceptedImage {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Encode the loaded bytes as a `data:` URI.
    pub fn load(&self, bytes: &[u8]) -> ImageRef {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        ImageRef::new(format!("data:{};base64,{payload}", self.mime_type))
    }
}

/// Type and size gate for image selections.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageIntake {
    max_bytes: u64,
}

impl Default for ImageIntake {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl ImageIntake {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Type is checked before size, so an oversized GIF reports the type.
    pub fn validate(&self, candidate: &ImageCandidate) -> Result<AcceptedImage, ImageRejection> {
        let subtype = candidate.subtype();
        if !ALLOWED_SUBTYPES.contains(&subtype.as_str()) {
            tracing::warn!(file = %candidate.file_name, %subtype, "image rejected: type");
            return Err(ImageRejection::InvalidType { subtype });
        }

        if candidate.size_bytes > self.max_bytes {
            tracing::warn!(
                file = %candidate.file_name,
                size_bytes = candidate.size_bytes,
                max_bytes = self.max_bytes,
                "image rejected: size"
            );
            return Err(ImageRejection::TooLarge {
                size_bytes: candidate.size_bytes,
                max_bytes: self.max_bytes,
            });
        }

        let mime_type = if subtype == "png" { "image/png" } else { "image/jpeg" };
        Ok(AcceptedImage {
            file_name: candidate.file_name.clone(),
            mime_type,
        })
    }
}
