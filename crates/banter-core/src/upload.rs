//! Client-side attachment validation.
//!
//! Uploads are checked before any network call: a fixed MIME allow-list
//! per attachment kind and a 10 MiB payload cap. Rejections surface as
//! transient user-facing notices; nothing is sent.

use std::fmt;

use crate::error::UploadError;

/// Maximum accepted attachment payload (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for document attachments.
pub const ALLOWED_FILE_TYPES: [&str; 10] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/json",
    "application/xml",
    "text/xml",
    "application/zip",
    "text/csv",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// MIME types accepted for image attachments.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Attachment kind, deciding which allow-list applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Document upload (PDF, office documents, archives, ...).
    File,
    /// Image upload (JPEG, PNG, GIF).
    Image,
}

impl AttachmentKind {
    fn allowed_types(self) -> &'static [&'static str] {
        match self {
            Self::File => &ALLOWED_FILE_TYPES,
            Self::Image => &ALLOWED_IMAGE_TYPES,
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// An attachment staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name, carried into the upload form.
    pub file_name: String,

    /// Declared MIME type.
    pub mime_type: String,

    /// Raw payload bytes.
    pub data: Vec<u8>,

    /// Which allow-list applies.
    pub kind: AttachmentKind,
}

impl Attachment {
    /// Check the attachment against its allow-list and the size cap.
    pub fn validate(&self) -> Result<(), UploadError> {
        if !self.kind.allowed_types().contains(&self.mime_type.as_str()) {
            return Err(UploadError::UnsupportedType {
                kind: self.kind,
                mime_type: self.mime_type.clone(),
            });
        }
        if self.data.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size_bytes: self.data.len(),
                limit_bytes: MAX_UPLOAD_BYTES,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(kind: AttachmentKind, mime_type: &str, size: usize) -> Attachment {
        Attachment {
            file_name: "report.bin".into(),
            mime_type: mime_type.into(),
            data: vec![0; size],
            kind,
        }
    }

    #[test]
    fn accepts_allowed_types_within_cap() {
        assert!(attachment(AttachmentKind::File, "application/pdf", 1024).validate().is_ok());
        assert!(attachment(AttachmentKind::Image, "image/png", 1024).validate().is_ok());
    }

    #[test]
    fn rejects_type_outside_allow_list() {
        let result = attachment(AttachmentKind::File, "application/x-msdownload", 16).validate();
        assert!(matches!(result, Err(UploadError::UnsupportedType { .. })));

        // A document type is not acceptable for an image upload.
        let result = attachment(AttachmentKind::Image, "application/pdf", 16).validate();
        assert!(matches!(result, Err(UploadError::UnsupportedType { .. })));
    }

    #[test]
    fn rejects_oversize_payload() {
        let result =
            attachment(AttachmentKind::Image, "image/jpeg", MAX_UPLOAD_BYTES + 1).validate();
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }

    #[test]
    fn accepts_payload_at_exact_cap() {
        let result = attachment(AttachmentKind::Image, "image/gif", MAX_UPLOAD_BYTES).validate();
        assert!(result.is_ok());
    }
}
