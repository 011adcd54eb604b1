use std::fmt;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A file the user uploaded for the next send. Held in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Attachment {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Attachment has no filename")]
    MissingFilename,

    #[error("Attachment {filename} is not valid base64: {source}")]
    InvalidEncoding {
        filename: String,
        source: base64::DecodeError,
    },
}

/// Wire form of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentUpload {
    pub filename: String,
    pub content_base64: String,
}

impl TryFrom<AttachmentUpload> for Attachment {
    type Error = AttachmentError;

    fn try_from(upload: AttachmentUpload) -> Result<Self, Self::Error> {
        let filename = upload.filename.trim().to_string();
        if filename.is_empty() {
            return Err(AttachmentError::MissingFilename);
        }
        match STANDARD.decode(upload.content_base64.trim()) {
            Ok(data) => Ok(Attachment { filename, data }),
            Err(source) => Err(AttachmentError::InvalidEncoding { filename, source }),
        }
    }
}

/// Decodes every upload, failing on the first bad one.
pub fn decode_uploads(uploads: Vec<AttachmentUpload>) -> Result<Vec<Attachment>, AttachmentError> {
    uploads.into_iter().map(Attachment::try_from).collect()
}
