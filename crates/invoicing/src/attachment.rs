//! File attachments stored inline on their invoice.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicedesk_core::{AttachmentId, DomainError, DomainResult, Entity};

/// A file attached to an invoice. The payload is kept base64-encoded so the
/// whole invoice stays a single text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub id: AttachmentId,
    pub filename: String,
    /// Size of the decoded payload in bytes.
    pub size: u64,
    pub mime_type: String,
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Raw file as handed over by the user, before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Encode the upload into an attachment.
    ///
    /// Rejects empty filenames or MIME types and payloads larger than `max_bytes`.
    pub fn into_attachment(
        self,
        max_bytes: u64,
        uploaded_at: DateTime<Utc>,
    ) -> DomainResult<FileAttachment> {
        let filename = self.filename.trim();
        if filename.is_empty() {
            return Err(DomainError::validation("attachment filename is required"));
        }
        let mime_type = self.mime_type.trim();
        if mime_type.is_empty() {
            return Err(DomainError::validation("attachment MIME type is required"));
        }
        let size = self.bytes.len() as u64;
        check_attachment_size(filename, size, max_bytes)?;

        Ok(FileAttachment {
            id: AttachmentId::new(),
            filename: filename.to_string(),
            size,
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(&self.bytes),
            uploaded_at,
        })
    }
}

impl FileAttachment {
    /// Decode the stored payload back into raw bytes.
    pub fn decode(&self) -> DomainResult<Vec<u8>> {
        STANDARD.decode(self.data.as_bytes()).map_err(|e| {
            DomainError::invariant(format!("attachment '{}' has a corrupt payload: {e}", self.filename))
        })
    }

    /// `data:` URL for the payload, suitable for a download link.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl Entity for FileAttachment {
    type Id = AttachmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Reject a file of `size` bytes when it exceeds `max_bytes`. Callers holding
/// only file metadata can check this before reading the payload.
pub fn check_attachment_size(filename: &str, size: u64, max_bytes: u64) -> DomainResult<()> {
    if size > max_bytes {
        return Err(DomainError::validation(format!(
            "attachment '{filename}' is {size} bytes, larger than the {max_bytes} byte limit"
        )));
    }
    Ok(())
}

/// Best-effort MIME type from a file extension. Unknown extensions map to
/// `application/octet-stream`.
pub fn guess_mime_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
