//! Attachment intake for the chat session.
//!
//! One text or PDF file may be staged per outgoing message. Files are
//! accepted by declared media type only -- no content sniffing. Text
//! files contribute their UTF-8 content; PDF extraction is not
//! implemented, so PDFs contribute a fixed placeholder. The attachment
//! never becomes its own persisted entity; its text is folded into the
//! next message's content.

use polychat_types::error::AttachmentError;

/// Declared media type for plain text attachments.
pub const MEDIA_TYPE_TEXT: &str = "text/plain";

/// Declared media type for PDF attachments.
pub const MEDIA_TYPE_PDF: &str = "application/pdf";

/// Stand-in content for PDF attachments.
pub const PDF_PLACEHOLDER: &str =
    "[PDF content attached - text extraction is not implemented]";

/// A staged attachment, reduced to the text it contributes.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub text: String,
}

impl Attachment {
    /// Build an attachment from raw bytes and the caller-declared media
    /// type.
    ///
    /// `text/plain` must be valid UTF-8; `application/pdf` yields the
    /// placeholder without inspecting the bytes; anything else is
    /// rejected.
    pub fn from_bytes(
        name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> Result<Self, AttachmentError> {
        let text = match media_type {
            MEDIA_TYPE_TEXT => String::from_utf8(bytes.to_vec())
                .map_err(|_| AttachmentError::InvalidText)?,
            MEDIA_TYPE_PDF => PDF_PLACEHOLDER.to_string(),
            other => return Err(AttachmentError::Unsupported(other.to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            text,
        })
    }
}

/// Media type declared for a file name, from its extension alone.
///
/// Only `.txt` and `.pdf` have declared types; everything else is
/// undeclared and rejected before any read.
pub fn declared_media_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    match ext.as_deref() {
        Some("txt") => Some(MEDIA_TYPE_TEXT),
        Some("pdf") => Some(MEDIA_TYPE_PDF),
        _ => None,
    }
}
