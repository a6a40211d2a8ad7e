//! MIME decomposition — splits a raw email into body text and at most
//! one attachment.
//!
//! Only the first declared attachment is surfaced; any further ones are
//! ignored. Downstream consumers expect a single relocated file per
//! message, so this stays first-only.

use mail_parser::{MessageParser, MimeHeaders};

use crate::error::ExtractError;

/// Fallback filename for attachments with no declared name.
const UNNAMED_ATTACHMENT: &str = "attachment.bin";

/// Content extracted from one raw email. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// First plain-text body part, if the message has one.
    ///
    /// `None` means no plain-text part existed at all — distinct from an
    /// empty string, which means the part was present but blank.
    pub body: Option<String>,
    /// First declared attachment, transport-decoded.
    pub attachment: Option<EmailAttachment>,
}

/// A decoded attachment payload plus its declared filename.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub payload: Vec<u8>,
}

/// Parse a raw email byte stream into body text and an optional attachment.
pub fn extract_content(raw: &[u8]) -> Result<ExtractedContent, ExtractError> {
    let message = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| ExtractError::Malformed("unparseable message".into()))?;

    // First text/plain body part only. mail-parser will down-convert an
    // HTML-only body into its text list, so check the declared type —
    // HTML-only mail yields no body here.
    let body = message.text_bodies().find_map(|part| {
        let is_plain = part
            .content_type()
            .map(|ct| {
                ct.ctype().eq_ignore_ascii_case("text")
                    && ct
                        .subtype()
                        .map(|s| s.eq_ignore_ascii_case("plain"))
                        .unwrap_or(true)
            })
            .unwrap_or(true);
        if is_plain {
            part.text_contents().map(str::to_string)
        } else {
            None
        }
    });

    // mail-parser hands back contents already decoded from the transport
    // encoding (base64 / quoted-printable).
    let attachment = message.attachments().next().map(|part| EmailAttachment {
        filename: part
            .attachment_name()
            .unwrap_or(UNNAMED_ATTACHMENT)
            .to_string(),
        payload: part.contents().to_vec(),
    });

    Ok(ExtractedContent { body, attachment })
}
