//! Text acquisition — decodes an uploaded resume into a plain string before
//! it reaches the extractor.
//!
//! Decode problems never escape as raw errors: the caller always gets a
//! `DecodedUpload` with empty text plus a typed failure it can surface
//! out-of-band, and scoring proceeds as a valid zero result.

use serde::Serialize;
use thiserror::Error;

/// Upload size cap. Resumes are realistically a few hundred KB at most.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Why an upload could not be decoded into text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DecodeFailure {
    #[error("unsupported resume format '{0}' (expected PDF or plain text)")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("resume is not valid UTF-8: {0}")]
    Encoding(String),
}

/// Result of decoding one upload. On failure `text` is empty and `failure`
/// carries the reason.
#[derive(Debug)]
pub struct DecodedUpload {
    pub text: String,
    pub failure: Option<DecodeFailure>,
}

impl DecodedUpload {
    fn ok(text: String) -> Self {
        DecodedUpload {
            text,
            failure: None,
        }
    }

    fn failed(failure: DecodeFailure) -> Self {
        DecodedUpload {
            text: String::new(),
            failure: Some(failure),
        }
    }
}

enum UploadFormat {
    Pdf,
    Plain,
}

/// Decodes an uploaded file into resume text. The format is taken from the
/// declared content type when present, otherwise from the file extension.
pub fn decode_upload(filename: &str, content_type: Option<&str>, data: &[u8]) -> DecodedUpload {
    match resolve_format(filename, content_type) {
        Ok(UploadFormat::Pdf) => match pdf_extract::extract_text_from_mem(data) {
            Ok(text) => DecodedUpload::ok(text),
            Err(e) => DecodedUpload::failed(DecodeFailure::Pdf(e.to_string())),
        },
        Ok(UploadFormat::Plain) => match std::str::from_utf8(data) {
            Ok(text) => DecodedUpload::ok(text.to_string()),
            Err(e) => DecodedUpload::failed(DecodeFailure::Encoding(e.to_string())),
        },
        Err(label) => DecodedUpload::failed(DecodeFailure::UnsupportedFormat(label)),
    }
}

fn resolve_format(filename: &str, content_type: Option<&str>) -> Result<UploadFormat, String> {
    match content_type {
        Some("application/pdf") => return Ok(UploadFormat::Pdf),
        Some("text/plain") => return Ok(UploadFormat::Plain),
        // Browsers commonly send octet-stream for .txt; fall through to the
        // extension check.
        Some("application/octet-stream") | None => {}
        Some(other) => return Err(other.to_string()),
    }
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "pdf" => Ok(UploadFormat::Pdf),
        "txt" | "text" => Ok(UploadFormat::Plain),
        _ => Err(filename.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_decodes() {
        let decoded = decode_upload("resume.txt", Some("text/plain"), b"Python and SQL");
        assert_eq!(decoded.text, "Python and SQL");
        assert!(decoded.failure.is_none());
    }

    #[test]
    fn test_extension_fallback_when_content_type_is_generic() {
        let decoded = decode_upload("resume.txt", Some("application/octet-stream"), b"hello");
        assert_eq!(decoded.text, "hello");
        assert!(decoded.failure.is_none());
    }

    #[test]
    fn test_unsupported_format_yields_empty_text_and_signal() {
        let decoded = decode_upload("resume.docx", None, b"PK\x03\x04");
        assert!(decoded.text.is_empty());
        assert!(matches!(
            decoded.failure,
            Some(DecodeFailure::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_content_type_wins_over_extension() {
        let decoded = decode_upload("resume.txt", Some("application/msword"), b"text");
        assert!(decoded.text.is_empty());
        assert_eq!(
            decoded.failure,
            Some(DecodeFailure::UnsupportedFormat(
                "application/msword".to_string()
            ))
        );
    }

    #[test]
    fn test_invalid_utf8_yields_encoding_failure() {
        let decoded = decode_upload("resume.txt", Some("text/plain"), &[0xff, 0xfe, 0x00]);
        assert!(decoded.text.is_empty());
        assert!(matches!(decoded.failure, Some(DecodeFailure::Encoding(_))));
    }
}
