//! Uploaded transcript handling.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("File too large")]
    TooLarge { size: usize, limit: usize },
}

/// Decode uploaded bytes as UTF-8. Invalid sequences are replaced with
/// U+FFFD rather than rejected; a leading byte-order mark is kept.
pub fn decode_transcript(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decode an uploaded file, enforcing the size ceiling first.
pub fn read_transcript(bytes: Option<&[u8]>, limit: usize) -> Result<String, UploadError> {
    let bytes = bytes.ok_or(UploadError::MissingFile)?;

    if bytes.len() > limit {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    Ok(decode_transcript(bytes))
}
