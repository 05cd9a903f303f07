use thiserror::Error;

/// Errors produced while ingesting a chat export.
///
/// Parsing itself is lenient (unrecognized lines and bad timestamps are
/// absorbed, never raised); these variants only cover problems with the file
/// container itself.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file extension maps to no supported export format.
    #[error("unsupported file extension {0:?}, expected .txt or .json")]
    UnsupportedExtension(String),

    #[error("failed to read chat export")]
    Io(#[from] std::io::Error),

    #[error("chat export is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("malformed JSON export")]
    Json(#[from] serde_json::Error),
}
