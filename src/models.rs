use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The container format of a chat export, selected once by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFormat {
    /// Line-oriented text export (WhatsApp-style, one header grammar per line).
    Text,
    /// JSON export carrying a message array (Instagram-style).
    Json,
}

impl ChatFormat {
    /// Maps a file path to its export format.
    ///
    /// Unknown extensions are a typed error, distinguishable from "parsed but
    /// empty": a caller that gets `Ok` with no messages had a readable file
    /// with no recognizable records in it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(ChatFormat::Text),
            "json" => Ok(ChatFormat::Json),
            other => Err(ParseError::UnsupportedExtension(other.to_string())),
        }
    }
}

/// One normalized chat message.
///
/// Messages keep file order; timestamps are NOT guaranteed non-decreasing
/// (clock skew and multi-timezone exports happen) and downstream code must
/// not assume monotonicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Timezone-naive point in time. Offset-bearing source timestamps are
    /// collapsed to their UTC-naive instant.
    pub timestamp: NaiveDateTime,
    /// Display name of the author; `None` for system/notification lines.
    pub sender: Option<String>,
    /// Message body; continuation lines are joined with `\n`.
    pub text: String,
    /// True for non-user notification lines (group created, renames, etc).
    pub is_system: bool,
    /// True when no timestamp dialect matched and the parser substituted the
    /// current wall-clock time. Lets downstream analytics down-weight or
    /// exclude such records instead of silently trusting them.
    #[serde(default)]
    pub timestamp_guessed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ChatFormat::from_path("chat.txt").unwrap(), ChatFormat::Text);
        assert_eq!(ChatFormat::from_path("export.JSON").unwrap(), ChatFormat::Json);
        assert_eq!(
            ChatFormat::from_path("/tmp/a/b/history.Txt").unwrap(),
            ChatFormat::Text
        );
    }

    #[test]
    fn test_format_rejects_unknown_extension() {
        assert!(matches!(
            ChatFormat::from_path("chat.csv"),
            Err(ParseError::UnsupportedExtension(ext)) if ext == "csv"
        ));
        assert!(matches!(
            ChatFormat::from_path("chat"),
            Err(ParseError::UnsupportedExtension(ext)) if ext.is_empty()
        ));
    }
}
