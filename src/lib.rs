//! Chat export parsing and conversation analytics.
//!
//! The parser turns WhatsApp-style text exports and JSON message dumps into a
//! flat list of [`Message`]s; the analytics engine computes a catalogue of
//! typed metrics over that list. Parsing preserves file order and never
//! reorders by timestamp.

pub mod analysis;
pub mod classify;
pub mod digest;
pub mod error;
pub mod lexicon;
pub mod models;
pub mod parser;
pub mod text;
pub mod timestamp;

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

pub use crate::analysis::{AnalysisReport, analyze};
pub use crate::digest::{ChatDigest, ChatInsights, FallbackInsights, InsightGenerator, build_digest};
pub use crate::error::ParseError;
pub use crate::models::{ChatFormat, Message};
pub use crate::parser::{parse_json, parse_text};

/// Parses a chat export file, selecting the parser by file extension.
///
/// The file is memory-mapped rather than read into an intermediate `String`,
/// which keeps peak memory low on very large exports. Unknown extensions are
/// rejected up front with [`ParseError::UnsupportedExtension`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Message>, ParseError> {
    let format = ChatFormat::from_path(&path)?;
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let input = std::str::from_utf8(&mmap)?;
    match format {
        ChatFormat::Text => Ok(parse_text(input)),
        ChatFormat::Json => parse_json(input),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_file_selects_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "12/01/2024, 10:30 - Alice: hello there").unwrap();
        let messages = parse_file(&path).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_parse_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.csv");
        File::create(&path).unwrap();
        match parse_file(&path) {
            Err(ParseError::UnsupportedExtension(ext)) => assert_eq!(ext, "csv"),
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_file_missing_file_is_io_error() {
        match parse_file("/definitely/not/here.txt") {
            Err(ParseError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
