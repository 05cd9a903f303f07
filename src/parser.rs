//! Message Assembler: drives the Line Classifier over a full line sequence,
//! folding continuation lines into the open message, plus the JSON ingestion
//! path for Instagram-style exports.

use serde_json::Value;
use tracing::debug;

use crate::classify::{LineClass, classify};
use crate::error::ParseError;
use crate::lexicon::MEDIA_PLACEHOLDER_SET;
use crate::models::Message;
use crate::timestamp::parse_timestamp;

/// The one message currently being accumulated, before its continuation
/// lines are joined and the flush filters run.
struct OpenMessage {
    timestamp: chrono::NaiveDateTime,
    timestamp_guessed: bool,
    sender: Option<String>,
    text: String,
    is_system: bool,
    continuation: Vec<String>,
}

/// Two-state assembler: `open == None` is Idle, `Some` is Accumulating.
/// The parser is strictly sequential; line order carries meaning.
#[derive(Default)]
struct Assembler {
    out: Vec<Message>,
    open: Option<OpenMessage>,
}

impl Assembler {
    fn header(&mut self, ts: &str, sender: Option<&str>, text: &str, is_system: bool) {
        self.flush();
        let (timestamp, timestamp_guessed) = parse_timestamp(ts);
        self.open = Some(OpenMessage {
            timestamp,
            timestamp_guessed,
            sender: sender.map(|s| s.to_string()),
            text: text.trim().to_string(),
            is_system,
            continuation: Vec::new(),
        });
    }

    fn continuation(&mut self, line: &str) {
        match &mut self.open {
            Some(open) => open.continuation.push(line.to_string()),
            // Pre-amble before the first header (export metadata) is dropped.
            None => {}
        }
    }

    /// Joins the continuation buffer and applies the flush filters: media
    /// placeholders and empty bodies never reach the output.
    fn flush(&mut self) {
        let Some(open) = self.open.take() else { return };
        let mut text = open.text;
        for line in &open.continuation {
            text.push('\n');
            text.push_str(line);
        }
        let text = text.trim().replace(['\u{200E}', '\u{200F}'], "");
        if text.is_empty() || MEDIA_PLACEHOLDER_SET.contains(text.as_str()) {
            return;
        }
        self.out.push(Message {
            timestamp: open.timestamp,
            sender: open.sender,
            text,
            is_system: open.is_system,
            timestamp_guessed: open.timestamp_guessed,
        });
    }

    fn finish(mut self) -> Vec<Message> {
        self.flush();
        self.out
    }
}

/// Parses a line-oriented text export. Never fails: unrecognized lines are
/// continuation text or pre-amble, bad timestamps fall back per policy.
pub fn parse_text(input: &str) -> Vec<Message> {
    let mut asm = Assembler::default();
    for line in input.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match classify(line) {
            LineClass::User { ts, sender, text } => asm.header(ts, Some(sender), text, false),
            LineClass::System { ts, text } => asm.header(ts, None, text, true),
            LineClass::NoMatch => asm.continuation(line),
        }
    }
    asm.finish()
}

/// Parses a JSON export.
///
/// Accepted container shapes, in order: an object with a `messages` array, a
/// bare array, or an object whose first array-of-objects value is adopted as
/// the message list. Malformed records are dropped, never fatal.
pub fn parse_json(input: &str) -> Result<Vec<Message>, ParseError> {
    let data: Value = serde_json::from_str(input)?;
    let empty: &[Value] = &[];
    let items = match &data {
        Value::Object(map) => match map.get("messages") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => map
                .values()
                .find_map(|v| match v {
                    Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                        Some(items.as_slice())
                    }
                    _ => None,
                })
                .unwrap_or(empty),
        },
        Value::Array(items) => items.as_slice(),
        _ => empty,
    };

    let mut out = Vec::with_capacity(items.len());
    for record in items {
        match json_record(record) {
            Some(msg) => out.push(msg),
            None => debug!("dropping JSON record without sender or text"),
        }
    }
    Ok(out)
}

/// One JSON record to one message. `None` when the record has no resolvable
/// sender or no text, which the flush policy drops.
fn json_record(record: &Value) -> Option<Message> {
    let sender = ["sender_name", "sender", "from"]
        .iter()
        .find_map(|k| record.get(k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    let text = ["content", "text"]
        .iter()
        .find_map(|k| record.get(k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    if MEDIA_PLACEHOLDER_SET.contains(text) {
        return None;
    }

    let (timestamp, timestamp_guessed) = match record.get("timestamp_ms").and_then(Value::as_i64) {
        Some(ms) => match chrono::DateTime::from_timestamp_millis(ms) {
            Some(ts) => (ts.naive_utc(), false),
            None => return None,
        },
        None => {
            let raw = ["created_at", "timestamp"]
                .iter()
                .find_map(|k| record.get(k).and_then(Value::as_str));
            match raw {
                Some(raw) => parse_timestamp(raw),
                // No timestamp field at all: same absorb-don't-abort policy
                // as an unparseable string.
                None => parse_timestamp(""),
            }
        }
    };

    Some(Message {
        timestamp,
        sender: Some(sender.to_string()),
        text: text.to_string(),
        is_system: false,
        timestamp_guessed,
    })
}
