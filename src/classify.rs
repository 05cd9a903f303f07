//! Line Classifier: decides which header grammar, if any, a physical line
//! matches and extracts its raw fields.
//!
//! Grammars are anchored prefix patterns tried in a fixed priority order, so
//! two grammars can only compete when one is a strict refinement of the other
//! (user-with-sender before the sender-less system form); the earlier grammar
//! wins and that IS the disambiguation rule.

use lazy_static::lazy_static;
use regex::Regex;

/// Outcome of classifying one physical line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Header line with a sender: `timestamp`, `sender`, `text`.
    User { ts: &'a str, sender: &'a str, text: &'a str },
    /// Header line without a sender, a system/notification record.
    System { ts: &'a str, text: &'a str },
    /// Continuation text for the currently open message, if any.
    NoMatch,
}

// Shared fragments. A timestamp needs a date, a comma or space, and an
// `hh:mm` clock with optional seconds and optional AM/PM marker. The
// optional leading \u{200E}/\u{200F} covers the direction marks some
// exports prepend.
const BIDI: &str = "[\\x{200E}\\x{200F}]*";
const DASH_TS: &str =
    "\\d{1,2}[/.\\-]\\d{1,2}[/.\\-]\\d{2,4},?\\s+\\d{1,2}:\\d{2}(?::\\d{2})?\
     (?:[\\s\\x{202F}]*[apAP]\\.?\\s?[mM]\\.?)?";
const BRACKET_TS: &str =
    "[^,\\]]+,[\\s\\x{202F}]*\\d{1,2}:\\d{2}(?::\\d{2})?\
     (?:[\\s\\x{202F}]*[apAP]\\.?\\s?[mM]\\.?)?";
const ISO_TS: &str =
    "\\d{4}-\\d{2}-\\d{2}T\\d{2}:\\d{2}:\\d{2}(?:\\.\\d+)?(?:Z|[+\\-]\\d{2}:?\\d{2})?";

lazy_static! {
    static ref RE_BRACKET_USER: Regex = Regex::new(&format!(
        "^{BIDI}\\[(?P<ts>{BRACKET_TS})\\]\\s*(?P<sender>[^:]+):\\s?(?P<text>.*)$"
    ))
    .unwrap();
    static ref RE_DASH_USER: Regex = Regex::new(&format!(
        "^{BIDI}(?P<ts>{DASH_TS})\\s*-\\s*(?P<sender>[^:]+):\\s?(?P<text>.*)$"
    ))
    .unwrap();
    static ref RE_DASH_SYSTEM: Regex = Regex::new(&format!(
        "^{BIDI}(?P<ts>{DASH_TS})\\s*-\\s*(?P<text>.+)$"
    ))
    .unwrap();
    static ref RE_BRACKET_SYSTEM: Regex = Regex::new(&format!(
        "^{BIDI}\\[(?P<ts>{BRACKET_TS})\\]\\s*(?P<text>.+)$"
    ))
    .unwrap();
    static ref RE_ISO_USER: Regex = Regex::new(&format!(
        "^(?P<ts>{ISO_TS})\\s*-\\s*(?P<sender>[^:]+):\\s?(?P<text>.*)$"
    ))
    .unwrap();
}

/// Classifies one line. Only the first matching grammar applies.
pub fn classify(line: &str) -> LineClass<'_> {
    for re in [&*RE_BRACKET_USER, &*RE_DASH_USER] {
        if let Some(caps) = re.captures(line) {
            return LineClass::User {
                ts: caps.name("ts").map_or("", |m| m.as_str()).trim(),
                sender: caps.name("sender").map_or("", |m| m.as_str()).trim(),
                text: caps.name("text").map_or("", |m| m.as_str()),
            };
        }
    }
    for re in [&*RE_DASH_SYSTEM, &*RE_BRACKET_SYSTEM] {
        if let Some(caps) = re.captures(line) {
            return LineClass::System {
                ts: caps.name("ts").map_or("", |m| m.as_str()).trim(),
                text: caps.name("text").map_or("", |m| m.as_str()),
            };
        }
    }
    if let Some(caps) = RE_ISO_USER.captures(line) {
        return LineClass::User {
            ts: caps.name("ts").map_or("", |m| m.as_str()).trim(),
            sender: caps.name("sender").map_or("", |m| m.as_str()).trim(),
            text: caps.name("text").map_or("", |m| m.as_str()),
        };
    }
    LineClass::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_user_line() {
        assert_eq!(
            classify("06/03/2017, 00:45 - Sample User: This is a test message"),
            LineClass::User {
                ts: "06/03/2017, 00:45",
                sender: "Sample User",
                text: "This is a test message",
            }
        );
    }

    #[test]
    fn test_dash_user_with_meridiem() {
        assert_eq!(
            classify("3/6/18, 1:55 p.m. - Loris: one"),
            LineClass::User { ts: "3/6/18, 1:55 p.m.", sender: "Loris", text: "one" }
        );
        // Narrow no-break space before AM, as recent exports write it.
        assert_eq!(
            classify("3/6/18, 1:55\u{202F}PM - a: m"),
            LineClass::User { ts: "3/6/18, 1:55\u{202F}PM", sender: "a", text: "m" }
        );
    }

    #[test]
    fn test_bracket_user_line() {
        assert_eq!(
            classify("[23/10/21, 18:44:02] Iago: hello there"),
            LineClass::User { ts: "23/10/21, 18:44:02", sender: "Iago", text: "hello there" }
        );
    }

    #[test]
    fn test_bracket_user_with_direction_mark() {
        assert_eq!(
            classify("\u{200E}[23/10/21, 18:44:02] Iago: sticker omitted"),
            LineClass::User { ts: "23/10/21, 18:44:02", sender: "Iago", text: "sticker omitted" }
        );
    }

    #[test]
    fn test_dash_system_line() {
        assert_eq!(
            classify("06/03/2017, 00:45 - You created group \"Test\""),
            LineClass::System { ts: "06/03/2017, 00:45", text: "You created group \"Test\"" }
        );
    }

    #[test]
    fn test_bracket_system_line() {
        assert_eq!(
            classify("[23/10/21, 18:44] Messages are end-to-end encrypted"),
            LineClass::System { ts: "23/10/21, 18:44", text: "Messages are end-to-end encrypted" }
        );
    }

    #[test]
    fn test_iso_user_line() {
        assert_eq!(
            classify("2021-03-12T16:15:10 - ig_user: how are you"),
            LineClass::User { ts: "2021-03-12T16:15:10", sender: "ig_user", text: "how are you" }
        );
        assert_eq!(
            classify("2021-03-12T16:15:10.250Z - ig_user: hi"),
            LineClass::User { ts: "2021-03-12T16:15:10.250Z", sender: "ig_user", text: "hi" }
        );
    }

    #[test]
    fn test_user_grammar_wins_over_system() {
        // A colon after the dash means sender form, even though the system
        // grammar would also match the line.
        match classify("06/03/2017, 00:45 - Luke: hello") {
            LineClass::User { sender, .. } => assert_eq!(sender, "Luke"),
            other => panic!("expected user line, got {other:?}"),
        }
    }

    #[test]
    fn test_continuation_lines_do_not_match() {
        assert_eq!(classify("just a plain continuation line"), LineClass::NoMatch);
        assert_eq!(classify(""), LineClass::NoMatch);
        // A bare date without a clock is not a header.
        assert_eq!(classify("2016-04-29"), LineClass::NoMatch);
        // Timestamp-like text mid-line does not match the anchors.
        assert_eq!(classify("see you at 06/03/2017, 00:45 - ok?"), LineClass::NoMatch);
    }

    #[test]
    fn test_dashed_and_dotted_date_separators() {
        match classify("03-06-2018, 01:55 - a: m") {
            LineClass::User { ts, .. } => assert_eq!(ts, "03-06-2018, 01:55"),
            other => panic!("expected user line, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_still_classifies_as_user() {
        assert_eq!(
            classify("03/02/17, 18:42 - Luke: "),
            LineClass::User { ts: "03/02/17, 18:42", sender: "Luke", text: "" }
        );
    }
}
