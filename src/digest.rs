//! Compact conversation digest and free-text insight generation.
//!
//! The digest is the only thing an insight backend ever sees: participant
//! list, headline numbers and a bounded sample of raw messages. Backends
//! implement [`InsightGenerator`]; [`FallbackInsights`] is the built-in,
//! fully deterministic one used when no external generator is wired up.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::lexicon::MAX_DIGEST_SAMPLE;
use crate::models::Message;

/// Bounded summary of one conversation, safe to hand to any backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatDigest {
    pub participants: Vec<String>,
    pub total_messages: usize,
    pub message_counts: BTreeMap<String, usize>,
    pub avg_words_per_message: BTreeMap<String, f64>,
    /// Mean analysis tokens per user message across the whole chat.
    pub avg_message_length: f64,
    pub date_range_days: i64,
    pub most_active_hour: Option<u32>,
    pub sample: Vec<SampledMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampledMessage {
    pub sender: String,
    pub text: String,
}

/// Five free-text sections describing one conversation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatInsights {
    pub summary: String,
    pub communication_style: String,
    pub engagement: String,
    pub relationship_balance: String,
    pub fun_facts: Vec<String>,
}

pub trait InsightGenerator {
    fn generate(&self, digest: &ChatDigest) -> ChatInsights;
}

/// Builds the digest from a parsed conversation and its computed report.
///
/// The sample takes every `len/50`-th user message up to the cap, so in a
/// large chat it is a thinned slice of the earlier portion rather than a
/// spread over the whole history.
pub fn build_digest(messages: &[Message], report: &AnalysisReport) -> ChatDigest {
    let users: Vec<&Message> = messages
        .iter()
        .filter(|m| !m.is_system && m.sender.is_some())
        .collect();

    let stride = (users.len() / 50).max(1);
    let sample: Vec<SampledMessage> = users
        .iter()
        .step_by(stride)
        .take(MAX_DIGEST_SAMPLE)
        .filter_map(|m| {
            m.sender.as_ref().map(|sender| SampledMessage {
                sender: sender.clone(),
                text: m.text.chars().take(100).collect(),
            })
        })
        .collect();

    let avg_words_per_message = report
        .balance_of_effort
        .per_sender
        .iter()
        .map(|(sender, share)| (sender.clone(), share.avg_words_per_message))
        .collect();

    let total_user: usize = report.basic_stats.message_counts.values().sum();
    let total_words: usize = report.basic_stats.word_counts.values().sum();
    let avg_message_length = if total_user == 0 {
        0.0
    } else {
        total_words as f64 / total_user as f64
    };

    ChatDigest {
        participants: report.basic_stats.senders.clone(),
        total_messages: report.basic_stats.total_messages,
        message_counts: report.basic_stats.message_counts.clone(),
        avg_words_per_message,
        avg_message_length,
        date_range_days: report
            .basic_stats
            .date_range
            .as_ref()
            .map_or(0, |r| r.duration_days),
        most_active_hour: report.time_analysis.most_active_hour,
        sample,
    }
}

/// Deterministic, threshold-based insight text. No I/O, no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackInsights;

impl InsightGenerator for FallbackInsights {
    fn generate(&self, digest: &ChatDigest) -> ChatInsights {
        ChatInsights {
            summary: summary(digest),
            communication_style: communication_style(digest),
            engagement: engagement(digest),
            relationship_balance: relationship_balance(digest),
            fun_facts: fun_facts(digest),
        }
    }
}

fn summary(digest: &ChatDigest) -> String {
    let names = digest.participants.join(" and ");
    let scale = if digest.total_messages >= 10_000 {
        "an epic, sprawling conversation"
    } else if digest.total_messages >= 5_000 {
        "a long-running conversation"
    } else {
        "a conversation"
    };
    format!(
        "This is {} between {}: {} messages over {} days.",
        scale, names, digest.total_messages, digest.date_range_days
    )
}

fn communication_style(digest: &ChatDigest) -> String {
    let mut lines = Vec::new();
    for (sender, &avg) in &digest.avg_words_per_message {
        let style = if avg > 10.0 {
            "writes detailed, expressive messages"
        } else if avg > 5.0 {
            "keeps messages balanced in length"
        } else {
            "keeps it short and snappy"
        };
        lines.push(format!("{sender} {style}."));
    }
    lines.join(" ")
}

fn engagement(digest: &ChatDigest) -> String {
    let total: usize = digest.message_counts.values().sum();
    if total == 0 {
        return String::new();
    }
    let mut top: Option<(&String, usize)> = None;
    for (sender, &count) in &digest.message_counts {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((sender, count));
        }
    }
    match top {
        Some((sender, count)) if count as f64 / total as f64 > 0.6 => {
            format!("{sender} clearly drives this conversation.")
        }
        Some((sender, count)) if count as f64 / total as f64 > 0.4 => {
            format!("Everyone stays engaged, with {sender} slightly ahead.")
        }
        _ => "Participation is spread thin across the chat.".to_string(),
    }
}

fn relationship_balance(digest: &ChatDigest) -> String {
    if digest.message_counts.len() != 2 {
        return "Balance reads best in one-on-one chats.".to_string();
    }
    let counts: Vec<usize> = digest.message_counts.values().copied().collect();
    let total = counts[0] + counts[1];
    if total == 0 {
        return String::new();
    }
    let diff = counts[0].abs_diff(counts[1]) as f64;
    if diff < total as f64 * 0.1 {
        "A remarkably balanced exchange, nearly message for message.".to_string()
    } else if diff < total as f64 * 0.3 {
        "A reasonably balanced exchange with one side a little chattier.".to_string()
    } else {
        "A fairly one-sided exchange.".to_string()
    }
}

fn fun_facts(digest: &ChatDigest) -> Vec<String> {
    let mut facts = Vec::new();
    if digest.total_messages > 10_000 {
        facts.push("Over ten thousand messages and counting.".to_string());
    } else if digest.total_messages > 1_000 {
        facts.push("Past the thousand-message mark.".to_string());
    }
    if digest.date_range_days > 365 {
        facts.push("This chat has been going for more than a year.".to_string());
    } else if digest.date_range_days > 30 {
        facts.push("This chat has been going for over a month.".to_string());
    }
    if digest.date_range_days > 0 {
        let daily = digest.total_messages as f64 / digest.date_range_days as f64;
        if daily > 50.0 {
            facts.push("An intense pace: dozens of messages every single day.".to_string());
        } else if daily > 10.0 {
            facts.push("A steady daily rhythm of messages.".to_string());
        }
    }
    if let Some(hour) = digest.most_active_hour {
        if hour < 6 || hour > 22 {
            facts.push("Peak chatting happens deep in the night.".to_string());
        } else if (9..=17).contains(&hour) {
            facts.push("Mostly a daytime conversation.".to_string());
        }
    }
    facts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::analyze;
    use crate::analysis::tests::msg;

    fn sample_chat() -> Vec<Message> {
        let mut msgs = Vec::new();
        for day in 1..=5 {
            msgs.push(msg(
                &format!("2024-01-{day:02} 10:00"),
                "Alice",
                "a reasonably wordy message with plenty of substance in it",
            ));
            msgs.push(msg(&format!("2024-01-{day:02} 10:05"), "Bob", "yep"));
        }
        msgs
    }

    #[test]
    fn test_digest_carries_headline_numbers() {
        let msgs = sample_chat();
        let report = analyze(&msgs);
        let digest = build_digest(&msgs, &report);
        assert_eq!(digest.participants, vec!["Alice", "Bob"]);
        assert_eq!(digest.total_messages, 10);
        assert_eq!(digest.date_range_days, 4);
        assert_eq!(digest.most_active_hour, Some(10));
        assert_eq!(digest.avg_message_length, 3.0);
        assert_eq!(digest.sample.len(), 10);
    }

    #[test]
    fn test_sample_is_bounded() {
        let mut msgs = Vec::new();
        for i in 0..2000 {
            msgs.push(msg(
                &format!("2024-01-01 {:02}:{:02}", i / 100, i % 60),
                "Alice",
                "filler",
            ));
        }
        let report = analyze(&msgs);
        let digest = build_digest(&msgs, &report);
        assert_eq!(digest.sample.len(), 20);
    }

    #[test]
    fn test_fallback_sections_are_deterministic() {
        let msgs = sample_chat();
        let report = analyze(&msgs);
        let digest = build_digest(&msgs, &report);
        let first = FallbackInsights.generate(&digest);
        let second = FallbackInsights.generate(&digest);
        assert_eq!(first.summary, second.summary);
        assert!(first.summary.contains("Alice and Bob"));
        assert!(first.communication_style.contains("Alice"));
        assert!(!first.relationship_balance.is_empty());
    }

    #[test]
    fn test_fallback_on_empty_digest() {
        let insights = FallbackInsights.generate(&ChatDigest::default());
        assert!(insights.summary.contains("0 messages"));
        assert_eq!(insights.engagement, "");
        assert!(insights.fun_facts.is_empty());
    }
}
