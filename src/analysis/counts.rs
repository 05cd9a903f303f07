//! Counting passes: message/token totals, length stats, effort balance and
//! the keyword tracker.

use std::collections::{BTreeMap, HashSet};

use crate::models::Message;
use crate::text::tokenize;

use super::report::{
    BalanceOfEffort, BasicStats, DateRange, EffortShare, KeywordTracker, LengthSummary,
    MessageLengthStats,
};
use super::{leader, round1};

pub(crate) fn basic_stats(all: &[Message], users: &[&Message]) -> BasicStats {
    let mut message_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut word_counts: BTreeMap<String, usize> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        *message_counts.entry(sender.clone()).or_default() += 1;
        *word_counts.entry(sender.clone()).or_default() += tokenize(&msg.text).len();
    }

    // Timestamps are not guaranteed ordered, so scan for the extremes.
    let date_range = {
        let start = all.iter().map(|m| m.timestamp.date()).min();
        let end = all.iter().map(|m| m.timestamp.date()).max();
        match (start, end) {
            (Some(start), Some(end)) => Some(DateRange {
                start,
                end,
                duration_days: (end - start).num_days(),
            }),
            _ => None,
        }
    };

    BasicStats {
        total_messages: all.len(),
        senders: message_counts.keys().cloned().collect(),
        message_counts,
        word_counts,
        date_range,
    }
}

pub(crate) fn message_length_stats(users: &[&Message]) -> MessageLengthStats {
    let mut lengths: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        lengths
            .entry(sender.clone())
            .or_default()
            .push(msg.text.split_whitespace().count());
    }

    let per_sender = lengths
        .into_iter()
        .map(|(sender, mut lens)| {
            lens.sort_unstable();
            let total: usize = lens.iter().sum();
            let summary = LengthSummary {
                avg: round1(total as f64 / lens.len() as f64),
                min: lens[0],
                max: lens[lens.len() - 1],
                median: lens[lens.len() / 2],
            };
            (sender, summary)
        })
        .collect();

    MessageLengthStats { per_sender }
}

pub(crate) fn balance_of_effort(stats: &BasicStats) -> BalanceOfEffort {
    let total: usize = stats.message_counts.values().sum();
    if total == 0 {
        return BalanceOfEffort::default();
    }

    let mut per_sender: BTreeMap<String, EffortShare> = BTreeMap::new();
    for (sender, &count) in &stats.message_counts {
        let words = stats.word_counts.get(sender).copied().unwrap_or(0);
        per_sender.insert(
            sender.clone(),
            EffortShare {
                message_percentage: round1(count as f64 / total as f64 * 100.0),
                avg_words_per_message: round1(words as f64 / count as f64),
                total_messages: count,
                total_words: words,
            },
        );
    }

    let message_leader = leader(&stats.message_counts);
    let word_leader = leader(&stats.word_counts);

    let insight = if per_sender.len() == 2 {
        let shares: Vec<(&String, &EffortShare)> = per_sender.iter().collect();
        let (a, b) = (shares[0], shares[1]);
        let pct_diff = (a.1.message_percentage - b.1.message_percentage).abs();
        let word_diff = (a.1.avg_words_per_message - b.1.avg_words_per_message).abs();
        if pct_diff > 20.0 {
            let top = if a.1.message_percentage > b.1.message_percentage {
                a
            } else {
                b
            };
            format!(
                "{} carries the conversation with {}% of all messages",
                top.0, top.1.message_percentage
            )
        } else if word_diff > 5.0 {
            let top = if a.1.avg_words_per_message > b.1.avg_words_per_message {
                a
            } else {
                b
            };
            format!("{} writes noticeably longer messages", top.0)
        } else {
            "The effort is well balanced on both sides".to_string()
        }
    } else {
        String::new()
    };

    BalanceOfEffort {
        per_sender,
        message_leader,
        word_leader,
        insight,
    }
}

pub(crate) fn keyword_tracker(users: &[&Message]) -> KeywordTracker {
    let mut overall: BTreeMap<String, usize> = BTreeMap::new();
    let mut per_sender: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let by_sender = per_sender.entry(sender.clone()).or_default();
        for token in tokenize(&msg.text) {
            *overall.entry(token.clone()).or_default() += 1;
            *by_sender.entry(token).or_default() += 1;
        }
    }

    let sender_common_words = per_sender
        .iter()
        .map(|(sender, words)| (sender.clone(), top_n(words, 20)))
        .collect();

    let unique_words_per_sender = per_sender
        .iter()
        .map(|(sender, words)| (sender.clone(), words.len()))
        .collect();

    let shared_words = if per_sender.len() == 2 {
        let vocabs: Vec<HashSet<&String>> = per_sender
            .values()
            .map(|words| words.keys().collect())
            .collect();
        let mut shared: Vec<&String> = vocabs[0].intersection(&vocabs[1]).copied().collect();
        shared.sort_by(|a, b| {
            let (fa, fb) = (overall[*a], overall[*b]);
            fb.cmp(&fa).then_with(|| a.cmp(b))
        });
        shared.into_iter().take(20).cloned().collect()
    } else {
        Vec::new()
    };

    KeywordTracker {
        overall_common_words: top_n(&overall, 50),
        sender_common_words,
        shared_words,
        unique_words_per_sender,
    }
}

/// Top `n` entries by count, ties broken alphabetically.
pub(crate) fn top_n(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(word, &count)| (word.clone(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
