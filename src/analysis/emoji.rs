//! Emoji frequency tables and the emoji leader.

use std::collections::BTreeMap;

use crate::models::Message;
use crate::text::extract_emojis;

use super::leader;
use super::report::EmojiStats;

pub(crate) fn emoji_stats(users: &[&Message]) -> EmojiStats {
    let mut overall: BTreeMap<String, usize> = BTreeMap::new();
    let mut details: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        for run in extract_emojis(&msg.text) {
            *overall.entry(run.to_string()).or_default() += 1;
            *details
                .entry(sender.clone())
                .or_default()
                .entry(run.to_string())
                .or_default() += 1;
        }
    }

    let total_emojis = overall.values().sum();
    let unique_emojis = overall.len();

    let mut top_emojis: Vec<(String, usize)> = overall
        .iter()
        .map(|(run, &count)| (run.clone(), count))
        .collect();
    top_emojis.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_emojis.truncate(20);

    let sender_emoji_totals: BTreeMap<String, usize> = details
        .iter()
        .map(|(sender, runs)| (sender.clone(), runs.values().sum()))
        .collect();

    let mut sender_top_emoji = BTreeMap::new();
    for (sender, runs) in &details {
        if let Some(favourite) = leader(runs) {
            let count = runs[&favourite];
            sender_top_emoji.insert(sender.clone(), (favourite, count));
        }
    }

    let emoji_leader =
        leader(&sender_emoji_totals).filter(|name| sender_emoji_totals[name] > 0);

    EmojiStats {
        total_emojis,
        unique_emojis,
        top_emojis,
        sender_emoji_totals,
        sender_emoji_details: details,
        sender_top_emoji,
        emoji_leader,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::{msg, refs};

    #[test]
    fn test_emoji_counts_per_sender() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "so funny 😂"),
            msg("2024-01-01 10:01", "Alice", "😂"),
            msg("2024-01-01 10:02", "Bob", "nice 🎉"),
        ];
        let stats = emoji_stats(&refs(&msgs));
        assert_eq!(stats.total_emojis, 3);
        assert_eq!(stats.unique_emojis, 2);
        assert_eq!(stats.top_emojis[0], ("😂".to_string(), 2));
        assert_eq!(stats.sender_emoji_totals["Alice"], 2);
        assert_eq!(stats.emoji_leader.as_deref(), Some("Alice"));
        assert_eq!(stats.sender_top_emoji["Bob"].0, "🎉");
    }

    #[test]
    fn test_leader_ties_break_alphabetically() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Bob", "😂"),
            msg("2024-01-01 10:01", "Alice", "🎉"),
        ];
        let stats = emoji_stats(&refs(&msgs));
        assert_eq!(stats.emoji_leader.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_no_emojis() {
        let msgs = vec![msg("2024-01-01 10:00", "Alice", "plain words only")];
        let stats = emoji_stats(&refs(&msgs));
        assert_eq!(stats.total_emojis, 0);
        assert_eq!(stats.emoji_leader, None);
        assert!(stats.top_emojis.is_empty());
    }
}
