//! Who opens conversations, who writes first each day, and turn-taking flow.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::lexicon::{CONVERSATION_GAP_MINUTES, STARTER_SET};
use crate::models::Message;

use super::report::{
    CalendarFirst, ConversationFlow, ConversationStarters, TurnStats, WhoThinksFirst,
};
use super::{leader, round1};

pub(crate) fn conversation_starters(users: &[&Message]) -> ConversationStarters {
    let mut starts: BTreeMap<String, u32> = BTreeMap::new();
    let mut starter_words: BTreeMap<String, u32> = BTreeMap::new();

    let mut prev: Option<&Message> = None;
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let opens = match prev {
            None => true,
            Some(p) => {
                (msg.timestamp - p.timestamp).num_seconds() as f64 / 60.0
                    > CONVERSATION_GAP_MINUTES
            }
        };
        if opens {
            *starts.entry(sender.clone()).or_default() += 1;
            if let Some(word) = starter_word(&msg.text) {
                *starter_words.entry(word).or_default() += 1;
            }
        }
        prev = Some(*msg);
    }

    let initiator_leader = leader(&starts);
    let title = match &initiator_leader {
        Some(name) => format!("{name} usually gets things going"),
        None => String::new(),
    };

    ConversationStarters {
        top_starter_word: leader(&starter_words),
        starts,
        starter_words,
        initiator_leader,
        title,
    }
}

pub(crate) fn who_thinks_first(users: &[&Message]) -> WhoThinksFirst {
    let mut by_day: BTreeMap<NaiveDate, Vec<&&Message>> = BTreeMap::new();
    for msg in users {
        by_day.entry(msg.timestamp.date()).or_default().push(msg);
    }

    let mut first_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut first_minutes: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    let mut calendar = Vec::new();
    for (date, mut day_msgs) in by_day {
        day_msgs.sort_by_key(|m| m.timestamp);
        let first = day_msgs[0];
        let Some(sender) = &first.sender else { continue };
        *first_counts.entry(sender.clone()).or_default() += 1;
        let minutes = first.timestamp.format("%H:%M").to_string();
        first_minutes
            .entry(sender.clone())
            .or_default()
            .push(clock_minutes(&first.timestamp));
        calendar.push(CalendarFirst {
            date,
            sender: sender.clone(),
            time: minutes,
            preview: first.text.chars().take(50).collect(),
        });
    }

    let total_days = calendar.len();
    let mut percentages = BTreeMap::new();
    for (sender, &count) in &first_counts {
        percentages.insert(
            sender.clone(),
            round1(count as f64 / total_days as f64 * 100.0),
        );
    }

    let avg_first_times = first_minutes
        .into_iter()
        .map(|(sender, minutes)| {
            let avg = minutes.iter().sum::<u32>() / minutes.len() as u32;
            (sender, format!("{:02}:{:02}", avg / 60, avg % 60))
        })
        .collect();

    let most_frequent_first = leader(&first_counts);
    let insight = match &most_frequent_first {
        Some(name) => {
            let share = percentages.get(name).copied().unwrap_or(0.0);
            if share >= 70.0 {
                format!("{name} almost always texts first")
            } else if share >= 60.0 {
                format!("{name} usually texts first")
            } else if share >= 55.0 {
                format!("{name} texts first slightly more often")
            } else {
                "You both reach out about equally".to_string()
            }
        }
        None => String::new(),
    };

    WhoThinksFirst {
        first_counts,
        percentages,
        avg_first_times,
        most_frequent_first,
        total_days,
        calendar,
        insight,
    }
}

pub(crate) fn conversation_flow(users: &[&Message]) -> ConversationFlow {
    let mut turn_lengths: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    let mut current: Option<(String, u32)> = None;
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        match &mut current {
            Some((owner, len)) if owner == sender => *len += 1,
            _ => {
                if let Some((owner, len)) = current.take() {
                    turn_lengths.entry(owner).or_default().push(len);
                }
                current = Some((sender.clone(), 1));
            }
        }
    }
    if let Some((owner, len)) = current {
        turn_lengths.entry(owner).or_default().push(len);
    }

    let mut total_turns = 0usize;
    let turn_stats = turn_lengths
        .into_iter()
        .map(|(sender, lens)| {
            total_turns += lens.len();
            let stats = TurnStats {
                avg_turn_length: round1(
                    lens.iter().sum::<u32>() as f64 / lens.len() as f64,
                ),
                max_turn_length: lens.iter().copied().max().unwrap_or(0),
                total_turns: lens.len() as u32,
            };
            (sender, stats)
        })
        .collect();

    ConversationFlow {
        turn_stats,
        total_turns,
    }
}

/// Finds a greeting among the first three words of an opening message.
///
/// Each word is matched exactly against the starter lexicon, so "hiiii"
/// counts as "hiiii" rather than as a prefix hit on "hi". Two-word
/// greetings like "good morning" are matched as adjacent word pairs.
fn starter_word(text: &str) -> Option<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .take(3)
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .collect();
    for (i, word) in words.iter().enumerate() {
        if STARTER_SET.contains(word.as_str()) {
            return Some(word.clone());
        }
        if let Some(next) = words.get(i + 1) {
            let pair = format!("{word} {next}");
            if STARTER_SET.contains(pair.as_str()) {
                return Some(pair);
            }
        }
    }
    None
}

/// Minutes past midnight.
fn clock_minutes(ts: &chrono::NaiveDateTime) -> u32 {
    use chrono::Timelike;
    ts.hour() * 60 + ts.minute()
}
