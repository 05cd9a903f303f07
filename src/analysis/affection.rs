//! Affection scoring and the two-sender affection gauge.

use std::collections::BTreeMap;

use crate::lexicon::{AFFECTION_EMOJIS, AFFECTION_WORDS};
use crate::models::Message;
use crate::text::{emoji_chars, tokenize};

use super::report::AffectionScores;
use super::{leader, round1};

pub(crate) fn affection(users: &[&Message]) -> AffectionScores {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let tokens = tokenize(&msg.text);
        let word_hits = tokens
            .iter()
            .filter(|t| AFFECTION_WORDS.contains(t.as_str()))
            .count();
        let emoji_hits = emoji_chars(&msg.text)
            .filter(|ch| AFFECTION_EMOJIS.contains(ch))
            .count();
        let density = (word_hits + emoji_hits) as f64 / tokens.len().max(1) as f64;
        *sums.entry(sender.clone()).or_default() += density;
        *counts.entry(sender.clone()).or_default() += 1;
    }

    let scores: BTreeMap<String, f64> = counts
        .iter()
        .map(|(sender, &count)| {
            let score = round1(sums[sender] / count as f64 * 100.0);
            (sender.clone(), score)
        })
        .collect();

    let most_affectionate = leader(&scores).filter(|name| scores[name] > 0.0);
    let gauge = gauge(&scores);

    AffectionScores {
        scores,
        most_affectionate,
        gauge,
    }
}

/// 0-100 mutual-affection reading; meaningful only for two-sender chats,
/// neutral 50 otherwise.
fn gauge(scores: &BTreeMap<String, f64>) -> u32 {
    if scores.len() != 2 {
        return 50;
    }
    let values: Vec<f64> = scores.values().copied().collect();
    let avg = (values[0] + values[1]) / 2.0;
    let diff = (values[0] - values[1]).abs();
    let raw = if avg > 10.0 && diff < 5.0 {
        (avg * 2.0).min(100.0)
    } else if avg > 5.0 {
        (avg * 3.0).min(80.0)
    } else {
        (avg * 5.0).max(20.0)
    };
    raw.round() as u32
}
