//! Lexicon-hit sentiment classification and the daily mood timeline.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::lexicon::{NEGATIVE_EMOJIS, NEGATIVE_WORDS, POSITIVE_EMOJIS, POSITIVE_WORDS};
use crate::models::Message;
use crate::text::{emoji_chars, tokenize};

use super::report::{DailyMood, Mood, MoodTimeline, MoodTrend, Sentiment, SentimentShare};
use super::round1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Whichever hit count strictly wins classifies the message; ties are neutral.
fn classify(text: &str) -> Polarity {
    let mut positive = 0usize;
    let mut negative = 0usize;
    for token in tokenize(text) {
        if POSITIVE_WORDS.contains(token.as_str()) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(token.as_str()) {
            negative += 1;
        }
    }
    for ch in emoji_chars(text) {
        if POSITIVE_EMOJIS.contains(&ch) {
            positive += 1;
        }
        if NEGATIVE_EMOJIS.contains(&ch) {
            negative += 1;
        }
    }
    if positive > negative {
        Polarity::Positive
    } else if negative > positive {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

pub(crate) fn sentiment(users: &[&Message]) -> Sentiment {
    let mut counts: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let entry = counts.entry(sender.clone()).or_default();
        match classify(&msg.text) {
            Polarity::Positive => entry.0 += 1,
            Polarity::Negative => entry.1 += 1,
            Polarity::Neutral => entry.2 += 1,
        }
    }

    // The overall mood sums each sender's percentages rather than raw
    // message counts, so a quiet sender weighs as much as a prolific one.
    let mut positive_share = 0.0f64;
    let mut negative_share = 0.0f64;
    let per_sender: BTreeMap<String, SentimentShare> = counts
        .into_iter()
        .map(|(sender, (pos, neg, neu))| {
            let total = (pos + neg + neu) as f64;
            let share = SentimentShare {
                positive: round1(pos as f64 / total * 100.0),
                negative: round1(neg as f64 / total * 100.0),
                neutral: round1(neu as f64 / total * 100.0),
            };
            positive_share += share.positive;
            negative_share += share.negative;
            (sender, share)
        })
        .collect();

    let overall_mood = if positive_share > negative_share * 1.5 && positive_share > 0.0 {
        Mood::VeryPositive
    } else if positive_share > negative_share {
        Mood::Positive
    } else if negative_share > positive_share * 1.5 && negative_share > 0.0 {
        Mood::Negative
    } else {
        Mood::Neutral
    };

    Sentiment {
        per_sender,
        overall_mood,
    }
}

pub(crate) fn mood_timeline(users: &[&Message]) -> MoodTimeline {
    let mut daily: BTreeMap<NaiveDate, (usize, usize, usize)> = BTreeMap::new();
    for msg in users {
        let entry = daily.entry(msg.timestamp.date()).or_default();
        match classify(&msg.text) {
            Polarity::Positive => entry.0 += 1,
            Polarity::Negative => entry.1 += 1,
            Polarity::Neutral => entry.2 += 1,
        }
    }

    let days: Vec<DailyMood> = daily
        .into_iter()
        .map(|(date, (pos, neg, neu))| {
            let total = (pos + neg + neu) as f64;
            DailyMood {
                date,
                positive_ratio: pos as f64 / total,
                negative_ratio: neg as f64 / total,
                neutral_ratio: neu as f64 / total,
            }
        })
        .collect();

    // Compare up to the first and last week of mood data.
    let trend = if days.len() >= 2 {
        let span = days.len().min(7);
        let early: f64 =
            days[..span].iter().map(|d| d.positive_ratio).sum::<f64>() / span as f64;
        let late: f64 = days[days.len() - span..]
            .iter()
            .map(|d| d.positive_ratio)
            .sum::<f64>()
            / span as f64;
        if late - early > 0.1 {
            MoodTrend::Improving
        } else if early - late > 0.1 {
            MoodTrend::Declining
        } else {
            MoodTrend::Stable
        }
    } else {
        MoodTrend::InsufficientData
    };

    MoodTimeline { days, trend }
}
