//! Analytics engine.
//!
//! Runs a catalogue of pure passes over the parsed message list and collects
//! their typed results into one [`AnalysisReport`]. Base passes are mutually
//! independent and run on a rayon join tree; composite passes run afterwards
//! and read the already-filled report. A panicking pass is caught, logged and
//! replaced by that metric's `Default` so one bad pass never sinks the whole
//! report.

pub mod report;

mod affection;
mod composite;
mod counts;
mod emoji;
mod initiator;
mod response;
mod sentiment;
mod streaks;
mod timing;
mod topics;

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use crate::models::Message;

pub use report::AnalysisReport;

use report::{
    ActivityPatterns, AffectionScores, BalanceOfEffort, BasicStats, ConversationFlow,
    ConversationStarters, EmojiStats, KeywordTracker, MessageLengthStats, Milestones,
    MoodTimeline, ResponseTimes, Sentiment, StreaksGaps, TimeAnalysis, Topics, WhoThinksFirst,
};

/// Computes the full metric catalogue for one conversation.
///
/// The input order is preserved exactly as parsed; no sorting happens here
/// apart from passes that explicitly sort their own local view. Empty input
/// yields an all-default report.
pub fn analyze(messages: &[Message]) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    if messages.is_empty() {
        return report;
    }

    // System lines count toward global totals and time histograms but never
    // toward per-sender metrics.
    let users: Vec<&Message> = messages
        .iter()
        .filter(|m| !m.is_system && m.sender.is_some())
        .collect();
    let users = users.as_slice();

    let ((counting, clock), (language, exchange)) = rayon::join(
        || {
            rayon::join(
                || counting_passes(messages, users),
                || clock_passes(messages, users),
            )
        },
        || rayon::join(|| language_passes(users), || exchange_passes(users)),
    );

    let (basic_stats, message_length_stats, balance_of_effort, keyword_tracker) = counting;
    report.basic_stats = basic_stats;
    report.message_length_stats = message_length_stats;
    report.balance_of_effort = balance_of_effort;
    report.keyword_tracker = keyword_tracker;

    let (time_analysis, activity_patterns, streaks_gaps, milestones) = clock;
    report.time_analysis = time_analysis;
    report.activity_patterns = activity_patterns;
    report.streaks_gaps = streaks_gaps;
    report.milestones = milestones;

    let (sentiment, mood_timeline, affection, topics, emoji_stats) = language;
    report.sentiment = sentiment;
    report.mood_timeline = mood_timeline;
    report.affection = affection;
    report.topics = topics;
    report.emoji_stats = emoji_stats;

    let (response_times, conversation_starters, who_thinks_first, conversation_flow) = exchange;
    report.response_times = response_times;
    report.conversation_starters = conversation_starters;
    report.who_thinks_first = who_thinks_first;
    report.conversation_flow = conversation_flow;

    // Composites read the filled report, never the message list.
    report.compatibility_index =
        guarded("compatibility_index", || composite::compatibility_index(&report));
    report.personality_insights =
        guarded("personality_insights", || composite::personality_insights(&report));
    report.fun_metrics = guarded("fun_metrics", || composite::fun_metrics(&report));

    report
}

fn counting_passes(
    all: &[Message],
    users: &[&Message],
) -> (BasicStats, MessageLengthStats, BalanceOfEffort, KeywordTracker) {
    let basic = guarded("basic_stats", || counts::basic_stats(all, users));
    let lengths = guarded("message_length_stats", || {
        counts::message_length_stats(users)
    });
    let balance = guarded("balance_of_effort", || counts::balance_of_effort(&basic));
    let keywords = guarded("keyword_tracker", || counts::keyword_tracker(users));
    (basic, lengths, balance, keywords)
}

fn clock_passes(
    all: &[Message],
    users: &[&Message],
) -> (TimeAnalysis, ActivityPatterns, StreaksGaps, Milestones) {
    (
        guarded("time_analysis", || timing::time_analysis(all, users)),
        guarded("activity_patterns", || timing::activity_patterns(all)),
        guarded("streaks_gaps", || streaks::streaks_gaps(all)),
        guarded("milestones", || streaks::milestones(users)),
    )
}

fn language_passes(
    users: &[&Message],
) -> (Sentiment, MoodTimeline, AffectionScores, Topics, EmojiStats) {
    (
        guarded("sentiment", || sentiment::sentiment(users)),
        guarded("mood_timeline", || sentiment::mood_timeline(users)),
        guarded("affection", || affection::affection(users)),
        guarded("topics", || topics::topics(users)),
        guarded("emoji_stats", || emoji::emoji_stats(users)),
    )
}

fn exchange_passes(
    users: &[&Message],
) -> (ResponseTimes, ConversationStarters, WhoThinksFirst, ConversationFlow) {
    (
        guarded("response_times", || response::response_times(users)),
        guarded("conversation_starters", || {
            initiator::conversation_starters(users)
        }),
        guarded("who_thinks_first", || initiator::who_thinks_first(users)),
        guarded("conversation_flow", || initiator::conversation_flow(users)),
    )
}

fn guarded<T: Default>(pass: &'static str, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            warn!(pass, "analysis pass panicked, substituting an empty result");
            T::default()
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Key of the strictly largest value, iterating in key order so ties go to
/// the lexicographically smallest key.
fn leader<V: PartialOrd + Copy>(map: &BTreeMap<String, V>) -> Option<String> {
    let mut best: Option<(&String, V)> = None;
    for (key, &value) in map {
        let replace = match &best {
            Some((_, current)) => value > *current,
            None => true,
        };
        if replace {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key.clone())
}

/// Counterpart of [`leader`] for the smallest value.
fn leader_min<V: PartialOrd + Copy>(map: &BTreeMap<String, V>) -> Option<String> {
    let mut best: Option<(&String, V)> = None;
    for (key, &value) in map {
        let replace = match &best {
            Some((_, current)) => value < *current,
            None => true,
        };
        if replace {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key.clone())
}
