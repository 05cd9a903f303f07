//! Typed result structs for every analytics pass.
//!
//! One struct per metric kind instead of a dynamic map: the engine fills the
//! fields phase by phase, and every struct is `Default` so an isolated pass
//! failure can substitute a neutral value without poisoning the report.
//! Per-sender tables are `BTreeMap`s for deterministic iteration and
//! serialization order.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Aggregate result of one analysis run, serialized as a flat metric map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub basic_stats: BasicStats,
    pub message_length_stats: MessageLengthStats,
    pub balance_of_effort: BalanceOfEffort,
    pub keyword_tracker: KeywordTracker,
    pub emoji_stats: EmojiStats,
    pub time_analysis: TimeAnalysis,
    pub activity_patterns: ActivityPatterns,
    pub response_times: ResponseTimes,
    pub conversation_starters: ConversationStarters,
    pub sentiment: Sentiment,
    pub mood_timeline: MoodTimeline,
    pub affection: AffectionScores,
    pub topics: Topics,
    pub streaks_gaps: StreaksGaps,
    pub milestones: Milestones,
    pub who_thinks_first: WhoThinksFirst,
    pub conversation_flow: ConversationFlow,
    pub compatibility_index: CompatibilityIndex,
    pub personality_insights: PersonalityInsights,
    pub fun_metrics: FunMetrics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BasicStats {
    pub total_messages: usize,
    /// Distinct senders, sorted.
    pub senders: Vec<String>,
    pub message_counts: BTreeMap<String, usize>,
    /// Analysis tokens per sender, not raw whitespace words.
    pub word_counts: BTreeMap<String, usize>,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageLengthStats {
    pub per_sender: BTreeMap<String, LengthSummary>,
}

/// Whitespace-token lengths of one sender's messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LengthSummary {
    pub avg: f64,
    pub min: usize,
    pub max: usize,
    pub median: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceOfEffort {
    pub per_sender: BTreeMap<String, EffortShare>,
    pub message_leader: Option<String>,
    pub word_leader: Option<String>,
    pub insight: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EffortShare {
    pub message_percentage: f64,
    pub avg_words_per_message: f64,
    pub total_messages: usize,
    pub total_words: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordTracker {
    /// Top 50 tokens overall, most frequent first.
    pub overall_common_words: Vec<(String, usize)>,
    /// Top 20 tokens per sender.
    pub sender_common_words: BTreeMap<String, Vec<(String, usize)>>,
    /// Vocabulary both senders use (two-sender chats only), capped at 20.
    pub shared_words: Vec<String>,
    pub unique_words_per_sender: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmojiStats {
    pub total_emojis: usize,
    pub unique_emojis: usize,
    /// Top 20 emoji runs overall.
    pub top_emojis: Vec<(String, usize)>,
    pub sender_emoji_totals: BTreeMap<String, usize>,
    pub sender_emoji_details: BTreeMap<String, BTreeMap<String, usize>>,
    /// Each sender's favourite emoji and its count.
    pub sender_top_emoji: BTreeMap<String, (String, usize)>,
    /// Sender with the highest total; count ties break to the
    /// lexicographically smallest name.
    pub emoji_leader: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeAnalysis {
    pub hourly_distribution: [u32; 24],
    /// Monday..Sunday.
    pub daily_distribution: [u32; 7],
    pub most_active_hour: Option<u32>,
    pub most_active_day: Option<String>,
    /// Messages in the [0,4) hour window.
    pub late_night_messages: u32,
    pub sender_hourly: BTreeMap<String, [u32; 24]>,
    pub day_night: BTreeMap<String, DayNightSplit>,
    /// Highest count in [22,24) plus [0,6).
    pub night_owl: Option<String>,
    /// Highest count in [6,22).
    pub early_bird: Option<String>,
    pub insight: String,
}

/// Day is the [6,18) window, night the rest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayNightSplit {
    pub day: u32,
    pub night: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityPatterns {
    /// ISO-ish `YYYY-Www` keys.
    pub weekly: BTreeMap<String, u32>,
    /// `YYYY-MM` keys.
    pub monthly: BTreeMap<String, u32>,
    pub most_active_week: Option<String>,
    pub most_active_month: Option<String>,
    pub avg_messages_per_week: f64,
    pub avg_messages_per_month: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseTimes {
    /// Mean gap in minutes per responding sender.
    pub average: BTreeMap<String, f64>,
    pub median: BTreeMap<String, f64>,
    pub percentiles: BTreeMap<String, ResponsePercentiles>,
    pub distribution: BTreeMap<String, ResponseBuckets>,
    /// Responses that sat a day or more before being answered.
    pub delivered: BTreeMap<String, u32>,
    pub fastest_responder: Option<String>,
    pub slowest_responder: Option<String>,
    pub most_delivered: Option<String>,
    pub speed_patterns: BTreeMap<String, SpeedPattern>,
    pub insight: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponsePercentiles {
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
}

/// Gap counts per response-speed bucket. Boundaries are exclusive on the
/// lower bucket, inclusive upward: a 1.0-minute gap is very_fast, not
/// instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseBuckets {
    pub instant: u32,
    pub very_fast: u32,
    pub fast: u32,
    pub medium: u32,
    pub slow: u32,
    pub very_slow: u32,
    pub delivered: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseBucket {
    Instant,
    VeryFast,
    Fast,
    Medium,
    Slow,
    VerySlow,
    Delivered,
}

impl ResponseBucket {
    /// Buckets a retained gap (minutes).
    pub fn for_gap(minutes: f64) -> Self {
        if minutes < 1.0 {
            ResponseBucket::Instant
        } else if minutes < 5.0 {
            ResponseBucket::VeryFast
        } else if minutes < 15.0 {
            ResponseBucket::Fast
        } else if minutes < 60.0 {
            ResponseBucket::Medium
        } else if minutes < 180.0 {
            ResponseBucket::Slow
        } else if minutes < 1440.0 {
            ResponseBucket::VerySlow
        } else {
            ResponseBucket::Delivered
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SpeedPattern {
    /// Share of responses under a minute.
    pub instant_percent: f64,
    /// Share in [1, 15) minutes.
    pub fast_percent: f64,
    /// Share at an hour or more.
    pub delayed_percent: f64,
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationStarters {
    pub starts: BTreeMap<String, u32>,
    pub starter_words: BTreeMap<String, u32>,
    pub initiator_leader: Option<String>,
    pub top_starter_word: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Sentiment {
    pub per_sender: BTreeMap<String, SentimentShare>,
    pub overall_mood: Mood,
}

/// Percentages of one sender's messages per class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SentimentShare {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Mood {
    VeryPositive,
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mood::VeryPositive => "Very Positive",
            Mood::Positive => "Positive",
            Mood::Neutral => "Neutral",
            Mood::Negative => "Negative",
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MoodTimeline {
    pub days: Vec<DailyMood>,
    pub trend: MoodTrend,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
    #[default]
    InsufficientData,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AffectionScores {
    /// 0-100 per sender.
    pub scores: BTreeMap<String, f64>,
    pub most_affectionate: Option<String>,
    /// 0-100 gauge over the score pair; 50 when not a two-sender chat.
    pub gauge: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Topics {
    /// Top 5 keyword groups by total hits.
    pub top_topics: Vec<(String, u32)>,
    pub sender_topics: BTreeMap<String, BTreeMap<String, u32>>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StreaksGaps {
    /// Longest run of consecutive active calendar days (0 unless >= 2 days).
    pub longest_streak: u32,
    /// Longest whole-day silence between active days.
    pub longest_gap: i64,
    pub total_streaks: usize,
    pub total_gaps: usize,
    pub insight: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Milestones {
    pub first_message: Option<FirstMessage>,
    pub most_active_day: Option<(NaiveDate, u32)>,
    /// Longest unbroken run of messages within a single calendar day.
    pub longest_day_run: u32,
    pub total_days: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstMessage {
    pub sender: Option<String>,
    pub preview: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WhoThinksFirst {
    pub first_counts: BTreeMap<String, u32>,
    pub percentages: BTreeMap<String, f64>,
    /// Mean first-message clock time per sender, `HH:MM`.
    pub avg_first_times: BTreeMap<String, String>,
    pub most_frequent_first: Option<String>,
    pub total_days: usize,
    pub calendar: Vec<CalendarFirst>,
    pub insight: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarFirst {
    pub date: NaiveDate,
    pub sender: String,
    pub time: String,
    pub preview: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationFlow {
    pub turn_stats: BTreeMap<String, TurnStats>,
    pub total_turns: usize,
}

/// A turn is a maximal run of consecutive messages from one sender.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TurnStats {
    pub avg_turn_length: f64,
    pub max_turn_length: u32,
    pub total_turns: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityIndex {
    /// 0-100; fixed neutral 50 for non-two-sender chats.
    pub score: u32,
    pub description: String,
    pub factors: CompatibilityFactors,
}

impl Default for CompatibilityIndex {
    fn default() -> Self {
        CompatibilityIndex {
            score: 50,
            description: "Not enough data".to_string(),
            factors: CompatibilityFactors::default(),
        }
    }
}

/// Balance factors on a 0-100 scale.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompatibilityFactors {
    pub message_balance: f64,
    pub word_balance: f64,
    pub affection_balance: f64,
    pub response_balance: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonalityInsights {
    pub summary: String,
    pub top_findings: Vec<String>,
    pub fun_title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunMetrics {
    pub message_leader: Option<String>,
    pub word_leader: Option<String>,
    pub emoji_leader: Option<String>,
    pub initiator_leader: Option<String>,
    pub night_owl: Option<String>,
    /// Messages in the [0,6) hour window per sender.
    pub night_owl_scores: BTreeMap<String, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_bucket_boundaries() {
        // Lower bound exclusive, upward inclusive: exact boundary values
        // land in the slower bucket.
        assert_eq!(ResponseBucket::for_gap(0.5), ResponseBucket::Instant);
        assert_eq!(ResponseBucket::for_gap(1.0), ResponseBucket::VeryFast);
        assert_eq!(ResponseBucket::for_gap(4.9), ResponseBucket::VeryFast);
        assert_eq!(ResponseBucket::for_gap(5.0), ResponseBucket::Fast);
        assert_eq!(ResponseBucket::for_gap(15.0), ResponseBucket::Medium);
        assert_eq!(ResponseBucket::for_gap(60.0), ResponseBucket::Slow);
        assert_eq!(ResponseBucket::for_gap(180.0), ResponseBucket::VerySlow);
        assert_eq!(ResponseBucket::for_gap(1440.0), ResponseBucket::Delivered);
    }

    #[test]
    fn test_mood_display() {
        assert_eq!(Mood::VeryPositive.to_string(), "Very Positive");
        assert_eq!(Mood::default(), Mood::Neutral);
    }

    #[test]
    fn test_report_serializes_to_flat_metric_map() {
        let report = AnalysisReport::default();
        let value = serde_json::to_value(&report).unwrap();
        let map = value.as_object().unwrap();
        assert!(map.contains_key("basic_stats"));
        assert!(map.contains_key("compatibility_index"));
        assert_eq!(map["compatibility_index"]["score"], 50);
    }
}
