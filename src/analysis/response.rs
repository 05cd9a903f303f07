//! Response-time analysis over sender-change gaps.
//!
//! Only gaps strictly inside (0, 10080) minutes count as responses; negative
//! gaps are clock skew and anything a week or longer is silence, not a reply.

use std::collections::BTreeMap;

use crate::lexicon::RESPONSE_WINDOW_MINUTES;
use crate::models::Message;

use super::report::{
    ResponseBucket, ResponseBuckets, ResponsePercentiles, ResponseTimes, SpeedPattern,
};
use super::{leader, leader_min, round1};

pub(crate) fn response_times(users: &[&Message]) -> ResponseTimes {
    let mut gaps: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for pair in users.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.sender == next.sender {
            continue;
        }
        let Some(responder) = &next.sender else { continue };
        let minutes = (next.timestamp - prev.timestamp).num_seconds() as f64 / 60.0;
        if minutes <= 0.0 || minutes >= RESPONSE_WINDOW_MINUTES {
            continue;
        }
        gaps.entry(responder.clone()).or_default().push(minutes);
    }

    let mut times = ResponseTimes::default();
    for (sender, mut sender_gaps) in gaps {
        sender_gaps.sort_by(|a, b| a.total_cmp(b));
        let n = sender_gaps.len();
        let total: f64 = sender_gaps.iter().sum();
        times
            .average
            .insert(sender.clone(), round1(total / n as f64));
        times
            .median
            .insert(sender.clone(), round1(sender_gaps[n / 2]));
        times.percentiles.insert(
            sender.clone(),
            ResponsePercentiles {
                p25: round1(sender_gaps[n / 4]),
                p75: round1(sender_gaps[(n as f64 * 0.75) as usize]),
                p90: round1(sender_gaps[(n as f64 * 0.90) as usize]),
                min: round1(sender_gaps[0]),
                max: round1(sender_gaps[n - 1]),
            },
        );

        let mut buckets = ResponseBuckets::default();
        for &gap in &sender_gaps {
            match ResponseBucket::for_gap(gap) {
                ResponseBucket::Instant => buckets.instant += 1,
                ResponseBucket::VeryFast => buckets.very_fast += 1,
                ResponseBucket::Fast => buckets.fast += 1,
                ResponseBucket::Medium => buckets.medium += 1,
                ResponseBucket::Slow => buckets.slow += 1,
                ResponseBucket::VerySlow => buckets.very_slow += 1,
                ResponseBucket::Delivered => buckets.delivered += 1,
            }
        }
        times.delivered.insert(sender.clone(), buckets.delivered);
        times.distribution.insert(sender.clone(), buckets);

        let instant = sender_gaps.iter().filter(|&&g| g < 1.0).count();
        let fast = sender_gaps
            .iter()
            .filter(|&&g| (1.0..15.0).contains(&g))
            .count();
        let delayed = sender_gaps.iter().filter(|&&g| g >= 60.0).count();
        let spread = sender_gaps[n - 1] - sender_gaps[0];
        times.speed_patterns.insert(
            sender,
            SpeedPattern {
                instant_percent: round1(instant as f64 / n as f64 * 100.0),
                fast_percent: round1(fast as f64 / n as f64 * 100.0),
                delayed_percent: round1(delayed as f64 / n as f64 * 100.0),
                consistency_score: round1((100.0 - spread / 60.0).max(0.0)),
            },
        );
    }

    times.fastest_responder = leader_min(&times.average);
    times.slowest_responder = leader(&times.average);
    times.most_delivered = leader(&times.delivered).filter(|s| times.delivered[s] > 0);
    times.insight = match &times.fastest_responder {
        Some(fastest) if times.average[fastest] < 5.0 => {
            format!("{fastest} replies almost instantly")
        }
        Some(fastest) => format!("{fastest} is usually the quickest to reply"),
        None => String::new(),
    };
    times
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::{msg, refs};

    #[test]
    fn test_gaps_attributed_to_responder() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "ping"),
            msg("2024-01-01 10:02", "Bob", "pong"),
            msg("2024-01-01 10:30", "Alice", "still there?"),
        ];
        let times = response_times(&refs(&msgs));
        assert_eq!(times.average["Bob"], 2.0);
        assert_eq!(times.average["Alice"], 28.0);
        assert_eq!(times.fastest_responder.as_deref(), Some("Bob"));
        assert_eq!(times.slowest_responder.as_deref(), Some("Alice"));
        assert_eq!(times.distribution["Bob"].very_fast, 1);
        assert!(times.insight.contains("Bob"));
    }

    #[test]
    fn test_same_sender_runs_produce_no_gap() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "one"),
            msg("2024-01-01 10:05", "Alice", "two"),
        ];
        let times = response_times(&refs(&msgs));
        assert!(times.average.is_empty());
        assert_eq!(times.fastest_responder, None);
        assert_eq!(times.insight, "");
    }

    #[test]
    fn test_week_long_gap_discarded() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "hello"),
            msg("2024-01-09 10:00", "Bob", "back from vacation"),
        ];
        let times = response_times(&refs(&msgs));
        assert!(times.average.is_empty());
    }

    #[test]
    fn test_zero_and_negative_gaps_discarded() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "first"),
            msg("2024-01-01 10:00", "Bob", "same second"),
            msg("2024-01-01 09:00", "Alice", "clock went backwards"),
        ];
        let times = response_times(&refs(&msgs));
        assert!(times.average.is_empty());
    }

    #[test]
    fn test_delivered_bucket_counts_day_long_gaps() {
        let msgs = vec![
            msg("2024-01-01 10:00", "Alice", "hello"),
            msg("2024-01-03 10:00", "Bob", "sorry, just saw this"),
        ];
        let times = response_times(&refs(&msgs));
        assert_eq!(times.distribution["Bob"].delivered, 1);
        assert_eq!(times.most_delivered.as_deref(), Some("Bob"));
    }
}
