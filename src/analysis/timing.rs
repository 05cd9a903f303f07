//! When the chat happens: hour and weekday histograms, day/night splits and
//! the week/month activity patterns.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike};

use crate::lexicon::LATE_NIGHT_HOURS;
use crate::models::Message;

use super::report::{ActivityPatterns, DayNightSplit, TimeAnalysis};
use super::{leader, round1};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub(crate) fn time_analysis(all: &[Message], users: &[&Message]) -> TimeAnalysis {
    let mut hourly = [0u32; 24];
    let mut daily = [0u32; 7];
    let mut late_night = 0u32;
    for msg in all {
        let hour = msg.timestamp.hour();
        hourly[hour as usize] += 1;
        daily[msg.timestamp.weekday().num_days_from_monday() as usize] += 1;
        if LATE_NIGHT_HOURS.contains(&hour) {
            late_night += 1;
        }
    }

    let mut sender_hourly: BTreeMap<String, [u32; 24]> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let hours = sender_hourly.entry(sender.clone()).or_insert([0u32; 24]);
        hours[msg.timestamp.hour() as usize] += 1;
    }

    let mut day_night: BTreeMap<String, DayNightSplit> = BTreeMap::new();
    let mut owl_scores: BTreeMap<String, u32> = BTreeMap::new();
    let mut bird_scores: BTreeMap<String, u32> = BTreeMap::new();
    for (sender, hours) in &sender_hourly {
        let mut split = DayNightSplit::default();
        for (hour, &count) in hours.iter().enumerate() {
            if (6..18).contains(&hour) {
                split.day += count;
            } else {
                split.night += count;
            }
            if (6..22).contains(&hour) {
                *bird_scores.entry(sender.clone()).or_default() += count;
            } else {
                *owl_scores.entry(sender.clone()).or_default() += count;
            }
        }
        day_night.insert(sender.clone(), split);
    }

    let most_active_hour = arg_max(&hourly).map(|h| h as u32);
    let most_active_day = arg_max(&daily).map(|d| WEEKDAY_NAMES[d].to_string());

    let total: u32 = hourly.iter().sum();
    let insight = match most_active_hour {
        Some(peak) if total > 0 && hourly[peak as usize] as f64 > total as f64 * 0.3 => {
            if peak >= 23 || peak < 4 {
                "Most deep conversations happen after 11pm".to_string()
            } else {
                format!("Most messages are sent around {peak}:00")
            }
        }
        _ => String::new(),
    };

    TimeAnalysis {
        hourly_distribution: hourly,
        daily_distribution: daily,
        most_active_hour,
        most_active_day,
        late_night_messages: late_night,
        sender_hourly,
        day_night,
        night_owl: leader_with_positive(&owl_scores),
        early_bird: leader_with_positive(&bird_scores),
        insight,
    }
}

pub(crate) fn activity_patterns(all: &[Message]) -> ActivityPatterns {
    let mut weekly: BTreeMap<String, u32> = BTreeMap::new();
    let mut monthly: BTreeMap<String, u32> = BTreeMap::new();
    for msg in all {
        *weekly
            .entry(msg.timestamp.format("%Y-W%U").to_string())
            .or_default() += 1;
        *monthly
            .entry(msg.timestamp.format("%Y-%m").to_string())
            .or_default() += 1;
    }

    let total = all.len() as f64;
    let avg_messages_per_week = if weekly.is_empty() {
        0.0
    } else {
        round1(total / weekly.len() as f64)
    };
    let avg_messages_per_month = if monthly.is_empty() {
        0.0
    } else {
        round1(total / monthly.len() as f64)
    };

    ActivityPatterns {
        most_active_week: leader(&weekly),
        most_active_month: leader(&monthly),
        weekly,
        monthly,
        avg_messages_per_week,
        avg_messages_per_month,
    }
}

/// Index of the largest count, smallest index on ties. None when all zero.
fn arg_max(counts: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |(_, b)| count > b) {
            best = Some((i, count));
        }
    }
    best.map(|(i, _)| i)
}

fn leader_with_positive(scores: &BTreeMap<String, u32>) -> Option<String> {
    leader(scores).filter(|name| scores[name] > 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::{msg, refs};

    #[test]
    fn test_hourly_and_weekday_histograms() {
        // 2024-01-01 is a Monday.
        let msgs = vec![
            msg("2024-01-01 23:30", "Alice", "still up"),
            msg("2024-01-02 01:00", "Alice", "very much up"),
            msg("2024-01-02 09:00", "Bob", "morning"),
        ];
        let analysis = time_analysis(&msgs, &refs(&msgs));
        assert_eq!(analysis.hourly_distribution[23], 1);
        assert_eq!(analysis.hourly_distribution[1], 1);
        assert_eq!(analysis.daily_distribution[0], 1);
        assert_eq!(analysis.daily_distribution[1], 2);
        assert_eq!(analysis.late_night_messages, 1);
        assert_eq!(analysis.night_owl.as_deref(), Some("Alice"));
        assert_eq!(analysis.early_bird.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_most_active_ties_break_to_earliest() {
        let msgs = vec![
            msg("2024-01-01 09:00", "Alice", "one"),
            msg("2024-01-02 14:00", "Alice", "two"),
        ];
        let analysis = time_analysis(&msgs, &refs(&msgs));
        assert_eq!(analysis.most_active_hour, Some(9));
        assert_eq!(analysis.most_active_day.as_deref(), Some("Monday"));
    }

    #[test]
    fn test_time_analysis_empty() {
        let analysis = time_analysis(&[], &[]);
        assert_eq!(analysis.most_active_hour, None);
        assert_eq!(analysis.night_owl, None);
        assert_eq!(analysis.insight, "");
    }

    #[test]
    fn test_activity_patterns_monthly_keys() {
        let msgs = vec![
            msg("2024-01-05 10:00", "Alice", "january"),
            msg("2024-01-20 10:00", "Bob", "more january"),
            msg("2024-02-01 10:00", "Alice", "february"),
        ];
        let patterns = activity_patterns(&msgs);
        assert_eq!(patterns.monthly["2024-01"], 2);
        assert_eq!(patterns.monthly["2024-02"], 1);
        assert_eq!(patterns.most_active_month.as_deref(), Some("2024-01"));
        assert_eq!(patterns.avg_messages_per_month, 1.5);
    }
}
