//! Calendar-day streaks and gaps, plus chat milestones.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::Message;

use super::report::{FirstMessage, Milestones, StreaksGaps};

pub(crate) fn streaks_gaps(all: &[Message]) -> StreaksGaps {
    let days: BTreeSet<NaiveDate> = all.iter().map(|m| m.timestamp.date()).collect();
    let days: Vec<NaiveDate> = days.into_iter().collect();

    let mut streaks: Vec<u32> = Vec::new();
    let mut gaps: Vec<i64> = Vec::new();
    let mut run = 1u32;
    for pair in days.windows(2) {
        let diff = (pair[1] - pair[0]).num_days();
        if diff == 1 {
            run += 1;
        } else {
            if run >= 2 {
                streaks.push(run);
            }
            run = 1;
            // A gap is the silent days between two active days, not the
            // calendar difference: Jan 3 to Jan 10 is six quiet days.
            gaps.push(diff - 1);
        }
    }
    if run >= 2 {
        streaks.push(run);
    }

    let longest_streak = streaks.iter().copied().max().unwrap_or(0);
    let longest_gap = gaps.iter().copied().max().unwrap_or(0);

    let insight = if longest_streak >= 2 {
        format!("Longest streak: {longest_streak} days of back-to-back chatting")
    } else {
        String::new()
    };

    StreaksGaps {
        longest_streak,
        longest_gap,
        total_streaks: streaks.len(),
        total_gaps: gaps.len(),
        insight,
    }
}

pub(crate) fn milestones(users: &[&Message]) -> Milestones {
    let first_message = users.first().map(|msg| FirstMessage {
        sender: msg.sender.clone(),
        preview: msg.text.chars().take(100).collect(),
        timestamp: msg.timestamp,
    });

    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for msg in users {
        *per_day.entry(msg.timestamp.date()).or_default() += 1;
    }
    let total_days = per_day.len();

    let mut most_active_day: Option<(NaiveDate, u32)> = None;
    for (&date, &count) in &per_day {
        if most_active_day.map_or(true, |(_, best)| count > best) {
            most_active_day = Some((date, count));
        }
    }

    // Longest unbroken run of messages inside one calendar day, in file order.
    let mut longest_day_run = 0u32;
    let mut run = 0u32;
    let mut current: Option<NaiveDate> = None;
    for msg in users {
        let date = msg.timestamp.date();
        if current == Some(date) {
            run += 1;
        } else {
            current = Some(date);
            run = 1;
        }
        longest_day_run = longest_day_run.max(run);
    }

    Milestones {
        first_message,
        most_active_day,
        longest_day_run,
        total_days,
    }
}
