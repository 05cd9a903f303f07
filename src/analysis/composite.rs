//! Composite passes that read already-computed metrics instead of the raw
//! message list. These run strictly after the base phase.

use std::collections::BTreeMap;

use super::report::{
    AnalysisReport, CompatibilityFactors, CompatibilityIndex, FunMetrics, PersonalityInsights,
};
use super::round1;

/// `1 - |a-b|/max(a,b)`; equal (including both-zero) means perfect balance.
fn balance(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    if max <= 0.0 {
        1.0
    } else {
        1.0 - (a - b).abs() / max
    }
}

pub(crate) fn compatibility_index(report: &AnalysisReport) -> CompatibilityIndex {
    let senders = &report.basic_stats.senders;
    if senders.len() != 2 {
        return CompatibilityIndex {
            score: 50,
            description: "Single person conversation".to_string(),
            factors: CompatibilityFactors::default(),
        };
    }
    let (a, b) = (&senders[0], &senders[1]);

    let count = |map: &BTreeMap<String, usize>, key: &String| {
        map.get(key).copied().unwrap_or(0) as f64
    };
    let message_balance = balance(
        count(&report.basic_stats.message_counts, a),
        count(&report.basic_stats.message_counts, b),
    );
    let word_balance = balance(
        count(&report.basic_stats.word_counts, a),
        count(&report.basic_stats.word_counts, b),
    );
    let affection_balance = balance(
        report.affection.scores.get(a).copied().unwrap_or(0.0),
        report.affection.scores.get(b).copied().unwrap_or(0.0),
    );
    let response_balance = match (
        report.response_times.average.get(a),
        report.response_times.average.get(b),
    ) {
        (Some(&ra), Some(&rb)) => balance(ra, rb),
        // Without response data on both sides the term is unknowable, not
        // perfect; it contributes a neutral half.
        _ => 0.5,
    };

    let score = ((message_balance + word_balance + affection_balance + response_balance)
        * 25.0)
        .round() as u32;
    let description = if score >= 80 {
        "Exceptionally in sync"
    } else if score >= 60 {
        "A strong connection"
    } else if score >= 40 {
        "A decent match with room to grow"
    } else {
        "Two very different texting styles"
    }
    .to_string();

    CompatibilityIndex {
        score,
        description,
        factors: CompatibilityFactors {
            message_balance: round1(message_balance * 100.0),
            word_balance: round1(word_balance * 100.0),
            affection_balance: round1(affection_balance * 100.0),
            response_balance: round1(response_balance * 100.0),
        },
    }
}

pub(crate) fn personality_insights(report: &AnalysisReport) -> PersonalityInsights {
    let mut lines = Vec::new();

    let counts = &report.basic_stats.message_counts;
    if counts.len() >= 2 {
        if let Some(top) = report.balance_of_effort.message_leader.as_ref() {
            let top_count = counts.get(top).copied().unwrap_or(0) as f64;
            let rest_max = counts
                .iter()
                .filter(|(sender, _)| *sender != top)
                .map(|(_, &c)| c as f64)
                .fold(0.0f64, f64::max);
            if top_count > rest_max * 1.5 {
                lines.push(format!("{top} is the chatterbox of this chat"));
            }
        }
    }

    let lengths = &report.message_length_stats.per_sender;
    if lengths.len() >= 2 {
        let mut ranked: Vec<(&String, f64)> =
            lengths.iter().map(|(s, l)| (s, l.avg)).collect();
        ranked.sort_by(|x, y| y.1.total_cmp(&x.1).then_with(|| x.0.cmp(y.0)));
        if ranked[0].1 > ranked[1].1 * 1.2 {
            lines.push(format!("{} writes the longest messages", ranked[0].0));
        }
    }

    if let Some(name) = &report.emoji_stats.emoji_leader {
        lines.push(format!("{name} rules the emoji game"));
    }
    if let Some(name) = &report.time_analysis.night_owl {
        lines.push(format!("{name} is the resident night owl"));
    }
    if let Some(name) = &report.conversation_starters.initiator_leader {
        lines.push(format!("{name} starts most conversations"));
    }

    let top_findings: Vec<String> = lines.iter().take(3).cloned().collect();
    let summary = if lines.is_empty() {
        "A perfectly unremarkable, balanced chat".to_string()
    } else {
        format!("{} personality traits spotted", lines.len())
    };
    let fun_title = if report.basic_stats.senders.len() == 2 {
        "The Dynamic Duo".to_string()
    } else if report.basic_stats.senders.len() > 2 {
        "The Group Effort".to_string()
    } else {
        "The Solo Act".to_string()
    };

    PersonalityInsights {
        summary,
        top_findings,
        fun_title,
        lines,
    }
}

pub(crate) fn fun_metrics(report: &AnalysisReport) -> FunMetrics {
    let mut night_owl_scores: BTreeMap<String, u32> = BTreeMap::new();
    for (sender, hours) in &report.time_analysis.sender_hourly {
        let late: u32 = hours[..6].iter().sum();
        if late > 0 {
            night_owl_scores.insert(sender.clone(), late);
        }
    }

    FunMetrics {
        message_leader: report.balance_of_effort.message_leader.clone(),
        word_leader: report.balance_of_effort.word_leader.clone(),
        emoji_leader: report.emoji_stats.emoji_leader.clone(),
        initiator_leader: report.conversation_starters.initiator_leader.clone(),
        night_owl: report.time_analysis.night_owl.clone(),
        night_owl_scores,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_balance_bounds() {
        assert_eq!(balance(10.0, 10.0), 1.0);
        assert_eq!(balance(0.0, 0.0), 1.0);
        assert_eq!(balance(10.0, 0.0), 0.0);
        assert!((balance(10.0, 5.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_sender_neutral_score() {
        let mut report = AnalysisReport::default();
        report.basic_stats.senders = vec!["Alice".to_string()];
        let index = compatibility_index(&report);
        assert_eq!(index.score, 50);
        assert_eq!(index.description, "Single person conversation");
    }

    #[test]
    fn test_perfectly_balanced_pair_scores_100() {
        let mut report = AnalysisReport::default();
        for name in ["Alice", "Bob"] {
            report.basic_stats.senders.push(name.to_string());
            report.basic_stats.message_counts.insert(name.to_string(), 50);
            report.basic_stats.word_counts.insert(name.to_string(), 300);
            report.affection.scores.insert(name.to_string(), 40.0);
            report.response_times.average.insert(name.to_string(), 3.0);
        }
        let index = compatibility_index(&report);
        assert_eq!(index.score, 100);
        assert_eq!(index.description, "Exceptionally in sync");
        assert_eq!(index.factors.message_balance, 100.0);
    }

    #[test]
    fn test_missing_response_data_is_neutral() {
        let mut report = AnalysisReport::default();
        for name in ["Alice", "Bob"] {
            report.basic_stats.senders.push(name.to_string());
            report.basic_stats.message_counts.insert(name.to_string(), 10);
            report.basic_stats.word_counts.insert(name.to_string(), 10);
        }
        report
            .response_times
            .average
            .insert("Alice".to_string(), 2.0);
        let index = compatibility_index(&report);
        assert_eq!(index.factors.response_balance, 50.0);
    }

    #[test]
    fn test_personality_chatterbox_detection() {
        let mut report = AnalysisReport::default();
        report.basic_stats.senders = vec!["Alice".to_string(), "Bob".to_string()];
        report
            .basic_stats
            .message_counts
            .insert("Alice".to_string(), 90);
        report.basic_stats.message_counts.insert("Bob".to_string(), 10);
        report.balance_of_effort.message_leader = Some("Alice".to_string());
        let insights = personality_insights(&report);
        assert!(insights.lines.iter().any(|l| l.contains("chatterbox")));
        assert_eq!(insights.fun_title, "The Dynamic Duo");
    }

    #[test]
    fn test_personality_empty_report() {
        let insights = personality_insights(&AnalysisReport::default());
        assert!(insights.lines.is_empty());
        assert_eq!(insights.summary, "A perfectly unremarkable, balanced chat");
    }
}
