//! Keyword-group topic detection.

use std::collections::BTreeMap;

use crate::lexicon::TOPIC_KEYWORDS;
use crate::models::Message;
use crate::text::tokenize;

use super::report::Topics;

pub(crate) fn topics(users: &[&Message]) -> Topics {
    let mut overall: BTreeMap<String, u32> = BTreeMap::new();
    let mut sender_topics: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    for msg in users {
        let Some(sender) = &msg.sender else { continue };
        let tokens = tokenize(&msg.text);
        for (topic, keywords) in TOPIC_KEYWORDS {
            let hits = tokens
                .iter()
                .filter(|t| keywords.contains(&t.as_str()))
                .count() as u32;
            if hits == 0 {
                continue;
            }
            *overall.entry((*topic).to_string()).or_default() += hits;
            *sender_topics
                .entry(sender.clone())
                .or_default()
                .entry((*topic).to_string())
                .or_default() += hits;
        }
    }

    let mut top_topics: Vec<(String, u32)> = overall.into_iter().collect();
    top_topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_topics.truncate(5);

    let summary = if top_topics.is_empty() {
        "No clear topics detected".to_string()
    } else {
        let names: Vec<&str> = top_topics.iter().take(3).map(|(t, _)| t.as_str()).collect();
        format!("Top topics: {}", names.join(", "))
    };

    Topics {
        top_topics,
        sender_topics,
        summary,
    }
}
