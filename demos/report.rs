use std::env;

use chatstats::{analyze, parse_file};

fn main() {
    let args: Vec<String> = env::args().collect();
    let file_path = &args[1];
    let messages = parse_file(file_path).expect("could not parse chat export");
    let report = analyze(&messages);

    println!("Messages: {}", report.basic_stats.total_messages);
    for (sender, count) in &report.basic_stats.message_counts {
        println!("  {sender}: {count}");
    }
    if let Some(range) = &report.basic_stats.date_range {
        println!("From {} to {} ({} days)", range.start, range.end, range.duration_days);
    }
    println!("Overall mood: {}", report.sentiment.overall_mood);
    println!("Compatibility: {} ({})", report.compatibility_index.score, report.compatibility_index.description);

    println!();
    println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
}
