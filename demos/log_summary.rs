//! Log Summary
//!
//! This example parses a small log stream in stages: a header is skipped,
//! the severity of the first entry is peeked, and the remaining lines are
//! counted per level.
//!
//! Key concepts:
//! - Sequencing consumers with flat_map
//! - Leftover input flowing into the next stage
//! - Adapting element types with contramap
//! - Driving from an iterator in fixed-size chunks
//!
//! Run with: cargo run --example log_summary

use std::collections::BTreeMap;
use tributary::prelude::*;

fn level(line: &&str) -> String {
    line.split_whitespace().next().unwrap_or("UNKNOWN").to_string()
}

fn main() {
    println!("=== Log Summary ===\n");

    let lines = vec![
        "# service log v1",
        "INFO started",
        "WARN disk at 80%",
        "INFO request served",
        "ERROR upstream timeout",
        "INFO request served",
    ];

    let per_level: Consumer<Id, String, BTreeMap<String, usize>> =
        fold(BTreeMap::new(), |mut counts: BTreeMap<String, usize>, level: String| {
            *counts.entry(level).or_insert(0) += 1;
            counts
        });

    let summary: Consumer<Id, &str, (Option<&str>, BTreeMap<String, usize>)> = drop(1)
        .flat_map(|()| peek())
        .flat_map(|first| per_level.contramap(level).map(move |counts| (first, counts)));

    let driver = Driver::builder().chunk_size(2).build().unwrap();
    let mut input = lines.into_iter();
    let (consumer, report) = driver.drive(summary, &mut input);
    let (first, counts) = consumer.run();

    println!("First entry: {:?}", first);
    for (level, count) in &counts {
        println!("  {:<6} {}", level, count);
    }

    println!(
        "\nFed {} elements in {} batches (run {})",
        report.elements_fed, report.batches_fed, report.run_id
    );

    println!("\n=== Example Complete ===");
}
