//! Result rendering: an aligned text table with a pass/fail summary, or
//! one JSON document per run for machine consumption.

use comanda_story::{Outcome, Story, TestResult};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub fn print_text(story: &Story, iteration: u32, results: &[TestResult]) {
    let width = results
        .iter()
        .map(|r| r.description.len())
        .max()
        .unwrap_or(0);

    println!();
    println!("{} — iteration {}", story.title, iteration);
    for result in results {
        println!(
            "  {:<width$}  {:<7}  {}",
            result.description,
            result.outcome.label(),
            result.outcome.detail(),
            width = width
        );
    }

    let (mut passed, mut failed, mut skipped) = (0usize, 0usize, 0usize);
    for result in results {
        match result.outcome {
            Outcome::Success(_) => passed += 1,
            Outcome::Failure(_) => failed += 1,
            Outcome::Skipped(_) => skipped += 1,
        }
    }
    println!(
        "  {} of {} steps ran: {} passed, {} failed, {} skipped",
        results.len(),
        story.steps.len(),
        passed,
        failed,
        skipped
    );
}

pub fn print_json(story: &Story, iteration: u32, results: &[TestResult]) {
    let rendered: Vec<serde_json::Value> = results
        .iter()
        .map(|result| {
            serde_json::json!({
                "description": result.description,
                "outcome": result.outcome.label(),
                "detail": result.outcome.detail(),
            })
        })
        .collect();
    let failures = results.iter().filter(|r| r.outcome.is_failure()).count();
    let finished_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let document = serde_json::json!({
        "story": story.name,
        "iteration": iteration,
        "finished_at": finished_at,
        "steps_total": story.steps.len(),
        "steps_run": results.len(),
        "failures": failures,
        "results": rendered,
    });
    println!("{}", document);
}
