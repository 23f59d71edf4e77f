//! Console reporting for deletion outcomes
//!
//! One line per input path, successes and failures in the same layout but
//! different colors, followed by a timing summary.

use crate::outcome::{EntryFailure, PathOutcome, RunSummary};
use console::style;
use std::time::Duration;

/// Failed tree entries listed under an outcome before eliding the rest
const MAX_LISTED_FAILURES: usize = 5;

/// Receives outcomes in input order
pub trait Reporter {
    /// Render one outcome
    fn report(&self, outcome: &PathOutcome);

    /// Render the end-of-run summary
    fn finish(&self, summary: &RunSummary, elapsed: Duration);
}

/// Reporter writing colored lines to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    /// Suppress success lines
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, outcome: &PathOutcome) {
        let line = render_line(outcome);
        if outcome.success {
            if !self.quiet {
                println!("{}", style(line).green());
            }
        } else {
            println!("{}", style(line).red());
        }

        if !outcome.failures.is_empty() {
            println!("  {}", style(partial_note(outcome.partial_failures())).yellow());
            for failure in outcome.failures.iter().take(MAX_LISTED_FAILURES) {
                println!("    {}", style(render_failure(failure)).dim());
            }
            let hidden = outcome.failures.len().saturating_sub(MAX_LISTED_FAILURES);
            if hidden > 0 {
                println!("    {}", style(format!("... and {} more", hidden)).dim());
            }
        }
    }

    fn finish(&self, summary: &RunSummary, elapsed: Duration) {
        let line = summary_line(summary, elapsed);
        if summary.all_succeeded() {
            println!("{}", style(line).dim());
        } else {
            println!("{}", style(line).yellow());
        }
    }
}

/// Plain text of an outcome line, without colors
fn render_line(outcome: &PathOutcome) -> String {
    let marker = if outcome.success { "✓" } else { "✗" };
    format!("{} {}", marker, outcome.message)
}

fn render_failure(failure: &EntryFailure) -> String {
    format!("{}: {}", failure.path, failure.reason)
}

fn partial_note(count: u64) -> String {
    format!("{} entr{} could not be removed", count, if count == 1 { "y" } else { "ies" })
}

fn summary_line(summary: &RunSummary, elapsed: Duration) -> String {
    if summary.all_succeeded() {
        format!(
            "{} path(s) processed in {} ms",
            summary.total,
            elapsed.as_millis()
        )
    } else {
        format!(
            "{} path(s) processed in {} ms, {} failed",
            summary.total,
            elapsed.as_millis(),
            summary.failed
        )
    }
}
