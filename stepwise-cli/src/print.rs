//! Terminal output.

use ariadne::{Color, Fmt};
use std::path::Path;
use stepwise_core::{Envelope, FailureKind};
use stepwise_error::EXPR;

const RULE: &str = "======================================================================";

/// Writes results to the terminal, either as human-readable text or as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    /// Print nothing except errors.
    pub quiet: bool,

    /// Print results as JSON.
    pub json: bool,
}

impl Printer {
    /// Returns true if human-readable text should be printed.
    fn text(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Prints the application banner.
    pub fn banner(&self) {
        if !self.text() {
            return;
        }

        println!("{}", RULE.fg(Color::Cyan));
        println!("  stepwise {}: step-by-step solver & animator", env!("CARGO_PKG_VERSION"));
        println!("{}", RULE.fg(Color::Cyan));
    }

    /// Prints a line of informational text.
    pub fn info(&self, message: impl std::fmt::Display) {
        if self.text() {
            println!("{}", message);
        }
    }

    /// Prints the position of the next input in a batch.
    pub fn progress(&self, current: usize, total: usize) {
        self.info(format!("[{}/{}]", current, total).fg(Color::Blue));
    }

    /// Prints a result.
    pub fn envelope(&self, envelope: &Envelope) {
        if self.quiet {
            if !envelope.is_success() {
                self.failure(envelope);
            }
            return;
        }

        if self.json {
            match serde_json::to_string_pretty(envelope) {
                Ok(json) => println!("{}", json),
                Err(err) => log::error!("failed to serialize result: {}", err),
            }
            return;
        }

        println!();
        println!("Processing: {}", envelope.input().fg(EXPR));

        let Envelope::Success(success) = envelope else {
            self.failure(envelope);
            return;
        };

        println!("{} {}", "Type:".fg(Color::Green), success.kind);
        println!("{} {}", "Total steps:".fg(Color::Green), success.step_count);
        if success.normalized_input != success.input {
            println!("{} {}", "Processed as:".fg(Color::Yellow), success.normalized_input);
        }
        println!();

        for step in &success.steps {
            println!("{}", format!("Step {}: {}", step.index, step.description).fg(Color::Blue));
            println!("  {}", step.before);
            println!("  {}", "↓".fg(Color::Yellow));
            println!("  {}", step.after.as_str().fg(Color::Green));
            if step.has_substeps {
                println!("  {}", format!("[substeps: {}]", step.substep_count).fg(Color::Magenta));
            }
            for anomaly in &step.anomalies {
                println!("  {}", format!("(no usable representation of the {} state)", anomaly.side).fg(Color::Yellow));
            }
            println!();
        }
    }

    /// Reports a failed result to stderr.
    fn failure(&self, envelope: &Envelope) {
        let Some(err) = envelope.to_error() else {
            return;
        };

        // an empty input leaves nothing to highlight
        if envelope.failure_kind() == Some(FailureKind::InvalidInput) && envelope.input().trim().is_empty() {
            eprintln!("{}: {}", "error".fg(Color::Red), err);
            return;
        }

        if let Err(io_err) = err.report_to_stderr("input", envelope.input()) {
            log::error!("failed to report error: {}", io_err);
            eprintln!("{}: {}", "error".fg(Color::Red), err);
        }
    }

    /// Prints the summary of a batch.
    pub fn summary(&self, results: &[Envelope]) {
        let successes = results.iter().filter(|e| e.is_success()).count();
        self.info(RULE.fg(Color::Cyan));
        self.info("BATCH SUMMARY");
        self.info(RULE.fg(Color::Cyan));
        self.info(format!("Total processed: {}", results.len()));
        self.info(format!("Successful: {}", successes).fg(Color::Green));
        self.info(format!("Errors: {}", results.len() - successes).fg(Color::Red));
        self.info(RULE.fg(Color::Cyan));
    }

    /// Reports where the results were saved.
    pub fn saved(&self, path: &Path) {
        self.info(format!("Results saved to: {}", path.display()).fg(Color::Green));
    }
}
