use crate::analysis::SweepOutcome;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Colored end-of-run summary on stdout
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn summary(&self, outcome: &SweepOutcome, report_path: &Path, elapsed: Duration) {
        println!("{}", "─".repeat(60).dimmed());

        if outcome.unreached.is_empty() {
            println!("{}", "No unused files found!".green().bold());
        } else {
            println!(
                "{}",
                format!("Found {} unused files.", outcome.unreached.len())
                    .yellow()
                    .bold()
            );

            for (dir, count) in Self::by_top_level_dir(outcome) {
                println!("  {} {}", format!("{:>6}", count).yellow(), dir.dimmed());
            }
        }

        println!(
            "{}",
            format!(
                "Reached {} of {} files, scanned {}",
                outcome.reached.len(),
                outcome.total_files(),
                outcome.scanned.len()
            )
            .dimmed()
        );
        println!("Report written to: {}", report_path.display());
        println!(
            "{}",
            format!("Time elapsed: {:.2}s", elapsed.as_secs_f64()).dimmed()
        );
        println!("{}", "Done!".green());
    }

    /// Unused counts grouped by first path component; files at the top
    /// level are grouped under "."
    fn by_top_level_dir(outcome: &SweepOutcome) -> BTreeMap<String, usize> {
        let mut groups = BTreeMap::new();
        for path in &outcome.unreached {
            let dir = match path.as_str().split_once('\\') {
                Some((first, _)) => first.to_string(),
                None => ".".to_string(),
            };
            *groups.entry(dir).or_insert(0) += 1;
        }
        groups
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
