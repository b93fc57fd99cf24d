use crate::analysis::SweepOutcome;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: PathBuf,
}

impl JsonReporter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn report(&self, outcome: &SweepOutcome) -> Result<()> {
        let report = JsonReport::from_outcome(outcome);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        std::fs::write(&self.output_path, &json)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write report: {}", self.output_path.display()))
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_files: usize,
    reached: usize,
    unused_count: usize,
    unused: Vec<String>,
    scanned: usize,
    edges: Vec<JsonEdge>,
}

#[derive(Serialize)]
struct JsonEdge {
    from: String,
    to: String,
    kind: &'static str,
}

impl JsonReport {
    fn from_outcome(outcome: &SweepOutcome) -> Self {
        Self {
            version: "1.0",
            total_files: outcome.total_files(),
            reached: outcome.reached.len(),
            unused_count: outcome.unreached.len(),
            unused: outcome.unreached.iter().map(|p| p.to_native()).collect(),
            scanned: outcome.scanned.len(),
            edges: outcome
                .edges
                .iter()
                .map(|edge| JsonEdge {
                    from: edge.from.to_native(),
                    to: edge.to.to_native(),
                    kind: edge.kind.as_str(),
                })
                .collect(),
        }
    }
}
