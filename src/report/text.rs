use crate::analysis::SweepOutcome;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;

/// Plain list of unused files, sorted, one per line
pub struct TextReporter {
    output_path: PathBuf,
}

impl TextReporter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn render(outcome: &SweepOutcome) -> String {
        outcome
            .unreached
            .iter()
            .map(|path| path.to_native())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn report(&self, outcome: &SweepOutcome) -> Result<()> {
        std::fs::write(&self.output_path, Self::render(outcome))
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write report: {}", self.output_path.display()))
    }
}
