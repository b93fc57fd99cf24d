mod json;
mod terminal;
mod text;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;
pub use text::TextReporter;

use crate::analysis::SweepOutcome;
use miette::Result;
use std::path::PathBuf;

/// Output format for the unused-file report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Writes the report file for a finished sweep
pub struct Reporter {
    format: ReportFormat,
    output_path: PathBuf,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: PathBuf) -> Self {
        Self { format, output_path }
    }

    pub fn report(&self, outcome: &SweepOutcome) -> Result<()> {
        match &self.format {
            ReportFormat::Text => TextReporter::new(self.output_path.clone()).report(outcome),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(outcome),
        }
    }
}
