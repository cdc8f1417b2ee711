//! Output styles the summarization service understands

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the clinical note should be rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Five bullet points and a short paragraph
    #[default]
    Summary,
    /// Subjective / Objective / Assessment / Plan
    Soap,
    /// Next steps, tests, medicines and missing information
    Checklist,
    /// Plain-language explanation for the patient
    Patient,
}

impl SummaryMode {
    pub const ALL: [SummaryMode; 4] = [
        SummaryMode::Summary,
        SummaryMode::Soap,
        SummaryMode::Checklist,
        SummaryMode::Patient,
    ];

    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMode::Summary => "summary",
            SummaryMode::Soap => "soap",
            SummaryMode::Checklist => "checklist",
            SummaryMode::Patient => "patient",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryMode::Summary => "Summary",
            SummaryMode::Soap => "SOAP",
            SummaryMode::Checklist => "Checklist",
            SummaryMode::Patient => "Patient",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
