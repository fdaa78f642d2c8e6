use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Data did not conform to schema definition '{definition}': {}", .violations.join("; "))]
    SchemaViolation {
        definition: String,
        violations: Vec<String>,
    },
    #[error("Reports could not be merged: {0}")]
    MergeIncompatibility(#[from] MergeIncompatibility),
    #[error("Schema document could not be used: {0}")]
    InvalidSchema(String),
    #[error("The shared validator has already been loaded and cannot be replaced")]
    SharedValidatorAlreadyLoaded,
    #[error("I/O error while handling report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Report JSON could not be processed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error writing report output: {0}")]
    Output(#[from] anyhow::Error),
}

impl ReportError {
    pub(crate) fn schema_violation(definition: &str, violations: Vec<String>) -> Self {
        Self::SchemaViolation {
            definition: definition.to_string(),
            violations,
        }
    }
}

/// Reasons why two reports cannot be combined.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MergeIncompatibility {
    #[error("reporting period ids {existing:?} do not match incoming ids {new:?}")]
    ReportingPeriodIds {
        existing: Vec<String>,
        new: Vec<String>,
    },
    #[error("scenario has {scenario} timesteps per hour but feature report has {feature}")]
    TimestepsPerHour { scenario: u32, feature: u32 },
}
