pub mod json;
pub mod md;

use crate::error::TallyError;
use crate::types::report::ResultReport;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    report: &ResultReport,
    format: OutputFormat,
    decimals: usize,
) -> Result<String, TallyError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(TallyError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, decimals)),
    }
}
