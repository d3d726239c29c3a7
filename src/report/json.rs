use crate::types::report::ResultReport;

pub fn to_json(report: &ResultReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
