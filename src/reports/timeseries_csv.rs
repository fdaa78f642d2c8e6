use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Reference to the timeseries results file that accompanies a report.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TimeseriesCsv {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_report_datetime: Option<String>,
    pub column_names: Vec<String>,
}

impl ReportNode for TimeseriesCsv {
    const DEFINITION: &'static str = "TimeseriesCsv";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    fn should_always_serialize_column_names() {
        assert_eq!(
            TimeseriesCsv::default().to_value().unwrap(),
            json!({"column_names": []})
        );
    }
}
