pub mod errors;
pub mod merge;
pub mod output;
pub mod reports;
pub mod schema;
pub mod timeseries;

pub use crate::errors::{MergeIncompatibility, ReportError};
pub use crate::reports::feature_report::{FeatureReport, SimulationStatus};
pub use crate::reports::scenario_report::ScenarioReport;
pub use crate::reports::ReportNode;
pub use crate::schema::Validator;

use tracing::info;

/// Aggregates feature reports, in order, into a new scenario report.
///
/// Stops at the first feature report that cannot be merged.
pub fn aggregate_feature_reports(
    scenario_id: &str,
    scenario_name: &str,
    directory_name: &str,
    feature_reports: impl IntoIterator<Item = FeatureReport>,
) -> Result<ScenarioReport, ReportError> {
    let mut scenario_report = ScenarioReport::new(scenario_id, scenario_name, directory_name);

    for feature_report in feature_reports {
        scenario_report.add_feature_report(feature_report)?;
    }

    info!(
        "aggregated {} feature reports into scenario {scenario_id}",
        scenario_report.feature_reports.len()
    );

    Ok(scenario_report)
}
