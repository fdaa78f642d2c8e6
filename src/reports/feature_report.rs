use crate::errors::ReportError;
use crate::output::{write_json, Output};
use crate::reports::construction_cost::ConstructionCost;
use crate::reports::distributed_generation::DistributedGeneration;
use crate::reports::location::Location;
use crate::reports::power_distribution::PowerDistribution;
use crate::reports::program::Program;
use crate::reports::qaqc_flags::QaqcFlags;
use crate::reports::reporting_period::ReportingPeriod;
use crate::reports::thermal_storage::ThermalStorage;
use crate::reports::timeseries_csv::TimeseriesCsv;
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{read_dir, File};
use std::io::BufReader;
use std::path::Path;
use strum::Display;
use tracing::{debug, warn};

pub const DEFAULT_FEATURE_REPORTS_DIR_SUFFIX: &str = "_default_feature_reports";
pub const DEFAULT_FEATURE_REPORTS_FILE: &str = "default_feature_reports";

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum SimulationStatus {
    Complete,
    Failed,
    Started,
    #[serde(rename = "Not Started")]
    #[strum(serialize = "Not Started")]
    NotStarted,
}

/// Results of simulating a single feature (usually one building).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FeatureReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timesteps_per_hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_status: Option<SimulationStatus>,
    pub timeseries_csv: TimeseriesCsv,
    pub location: Location,
    pub program: Program,
    pub reporting_periods: Vec<ReportingPeriod>,
    pub distributed_generation: DistributedGeneration,
    pub power_distribution: PowerDistribution,
    pub thermal_storage: ThermalStorage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qaqc_flags: Option<QaqcFlags>,
    pub construction_costs: Vec<ConstructionCost>,
}

impl FeatureReport {
    /// A report that records only that the feature's simulation did not produce results.
    pub fn failed(id: &str, name: &str, directory_name: &str) -> Self {
        Self::placeholder(id, name, directory_name, SimulationStatus::Failed)
    }

    fn placeholder(id: &str, name: &str, directory_name: &str, status: SimulationStatus) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            directory_name: Some(directory_name.to_string()),
            simulation_status: Some(status),
            ..Default::default()
        }
    }

    /// Reads the report a feature's simulation left in its run directory.
    ///
    /// Looks for `default_feature_reports.json` inside a `*_default_feature_reports` directory.
    /// Only complete or failed simulations are read; otherwise, or if no report is found, the
    /// feature is reported with no results and the given status.
    pub fn from_run_dir(
        run_dir: impl AsRef<Path>,
        id: &str,
        name: &str,
        status: SimulationStatus,
    ) -> Result<Self, ReportError> {
        let run_dir = run_dir.as_ref();
        let directory_name = run_dir.display().to_string();

        if matches!(status, SimulationStatus::Started | SimulationStatus::NotStarted) {
            debug!("feature {id} has simulation status {status}, not reading {directory_name}");
            return Ok(Self::placeholder(id, name, &directory_name, status));
        }

        let report_dir = match read_dir(run_dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .find(|path| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with(DEFAULT_FEATURE_REPORTS_DIR_SUFFIX))
                }),
            Err(err) => {
                warn!("could not read run directory {directory_name}: {err}");
                None
            }
        };

        let json_path = report_dir
            .as_ref()
            .map(|dir| dir.join(format!("{DEFAULT_FEATURE_REPORTS_FILE}.json")))
            .filter(|path| path.exists());

        let Some(json_path) = json_path else {
            warn!("no feature report found in {directory_name}, reporting feature {id} as {status}");
            return Ok(Self::placeholder(id, name, &directory_name, status));
        };

        debug!("reading feature report from {}", json_path.display());
        let value: Value = serde_json::from_reader(BufReader::new(File::open(&json_path)?))?;
        let mut report = Self::from_value(value)?;

        if let Some(csv_path) = report_dir
            .map(|dir| dir.join(format!("{DEFAULT_FEATURE_REPORTS_FILE}.csv")))
            .filter(|path| path.exists())
        {
            report.timeseries_csv.path = Some(csv_path.display().to_string());
        }
        if report.directory_name.is_none() {
            report.directory_name = Some(directory_name);
        }

        Ok(report)
    }

    /// Whether this feature's results are merged into a scenario. A report without a status is
    /// taken to be complete.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.simulation_status,
            None | Some(SimulationStatus::Complete)
        )
    }

    /// Writes the validated report to `feature_reports/<file_name>.json`.
    pub fn save_json_report(&self, output: &impl Output, file_name: &str) -> Result<(), ReportError> {
        let value = self.to_value()?;
        write_json(output, &format!("feature_reports/{file_name}"), &value)?;

        Ok(())
    }
}

impl ReportNode for FeatureReport {
    const DEFINITION: &'static str = "FeatureReport";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{FileOutput, SinkOutput};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;
    use std::fs::{create_dir_all, read_to_string, write, File};
    use std::io::Write;
    use walkdir::WalkDir;

    #[fixture]
    fn feature_json() -> Value {
        json!({
            "id": "building_1",
            "name": "Office 1",
            "feature_type": "Building",
            "timesteps_per_hour": 4,
            "simulation_status": "Complete",
            "location": {"latitude_deg": 39.74, "longitude_deg": -104.99},
            "program": {"floor_area_sqft": 12000.0, "maximum_number_of_stories": 3},
            "reporting_periods": [{"id": 0, "total_site_energy_kwh": 1000.0}],
            "distributed_generation": {"solar_pv": {"size_kw": 3.0}},
            "thermal_storage": {"its_size_kwh": null},
        })
    }

    #[rstest]
    fn should_read_report_with_defaults(feature_json: Value) {
        let report = FeatureReport::from_value(feature_json).unwrap();

        assert_eq!(report.simulation_status, Some(SimulationStatus::Complete));
        assert_eq!(report.reporting_periods.len(), 1);
        assert_eq!(report.thermal_storage, ThermalStorage::default());
        assert_eq!(report.distributed_generation.total_solar_pv_kw(), Some(3.));
        assert_eq!(report.qaqc_flags, None);
        assert!(report.construction_costs.is_empty());
    }

    #[rstest]
    fn should_read_construction_costs(mut feature_json: Value) {
        feature_json["construction_costs"] = json!([
            {"category": "Construction", "item_name": "Roof", "total_cost": 8000.0},
            {"category": "Construction", "item_name": "Windows", "total_cost": 3000.0},
        ]);

        let report = FeatureReport::from_value(feature_json).unwrap();

        assert_eq!(report.construction_costs.len(), 2);
        assert_eq!(report.construction_costs[1].item_name.as_deref(), Some("Windows"));
        assert_eq!(
            FeatureReport::from_value(report.to_value().unwrap()).unwrap(),
            report
        );
    }

    #[rstest]
    fn should_round_trip(feature_json: Value) {
        let report = FeatureReport::from_value(feature_json).unwrap();
        let value = report.to_value().unwrap();

        assert_eq!(value["power_distribution"], json!({}));
        assert_eq!(value["construction_costs"], json!([]));
        assert_eq!(value["simulation_status"], json!("Complete"));
        assert_eq!(FeatureReport::from_value(value).unwrap(), report);
    }

    #[rstest]
    fn should_reject_unknown_status() {
        let result = FeatureReport::from_value(json!({"simulation_status": "Exploded"}));
        assert!(matches!(result, Err(ReportError::SchemaViolation { .. })));
    }

    #[rstest]
    fn should_build_failed_placeholder() {
        let report = FeatureReport::failed("5", "Garage", "run/5");

        assert_eq!(report.simulation_status, Some(SimulationStatus::Failed));
        assert!(!report.is_complete());
        assert!(report.reporting_periods.is_empty());
        assert_eq!(
            report.to_value().unwrap()["simulation_status"],
            json!("Failed")
        );
    }

    #[rstest]
    fn should_display_not_started_like_schema() {
        assert_eq!(SimulationStatus::NotStarted.to_string(), "Not Started");
    }

    #[rstest]
    fn should_read_report_from_run_dir(feature_json: Value) {
        let run_dir = tempfile::tempdir().unwrap();
        let report_dir = run_dir.path().join("006_default_feature_reports");
        create_dir_all(&report_dir).unwrap();
        File::create(report_dir.join("default_feature_reports.json"))
            .unwrap()
            .write_all(feature_json.to_string().as_bytes())
            .unwrap();
        write(report_dir.join("default_feature_reports.csv"), "Datetime\n").unwrap();

        let report = FeatureReport::from_run_dir(
            run_dir.path(),
            "building_1",
            "Office 1",
            SimulationStatus::Complete,
        )
        .unwrap();

        assert_eq!(report.id.as_deref(), Some("building_1"));
        assert_eq!(
            report.timeseries_csv.path,
            Some(report_dir.join("default_feature_reports.csv").display().to_string())
        );
    }

    #[rstest]
    #[case(SimulationStatus::Started)]
    #[case(SimulationStatus::NotStarted)]
    fn should_not_read_report_of_unfinished_simulation(
        feature_json: Value,
        #[case] status: SimulationStatus,
    ) {
        let run_dir = tempfile::tempdir().unwrap();
        let report_dir = run_dir.path().join("006_default_feature_reports");
        create_dir_all(&report_dir).unwrap();
        write(
            report_dir.join("default_feature_reports.json"),
            feature_json.to_string(),
        )
        .unwrap();

        let report = FeatureReport::from_run_dir(run_dir.path(), "building_1", "Office 1", status)
            .unwrap();

        assert_eq!(report.simulation_status, Some(status));
        assert!(report.reporting_periods.is_empty());
        assert_eq!(report.timesteps_per_hour, None);
    }

    #[rstest]
    fn should_fall_back_to_placeholder_when_run_dir_has_no_report() {
        let run_dir = tempfile::tempdir().unwrap();

        let report =
            FeatureReport::from_run_dir(run_dir.path(), "7", "Shed", SimulationStatus::Failed)
                .unwrap();

        assert_eq!(report.simulation_status, Some(SimulationStatus::Failed));
        assert_eq!(report.name.as_deref(), Some("Shed"));
    }

    #[rstest]
    fn should_save_json_report(feature_json: Value) {
        let dir = tempfile::tempdir().unwrap();
        let output = FileOutput::new(dir.path().to_path_buf(), "{}.{}".to_string());
        let report = FeatureReport::from_value(feature_json).unwrap();

        report.save_json_report(&output, "default_feature_report").unwrap();
        report.save_json_report(&SinkOutput, "ignored").unwrap();

        let written =
            read_to_string(dir.path().join("feature_reports/default_feature_report.json")).unwrap();
        assert_eq!(
            FeatureReport::from_value(serde_json::from_str(&written).unwrap()).unwrap(),
            report
        );
    }

    #[rstest]
    fn should_successfully_parse_all_demo_files() {
        for entry in WalkDir::new("./demos/feature_reports")
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                !e.file_type().is_dir() && e.file_name().to_str().unwrap().ends_with("json")
            })
        {
            let value: Value =
                serde_json::from_reader(BufReader::new(File::open(entry.path()).unwrap())).unwrap();
            let parsed = FeatureReport::from_value(value);
            assert!(
                parsed.is_ok(),
                "error was {:?} when parsing file {}",
                parsed.err().unwrap(),
                entry.file_name().to_str().unwrap()
            );
        }
    }
}
