use crate::errors::{MergeIncompatibility, ReportError};
use crate::merge::Merge;
use crate::output::{write_json, Output};
use crate::reports::distributed_generation::DistributedGeneration;
use crate::reports::feature_report::{FeatureReport, SimulationStatus};
use crate::reports::location::Location;
use crate::reports::power_distribution::PowerDistribution;
use crate::reports::program::Program;
use crate::reports::qaqc_flags::QaqcFlags;
use crate::reports::reporting_period::{
    check_reporting_periods, merge_reporting_periods, ReportingPeriod,
};
use crate::reports::scenario_power_distribution::ScenarioPowerDistribution;
use crate::reports::scenario_power_distribution_cost::ScenarioPowerDistributionCost;
use crate::reports::thermal_storage::ThermalStorage;
use crate::reports::timeseries_csv::TimeseriesCsv;
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Results of a whole scenario: the features' results merged together, plus the feature
/// reports themselves.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ScenarioReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timesteps_per_hour: Option<u32>,
    pub number_of_not_started_simulations: u32,
    pub number_of_started_simulations: u32,
    pub number_of_complete_simulations: u32,
    pub number_of_failed_simulations: u32,
    pub timeseries_csv: TimeseriesCsv,
    pub location: Location,
    pub program: Program,
    pub reporting_periods: Vec<ReportingPeriod>,
    pub distributed_generation: DistributedGeneration,
    pub power_distribution: PowerDistribution,
    pub thermal_storage: ThermalStorage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qaqc_flags: Option<QaqcFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_power_distribution: Option<ScenarioPowerDistribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_power_distribution_cost: Option<ScenarioPowerDistributionCost>,
    pub feature_reports: Vec<FeatureReport>,
}

impl ScenarioReport {
    pub fn new(id: &str, name: &str, directory_name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            directory_name: Some(directory_name.to_string()),
            ..Default::default()
        }
    }

    /// Folds a feature report into the scenario.
    ///
    /// The feature is always counted and listed, but its results are only merged when its
    /// simulation completed. Incompatible reports are rejected before anything is changed.
    pub fn add_feature_report(&mut self, feature_report: FeatureReport) -> Result<(), ReportError> {
        let feature_id = feature_report.id.clone().unwrap_or_default();
        let complete = feature_report.is_complete();

        if complete {
            if let (Some(scenario), Some(feature)) =
                (self.timesteps_per_hour, feature_report.timesteps_per_hour)
            {
                if scenario != feature {
                    return Err(
                        MergeIncompatibility::TimestepsPerHour { scenario, feature }.into(),
                    );
                }
            }
            check_reporting_periods(&self.reporting_periods, &feature_report.reporting_periods)?;
        }

        match feature_report.simulation_status {
            None | Some(SimulationStatus::Complete) => self.number_of_complete_simulations += 1,
            Some(SimulationStatus::Failed) => self.number_of_failed_simulations += 1,
            Some(SimulationStatus::Started) => self.number_of_started_simulations += 1,
            Some(SimulationStatus::NotStarted) => self.number_of_not_started_simulations += 1,
        }

        if complete {
            debug!("merging results of feature {feature_id} into scenario");
            if self.timesteps_per_hour.is_none() {
                self.timesteps_per_hour = feature_report.timesteps_per_hour;
            }
            self.location.merge(&feature_report.location);
            self.program.add_program(&feature_report.program);
            merge_reporting_periods(
                &mut self.reporting_periods,
                &feature_report.reporting_periods,
            )?;
            self.distributed_generation
                .merge_distributed_generation(&feature_report.distributed_generation);
            self.power_distribution
                .merge_power_distribution(&feature_report.power_distribution);
            self.thermal_storage
                .merge_thermal_storage(&feature_report.thermal_storage);
            if let Some(flags) = &feature_report.qaqc_flags {
                self.qaqc_flags
                    .get_or_insert_with(QaqcFlags::default)
                    .add_qaqc_flags(flags);
            }
        } else {
            warn!(
                "feature {feature_id} has simulation status {}, its results are not included in the scenario",
                feature_report
                    .simulation_status
                    .map(|status| status.to_string())
                    .unwrap_or_default()
            );
        }

        self.feature_reports.push(feature_report);

        Ok(())
    }

    /// Writes the validated report to `<file_name>.json`.
    pub fn save_json_report(&self, output: &impl Output, file_name: &str) -> Result<(), ReportError> {
        let value = self.to_value()?;
        write_json(output, file_name, &value)?;

        Ok(())
    }
}

impl ReportNode for ScenarioReport {
    const DEFINITION: &'static str = "ScenarioReport";
}
