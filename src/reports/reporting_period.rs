use crate::errors::MergeIncompatibility;
use crate::merge::{retain_into, sum_into, Merge, MergeRule, MergeRules};
use crate::reports::end_uses::EndUses;
use crate::reports::ReportNode;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a reporting period; reports use either a running index or a name.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PeriodId {
    Index(i64),
    Name(String),
}

impl Display for PeriodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodId::Index(index) => write!(f, "{index}"),
            PeriodId::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for PeriodId {
    fn from(value: i64) -> Self {
        PeriodId::Index(value)
    }
}

impl From<&str> for PeriodId {
    fn from(value: &str) -> Self {
        PeriodId::Name(value.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ReportDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl ReportDate {
    pub fn is_empty(&self) -> bool {
        self == &ReportDate::default()
    }
}

impl ReportNode for ReportDate {
    const DEFINITION: &'static str = "ReportDate";
}

/// Results of a feature or scenario over one period of the simulation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ReportingPeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PeriodId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    pub start_date: ReportDate,
    pub end_date: ReportDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_site_energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_source_energy_kwh: Option<f64>,
    #[serde(
        rename = "site_EUI_kwh_per_m2",
        skip_serializing_if = "Option::is_none"
    )]
    pub site_eui_kwh_per_m2: Option<f64>,
    #[serde(
        rename = "site_EUI_kbtu_per_ft2",
        skip_serializing_if = "Option::is_none"
    )]
    pub site_eui_kbtu_per_ft2: Option<f64>,
    #[serde(
        rename = "source_EUI_kwh_per_m2",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_eui_kwh_per_m2: Option<f64>,
    #[serde(
        rename = "source_EUI_kbtu_per_ft2",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_eui_kbtu_per_ft2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_site_energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_source_energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_utility_cost_dollar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_utility_cost_dollar: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub utility_costs_dollar: Vec<UtilityCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_gas_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propane_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_oil_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_fuels_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_cooling_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_heating_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_qbft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_produced_kwh: Option<f64>,
    pub end_uses: EndUses,
    pub energy_production_kwh: EnergyProduction,
    pub comfort_result: ComfortResult,
    pub emissions: Emissions,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct UtilityCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_dollar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_cost_dollar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand_cost_dollar: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct EnergyProduction {
    pub electricity_produced: ElectricityProduced,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ElectricityProduced {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photovoltaic: Option<f64>,
}

/// Unmet setpoint and thermal comfort hours.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ComfortResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_setpoint_not_met_during_occupied_cooling: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_setpoint_not_met_during_occupied_heating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_setpoint_not_met_during_occupied_hours: Option<f64>,
    #[serde(
        rename = "hours_out_of_comfort_bounds_PMV",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_out_of_comfort_bounds_pmv: Option<f64>,
    #[serde(
        rename = "hours_out_of_comfort_bounds_PPD",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_out_of_comfort_bounds_ppd: Option<f64>,
}

/// Greenhouse gas emissions in metric tons, and intensities per floor area.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Emissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_annual_emissions_mt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_hourly_emissions_mt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_annual_emissions_mt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_hourly_emissions_mt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_annual_emissions_intensity_kg_per_ft2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_hourly_emissions_intensity_kg_per_ft2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_annual_emissions_intensity_kg_per_ft2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_hourly_emissions_intensity_kg_per_ft2: Option<f64>,
}

impl ReportingPeriod {
    /// Adds the results of `other` into this period. Both periods must describe the same span,
    /// so differing ids are rejected and nothing is changed.
    pub fn merge_reporting_period(
        &mut self,
        other: &ReportingPeriod,
    ) -> Result<(), MergeIncompatibility> {
        if let (Some(existing), Some(new)) = (&self.id, &other.id) {
            if existing != new {
                return Err(MergeIncompatibility::ReportingPeriodIds {
                    existing: vec![existing.to_string()],
                    new: vec![new.to_string()],
                });
            }
        }

        retain_into(&mut self.id, &other.id);
        retain_into(&mut self.name, &other.name);
        retain_into(&mut self.multiplier, &other.multiplier);
        if self.start_date.is_empty() {
            self.start_date.clone_from(&other.start_date);
        }
        if self.end_date.is_empty() {
            self.end_date.clone_from(&other.end_date);
        }

        sum_into(&mut self.total_site_energy_kwh, other.total_site_energy_kwh);
        sum_into(
            &mut self.total_source_energy_kwh,
            other.total_source_energy_kwh,
        );
        retain_into(&mut self.site_eui_kwh_per_m2, &other.site_eui_kwh_per_m2);
        retain_into(&mut self.site_eui_kbtu_per_ft2, &other.site_eui_kbtu_per_ft2);
        retain_into(&mut self.source_eui_kwh_per_m2, &other.source_eui_kwh_per_m2);
        retain_into(
            &mut self.source_eui_kbtu_per_ft2,
            &other.source_eui_kbtu_per_ft2,
        );
        sum_into(&mut self.net_site_energy_kwh, other.net_site_energy_kwh);
        sum_into(&mut self.net_source_energy_kwh, other.net_source_energy_kwh);
        sum_into(
            &mut self.total_utility_cost_dollar,
            other.total_utility_cost_dollar,
        );
        sum_into(
            &mut self.net_utility_cost_dollar,
            other.net_utility_cost_dollar,
        );
        merge_utility_costs(&mut self.utility_costs_dollar, &other.utility_costs_dollar);

        sum_into(&mut self.electricity_kwh, other.electricity_kwh);
        sum_into(&mut self.natural_gas_kwh, other.natural_gas_kwh);
        sum_into(&mut self.propane_kwh, other.propane_kwh);
        sum_into(&mut self.fuel_oil_kwh, other.fuel_oil_kwh);
        sum_into(&mut self.other_fuels_kwh, other.other_fuels_kwh);
        sum_into(&mut self.district_cooling_kwh, other.district_cooling_kwh);
        sum_into(&mut self.district_heating_kwh, other.district_heating_kwh);
        sum_into(&mut self.water_qbft, other.water_qbft);
        sum_into(
            &mut self.electricity_produced_kwh,
            other.electricity_produced_kwh,
        );

        self.end_uses.merge_end_uses(&other.end_uses);
        sum_into(
            &mut self.energy_production_kwh.electricity_produced.photovoltaic,
            other.energy_production_kwh.electricity_produced.photovoltaic,
        );
        self.comfort_result.merge(&other.comfort_result);
        self.emissions.merge(&other.emissions);

        Ok(())
    }
}

/// Costs are matched up by fuel type; fuels not yet present are appended.
fn merge_utility_costs(existing: &mut Vec<UtilityCost>, new: &[UtilityCost]) {
    for cost in new {
        match existing
            .iter_mut()
            .find(|candidate| candidate.fuel_type == cost.fuel_type)
        {
            Some(matched) => {
                sum_into(&mut matched.total_cost_dollar, cost.total_cost_dollar);
                sum_into(&mut matched.usage_cost_dollar, cost.usage_cost_dollar);
                sum_into(&mut matched.demand_cost_dollar, cost.demand_cost_dollar);
            }
            None => existing.push(cost.clone()),
        }
    }
}

fn period_ids(periods: &[ReportingPeriod]) -> Vec<String> {
    periods
        .iter()
        .map(|period| {
            period
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .collect()
}

/// Checks whether `new` can be merged into `existing` by [`merge_reporting_periods`].
pub fn check_reporting_periods(
    existing: &[ReportingPeriod],
    new: &[ReportingPeriod],
) -> Result<(), MergeIncompatibility> {
    if existing.is_empty()
        || existing
            .iter()
            .map(|period| &period.id)
            .eq(new.iter().map(|period| &period.id))
    {
        Ok(())
    } else {
        Err(MergeIncompatibility::ReportingPeriodIds {
            existing: period_ids(existing),
            new: period_ids(new),
        })
    }
}

/// Merges a sequence of periods into another, pairing them up by position.
///
/// An empty target takes a copy of `new`. Otherwise the id sequences must be identical, and on
/// mismatch neither list is changed.
pub fn merge_reporting_periods(
    existing: &mut Vec<ReportingPeriod>,
    new: &[ReportingPeriod],
) -> Result<(), MergeIncompatibility> {
    check_reporting_periods(existing, new)?;

    if existing.is_empty() {
        existing.extend_from_slice(new);
        return Ok(());
    }

    for (existing_period, new_period) in existing.iter_mut().zip_eq(new) {
        existing_period.merge_reporting_period(new_period)?;
    }

    Ok(())
}

impl MergeRules for ReportingPeriod {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("id", MergeRule::Retain),
        ("name", MergeRule::Retain),
        ("multiplier", MergeRule::Retain),
        ("start_date", MergeRule::Retain),
        ("end_date", MergeRule::Retain),
        ("total_site_energy_kwh", MergeRule::Sum),
        ("total_source_energy_kwh", MergeRule::Sum),
        ("site_EUI_kwh_per_m2", MergeRule::Retain),
        ("site_EUI_kbtu_per_ft2", MergeRule::Retain),
        ("source_EUI_kwh_per_m2", MergeRule::Retain),
        ("source_EUI_kbtu_per_ft2", MergeRule::Retain),
        ("net_site_energy_kwh", MergeRule::Sum),
        ("net_source_energy_kwh", MergeRule::Sum),
        ("total_utility_cost_dollar", MergeRule::Sum),
        ("net_utility_cost_dollar", MergeRule::Sum),
        ("utility_costs_dollar", MergeRule::Nested),
        ("electricity_kwh", MergeRule::Sum),
        ("natural_gas_kwh", MergeRule::Sum),
        ("propane_kwh", MergeRule::Sum),
        ("fuel_oil_kwh", MergeRule::Sum),
        ("other_fuels_kwh", MergeRule::Sum),
        ("district_cooling_kwh", MergeRule::Sum),
        ("district_heating_kwh", MergeRule::Sum),
        ("water_qbft", MergeRule::Sum),
        ("electricity_produced_kwh", MergeRule::Sum),
        ("end_uses", MergeRule::Nested),
        ("energy_production_kwh", MergeRule::Sum),
        ("comfort_result", MergeRule::Nested),
        ("emissions", MergeRule::Nested),
    ];
}

impl ReportNode for ReportingPeriod {
    const DEFINITION: &'static str = "ReportingPeriod";
}

impl MergeRules for ComfortResult {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        (
            "time_setpoint_not_met_during_occupied_cooling",
            MergeRule::Sum,
        ),
        (
            "time_setpoint_not_met_during_occupied_heating",
            MergeRule::Sum,
        ),
        ("time_setpoint_not_met_during_occupied_hours", MergeRule::Sum),
        ("hours_out_of_comfort_bounds_PMV", MergeRule::Sum),
        ("hours_out_of_comfort_bounds_PPD", MergeRule::Sum),
    ];
}

impl Merge for ComfortResult {
    fn merge(&mut self, other: &Self) {
        sum_into(
            &mut self.time_setpoint_not_met_during_occupied_cooling,
            other.time_setpoint_not_met_during_occupied_cooling,
        );
        sum_into(
            &mut self.time_setpoint_not_met_during_occupied_heating,
            other.time_setpoint_not_met_during_occupied_heating,
        );
        sum_into(
            &mut self.time_setpoint_not_met_during_occupied_hours,
            other.time_setpoint_not_met_during_occupied_hours,
        );
        sum_into(
            &mut self.hours_out_of_comfort_bounds_pmv,
            other.hours_out_of_comfort_bounds_pmv,
        );
        sum_into(
            &mut self.hours_out_of_comfort_bounds_ppd,
            other.hours_out_of_comfort_bounds_ppd,
        );
    }
}

impl MergeRules for Emissions {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("future_annual_emissions_mt", MergeRule::Sum),
        ("future_hourly_emissions_mt", MergeRule::Sum),
        ("historical_annual_emissions_mt", MergeRule::Sum),
        ("historical_hourly_emissions_mt", MergeRule::Sum),
        ("future_annual_emissions_intensity_kg_per_ft2", MergeRule::Sum),
        ("future_hourly_emissions_intensity_kg_per_ft2", MergeRule::Sum),
        (
            "historical_annual_emissions_intensity_kg_per_ft2",
            MergeRule::Sum,
        ),
        (
            "historical_hourly_emissions_intensity_kg_per_ft2",
            MergeRule::Sum,
        ),
    ];
}

/// Intensities are summed like the masses, so a scenario total is the sum of its features'
/// intensities rather than an area weighted mean.
impl Merge for Emissions {
    fn merge(&mut self, other: &Self) {
        sum_into(
            &mut self.future_annual_emissions_mt,
            other.future_annual_emissions_mt,
        );
        sum_into(
            &mut self.future_hourly_emissions_mt,
            other.future_hourly_emissions_mt,
        );
        sum_into(
            &mut self.historical_annual_emissions_mt,
            other.historical_annual_emissions_mt,
        );
        sum_into(
            &mut self.historical_hourly_emissions_mt,
            other.historical_hourly_emissions_mt,
        );
        sum_into(
            &mut self.future_annual_emissions_intensity_kg_per_ft2,
            other.future_annual_emissions_intensity_kg_per_ft2,
        );
        sum_into(
            &mut self.future_hourly_emissions_intensity_kg_per_ft2,
            other.future_hourly_emissions_intensity_kg_per_ft2,
        );
        sum_into(
            &mut self.historical_annual_emissions_intensity_kg_per_ft2,
            other.historical_annual_emissions_intensity_kg_per_ft2,
        );
        sum_into(
            &mut self.historical_hourly_emissions_intensity_kg_per_ft2,
            other.historical_hourly_emissions_intensity_kg_per_ft2,
        );
    }
}
