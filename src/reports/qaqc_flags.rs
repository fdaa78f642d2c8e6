use crate::merge::{sum_counts_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Counts of quality assurance checks that flagged a feature's model, per check category.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct QaqcFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eui_reasonableness: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_use_by_category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical_system_part_load_efficiency: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simultaneous_heating_and_cooling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_and_zone_air_temperature: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_loads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_r_value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domestic_hot_water: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical_system_efficiency: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_qaqc_flags: Option<u64>,
}

impl QaqcFlags {
    pub fn add_qaqc_flags(&mut self, other: &QaqcFlags) {
        sum_counts_into(&mut self.eui_reasonableness, other.eui_reasonableness);
        sum_counts_into(&mut self.end_use_by_category, other.end_use_by_category);
        sum_counts_into(
            &mut self.mechanical_system_part_load_efficiency,
            other.mechanical_system_part_load_efficiency,
        );
        sum_counts_into(
            &mut self.simultaneous_heating_and_cooling,
            other.simultaneous_heating_and_cooling,
        );
        sum_counts_into(
            &mut self.supply_and_zone_air_temperature,
            other.supply_and_zone_air_temperature,
        );
        sum_counts_into(&mut self.internal_loads, other.internal_loads);
        sum_counts_into(&mut self.schedules, other.schedules);
        sum_counts_into(&mut self.envelope_r_value, other.envelope_r_value);
        sum_counts_into(&mut self.domestic_hot_water, other.domestic_hot_water);
        sum_counts_into(
            &mut self.mechanical_system_efficiency,
            other.mechanical_system_efficiency,
        );
        sum_counts_into(&mut self.total_qaqc_flags, other.total_qaqc_flags);
    }
}

impl MergeRules for QaqcFlags {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("eui_reasonableness", MergeRule::Sum),
        ("end_use_by_category", MergeRule::Sum),
        ("mechanical_system_part_load_efficiency", MergeRule::Sum),
        ("simultaneous_heating_and_cooling", MergeRule::Sum),
        ("supply_and_zone_air_temperature", MergeRule::Sum),
        ("internal_loads", MergeRule::Sum),
        ("schedules", MergeRule::Sum),
        ("envelope_r_value", MergeRule::Sum),
        ("domestic_hot_water", MergeRule::Sum),
        ("mechanical_system_efficiency", MergeRule::Sum),
        ("total_qaqc_flags", MergeRule::Sum),
    ];
}

impl Merge for QaqcFlags {
    fn merge(&mut self, other: &Self) {
        self.add_qaqc_flags(other);
    }
}

impl ReportNode for QaqcFlags {
    const DEFINITION: &'static str = "QaqcFlags";
}
