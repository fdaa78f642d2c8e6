use crate::merge::{max_into, retain_into, sum_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Results of an electrical distribution network analysis for a feature.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PowerDistribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under_voltage_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over_voltage_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactance_resistance_ratio: Option<f64>,
    /// Volts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_power_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reactive_power_kvar: Option<f64>,
}

impl PowerDistribution {
    pub fn merge_power_distribution(&mut self, other: &PowerDistribution) {
        sum_into(&mut self.under_voltage_hours, other.under_voltage_hours);
        sum_into(&mut self.over_voltage_hours, other.over_voltage_hours);
        sum_into(&mut self.nominal_capacity, other.nominal_capacity);
        retain_into(
            &mut self.reactance_resistance_ratio,
            &other.reactance_resistance_ratio,
        );
        retain_into(&mut self.nominal_voltage, &other.nominal_voltage);
        max_into(&mut self.max_power_kw, other.max_power_kw);
        max_into(&mut self.max_reactive_power_kvar, other.max_reactive_power_kvar);
    }
}

impl MergeRules for PowerDistribution {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("under_voltage_hours", MergeRule::Sum),
        ("over_voltage_hours", MergeRule::Sum),
        ("nominal_capacity", MergeRule::Sum),
        ("reactance_resistance_ratio", MergeRule::Retain),
        ("nominal_voltage", MergeRule::Retain),
        ("max_power_kw", MergeRule::Max),
        ("max_reactive_power_kvar", MergeRule::Max),
    ];
}

impl Merge for PowerDistribution {
    fn merge(&mut self, other: &Self) {
        self.merge_power_distribution(other);
    }
}

impl ReportNode for PowerDistribution {
    const DEFINITION: &'static str = "PowerDistribution";
}
