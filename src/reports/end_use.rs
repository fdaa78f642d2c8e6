use crate::merge::{sum_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Energy per end use category for a single fuel, in the unit of the enclosing fuel key.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct EndUse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_lighting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_lighting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_equipment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_equipment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electric_vehicles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fans: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pumps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_rejection: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidification: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_recovery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_systems: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refrigeration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generators: Option<f64>,
}

impl EndUse {
    pub fn merge_end_use(&mut self, other: &EndUse) {
        sum_into(&mut self.heating, other.heating);
        sum_into(&mut self.cooling, other.cooling);
        sum_into(&mut self.interior_lighting, other.interior_lighting);
        sum_into(&mut self.exterior_lighting, other.exterior_lighting);
        sum_into(&mut self.interior_equipment, other.interior_equipment);
        sum_into(&mut self.exterior_equipment, other.exterior_equipment);
        sum_into(&mut self.electric_vehicles, other.electric_vehicles);
        sum_into(&mut self.fans, other.fans);
        sum_into(&mut self.pumps, other.pumps);
        sum_into(&mut self.heat_rejection, other.heat_rejection);
        sum_into(&mut self.humidification, other.humidification);
        sum_into(&mut self.heat_recovery, other.heat_recovery);
        sum_into(&mut self.water_systems, other.water_systems);
        sum_into(&mut self.refrigeration, other.refrigeration);
        sum_into(&mut self.generators, other.generators);
    }
}

impl MergeRules for EndUse {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("heating", MergeRule::Sum),
        ("cooling", MergeRule::Sum),
        ("interior_lighting", MergeRule::Sum),
        ("exterior_lighting", MergeRule::Sum),
        ("interior_equipment", MergeRule::Sum),
        ("exterior_equipment", MergeRule::Sum),
        ("electric_vehicles", MergeRule::Sum),
        ("fans", MergeRule::Sum),
        ("pumps", MergeRule::Sum),
        ("heat_rejection", MergeRule::Sum),
        ("humidification", MergeRule::Sum),
        ("heat_recovery", MergeRule::Sum),
        ("water_systems", MergeRule::Sum),
        ("refrigeration", MergeRule::Sum),
        ("generators", MergeRule::Sum),
    ];
}

impl Merge for EndUse {
    fn merge(&mut self, other: &Self) {
        self.merge_end_use(other);
    }
}

impl ReportNode for EndUse {
    const DEFINITION: &'static str = "EndUse";
}
