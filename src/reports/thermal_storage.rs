use crate::merge::{sum_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Ice and pit thermal energy storage capacities.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ThermalStorage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub its_size_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptes_size_kwh: Option<f64>,
}

impl ThermalStorage {
    pub fn merge_thermal_storage(&mut self, other: &ThermalStorage) {
        sum_into(&mut self.its_size_kwh, other.its_size_kwh);
        sum_into(&mut self.ptes_size_kwh, other.ptes_size_kwh);
    }
}

impl MergeRules for ThermalStorage {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("its_size_kwh", MergeRule::Sum),
        ("ptes_size_kwh", MergeRule::Sum),
    ];
}

impl Merge for ThermalStorage {
    fn merge(&mut self, other: &Self) {
        self.merge_thermal_storage(other);
    }
}

impl ReportNode for ThermalStorage {
    const DEFINITION: &'static str = "ThermalStorage";
}
