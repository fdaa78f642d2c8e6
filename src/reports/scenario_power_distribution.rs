use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Equipment of the district electrical network shared by all features of a scenario.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ScenarioPowerDistribution {
    pub substations: Vec<Substation>,
    pub distribution_lines: Vec<DistributionLine>,
    pub capacitors: Vec<Capacitor>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Substation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_voltage: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DistributionLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ampacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial_line_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Capacitor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_capacity: Option<f64>,
}

impl ScenarioPowerDistribution {
    pub fn add_substation(&mut self, substation: Substation) {
        self.substations.push(substation);
    }

    pub fn add_line(&mut self, line: DistributionLine) {
        self.distribution_lines.push(line);
    }

    pub fn add_capacitor(&mut self, capacitor: Capacitor) {
        self.capacitors.push(capacitor);
    }
}

impl ReportNode for ScenarioPowerDistribution {
    const DEFINITION: &'static str = "ScenarioPowerDistribution";
}
