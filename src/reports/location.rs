use crate::merge::{retain_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_elevation_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_filename: Option<String>,
}

impl MergeRules for Location {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("latitude_deg", MergeRule::Retain),
        ("longitude_deg", MergeRule::Retain),
        ("surface_elevation_ft", MergeRule::Retain),
        ("weather_filename", MergeRule::Retain),
    ];
}

/// A scenario keeps the first location reported by any of its features.
impl Merge for Location {
    fn merge(&mut self, other: &Self) {
        retain_into(&mut self.latitude_deg, &other.latitude_deg);
        retain_into(&mut self.longitude_deg, &other.longitude_deg);
        retain_into(&mut self.surface_elevation_ft, &other.surface_elevation_ft);
        retain_into(&mut self.weather_filename, &other.weather_filename);
    }
}

impl ReportNode for Location {
    const DEFINITION: &'static str = "Location";
}
