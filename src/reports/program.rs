use crate::merge::{max_into, retain_into, sum_counts_into, sum_into, Merge, MergeRule, MergeRules};
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Building program of a feature: areas, heights, parking and occupancy.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Program {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditioned_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unconditioned_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_roof_height_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_number_of_stories: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_number_of_stories_above_ground: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_parking_spaces: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_parking_spaces_charging: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_footprint_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_parking_height_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_number_of_parking_stories: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_number_of_parking_stories_above_ground: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_residential_units: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub building_types: Vec<BuildingType>,
    pub window_area_sqft: WindowArea,
    pub wall_area_sqft: WallArea,
    pub roof_area_sqft: RoofArea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_construction_cost_dollar: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BuildingType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_occupancy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_area_sqft: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct WindowArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north_window_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub south_window_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east_window_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub west_window_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_window_area_sqft: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct WallArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north_wall_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub south_wall_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east_wall_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub west_wall_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_wall_area_sqft: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RoofArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_roof_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photovoltaic_roof_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_roof_area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_roof_area_sqft: Option<f64>,
}

impl Program {
    /// Accumulates another feature's program into this one.
    ///
    /// Building types are taken from `other` as a whole, so after aggregation they describe the
    /// last feature added.
    pub fn add_program(&mut self, other: &Program) {
        sum_into(&mut self.site_area_sqft, other.site_area_sqft);
        sum_into(&mut self.floor_area_sqft, other.floor_area_sqft);
        sum_into(&mut self.conditioned_area_sqft, other.conditioned_area_sqft);
        sum_into(
            &mut self.unconditioned_area_sqft,
            other.unconditioned_area_sqft,
        );
        sum_into(&mut self.footprint_area_sqft, other.footprint_area_sqft);
        max_into(&mut self.maximum_roof_height_ft, other.maximum_roof_height_ft);
        max_into(
            &mut self.maximum_number_of_stories,
            other.maximum_number_of_stories,
        );
        max_into(
            &mut self.maximum_number_of_stories_above_ground,
            other.maximum_number_of_stories_above_ground,
        );
        sum_into(&mut self.parking_area_sqft, other.parking_area_sqft);
        sum_counts_into(&mut self.number_of_parking_spaces, other.number_of_parking_spaces);
        sum_counts_into(&mut self.number_of_parking_spaces_charging, other.number_of_parking_spaces_charging);
        sum_into(
            &mut self.parking_footprint_area_sqft,
            other.parking_footprint_area_sqft,
        );
        max_into(
            &mut self.maximum_parking_height_ft,
            other.maximum_parking_height_ft,
        );
        max_into(
            &mut self.maximum_number_of_parking_stories,
            other.maximum_number_of_parking_stories,
        );
        max_into(
            &mut self.maximum_number_of_parking_stories_above_ground,
            other.maximum_number_of_parking_stories_above_ground,
        );
        sum_counts_into(&mut self.number_of_residential_units, other.number_of_residential_units);
        sum_into(
            &mut self.total_construction_cost_dollar,
            other.total_construction_cost_dollar,
        );

        self.building_types.clone_from(&other.building_types);

        self.window_area_sqft.merge(&other.window_area_sqft);
        self.wall_area_sqft.merge(&other.wall_area_sqft);
        self.roof_area_sqft.merge(&other.roof_area_sqft);

        retain_into(&mut self.orientation_deg, &other.orientation_deg);
        retain_into(&mut self.aspect_ratio, &other.aspect_ratio);
    }
}

impl MergeRules for Program {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("site_area_sqft", MergeRule::Sum),
        ("floor_area_sqft", MergeRule::Sum),
        ("conditioned_area_sqft", MergeRule::Sum),
        ("unconditioned_area_sqft", MergeRule::Sum),
        ("footprint_area_sqft", MergeRule::Sum),
        ("maximum_roof_height_ft", MergeRule::Max),
        ("maximum_number_of_stories", MergeRule::Max),
        ("maximum_number_of_stories_above_ground", MergeRule::Max),
        ("parking_area_sqft", MergeRule::Sum),
        ("number_of_parking_spaces", MergeRule::Sum),
        ("number_of_parking_spaces_charging", MergeRule::Sum),
        ("parking_footprint_area_sqft", MergeRule::Sum),
        ("maximum_parking_height_ft", MergeRule::Max),
        ("maximum_number_of_parking_stories", MergeRule::Max),
        ("maximum_number_of_parking_stories_above_ground", MergeRule::Max),
        ("number_of_residential_units", MergeRule::Sum),
        ("building_types", MergeRule::Replace),
        ("window_area_sqft", MergeRule::Nested),
        ("wall_area_sqft", MergeRule::Nested),
        ("roof_area_sqft", MergeRule::Nested),
        ("orientation_deg", MergeRule::Retain),
        ("aspect_ratio", MergeRule::Retain),
        ("total_construction_cost_dollar", MergeRule::Sum),
    ];
}

impl Merge for Program {
    fn merge(&mut self, other: &Self) {
        self.add_program(other);
    }
}

impl ReportNode for Program {
    const DEFINITION: &'static str = "Program";
}

impl MergeRules for WindowArea {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("north_window_area_sqft", MergeRule::Sum),
        ("south_window_area_sqft", MergeRule::Sum),
        ("east_window_area_sqft", MergeRule::Sum),
        ("west_window_area_sqft", MergeRule::Sum),
        ("total_window_area_sqft", MergeRule::Sum),
    ];
}

impl Merge for WindowArea {
    fn merge(&mut self, other: &Self) {
        sum_into(
            &mut self.north_window_area_sqft,
            other.north_window_area_sqft,
        );
        sum_into(
            &mut self.south_window_area_sqft,
            other.south_window_area_sqft,
        );
        sum_into(&mut self.east_window_area_sqft, other.east_window_area_sqft);
        sum_into(&mut self.west_window_area_sqft, other.west_window_area_sqft);
        sum_into(
            &mut self.total_window_area_sqft,
            other.total_window_area_sqft,
        );
    }
}

impl MergeRules for WallArea {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("north_wall_area_sqft", MergeRule::Sum),
        ("south_wall_area_sqft", MergeRule::Sum),
        ("east_wall_area_sqft", MergeRule::Sum),
        ("west_wall_area_sqft", MergeRule::Sum),
        ("total_wall_area_sqft", MergeRule::Sum),
    ];
}

impl Merge for WallArea {
    fn merge(&mut self, other: &Self) {
        sum_into(&mut self.north_wall_area_sqft, other.north_wall_area_sqft);
        sum_into(&mut self.south_wall_area_sqft, other.south_wall_area_sqft);
        sum_into(&mut self.east_wall_area_sqft, other.east_wall_area_sqft);
        sum_into(&mut self.west_wall_area_sqft, other.west_wall_area_sqft);
        sum_into(&mut self.total_wall_area_sqft, other.total_wall_area_sqft);
    }
}

impl MergeRules for RoofArea {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("equipment_roof_area_sqft", MergeRule::Sum),
        ("photovoltaic_roof_area_sqft", MergeRule::Sum),
        ("available_roof_area_sqft", MergeRule::Sum),
        ("total_roof_area_sqft", MergeRule::Sum),
    ];
}

impl Merge for RoofArea {
    fn merge(&mut self, other: &Self) {
        sum_into(
            &mut self.equipment_roof_area_sqft,
            other.equipment_roof_area_sqft,
        );
        sum_into(
            &mut self.photovoltaic_roof_area_sqft,
            other.photovoltaic_roof_area_sqft,
        );
        sum_into(
            &mut self.available_roof_area_sqft,
            other.available_roof_area_sqft,
        );
        sum_into(&mut self.total_roof_area_sqft, other.total_roof_area_sqft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::test_support::{assert_rules_cover, assert_self_merge_doubles};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn program() -> Program {
        Program {
            site_area_sqft: Some(20000.),
            floor_area_sqft: Some(12000.),
            conditioned_area_sqft: Some(11000.),
            unconditioned_area_sqft: Some(1000.),
            footprint_area_sqft: Some(4000.),
            maximum_roof_height_ft: Some(36.),
            maximum_number_of_stories: Some(3),
            maximum_number_of_stories_above_ground: Some(3),
            parking_area_sqft: Some(2500.),
            number_of_parking_spaces: Some(10),
            number_of_parking_spaces_charging: Some(2),
            parking_footprint_area_sqft: Some(2500.),
            maximum_parking_height_ft: Some(10.),
            maximum_number_of_parking_stories: Some(1),
            maximum_number_of_parking_stories_above_ground: Some(1),
            number_of_residential_units: Some(0),
            building_types: vec![BuildingType {
                building_type: Some("Office".into()),
                maximum_occupancy: Some(120.),
                floor_area_sqft: Some(12000.),
            }],
            window_area_sqft: WindowArea {
                north_window_area_sqft: Some(400.),
                south_window_area_sqft: Some(600.),
                east_window_area_sqft: Some(300.),
                west_window_area_sqft: Some(300.),
                total_window_area_sqft: Some(1600.),
            },
            wall_area_sqft: WallArea {
                north_wall_area_sqft: Some(1200.),
                south_wall_area_sqft: Some(1200.),
                east_wall_area_sqft: Some(900.),
                west_wall_area_sqft: Some(900.),
                total_wall_area_sqft: Some(4200.),
            },
            roof_area_sqft: RoofArea {
                equipment_roof_area_sqft: Some(200.),
                photovoltaic_roof_area_sqft: Some(1000.),
                available_roof_area_sqft: Some(2800.),
                total_roof_area_sqft: Some(4000.),
            },
            orientation_deg: Some(15.),
            aspect_ratio: Some(1.5),
            total_construction_cost_dollar: Some(2_500_000.),
        }
    }

    #[rstest]
    fn should_have_rule_for_every_field(program: Program) {
        assert_rules_cover(&program);
        assert_rules_cover(&program.window_area_sqft);
        assert_rules_cover(&program.wall_area_sqft);
        assert_rules_cover(&program.roof_area_sqft);
    }

    #[rstest]
    fn should_double_sums_and_keep_maxima(program: Program) {
        assert_self_merge_doubles(&program);
        assert_self_merge_doubles(&program.window_area_sqft);
        assert_self_merge_doubles(&program.wall_area_sqft);
        assert_self_merge_doubles(&program.roof_area_sqft);
    }

    #[rstest]
    fn should_add_program_of_another_feature(program: Program) {
        let mut existing = Program::from_value(json!({
            "floor_area_sqft": 1000.0,
            "maximum_number_of_stories": 5,
            "window_area_sqft": {"north_window_area_sqft": 10.0},
            "building_types": [{"building_type": "Retail"}],
        }))
        .unwrap();

        existing.add_program(&program);

        assert_eq!(existing.floor_area_sqft, Some(13000.));
        assert_eq!(existing.maximum_number_of_stories, Some(5));
        assert_eq!(existing.window_area_sqft.north_window_area_sqft, Some(410.));
        assert_eq!(existing.window_area_sqft.south_window_area_sqft, Some(600.));
        assert_eq!(existing.building_types, program.building_types);
        assert_eq!(existing.orientation_deg, Some(15.));
    }

    #[rstest]
    fn should_serialize_nested_areas_when_empty() {
        assert_eq!(
            Program::default().to_value().unwrap(),
            json!({"window_area_sqft": {}, "wall_area_sqft": {}, "roof_area_sqft": {}})
        );
    }

    #[rstest]
    fn should_reject_negative_story_count() {
        assert!(Program::from_value(json!({"maximum_number_of_stories": -1})).is_err());
    }
}
