use crate::merge::{Merge, MergeRule, MergeRules};
use crate::reports::end_use::EndUse;
use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoEnumIterator};
use strum_macros::EnumIter;

/// End use breakdowns per fuel. Each fuel is always present, empty if nothing was reported.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct EndUses {
    pub electricity_kwh: EndUse,
    pub natural_gas_kwh: EndUse,
    pub propane_kwh: EndUse,
    pub fuel_oil_kwh: EndUse,
    pub other_fuels_kwh: EndUse,
    pub district_cooling_kwh: EndUse,
    pub district_heating_kwh: EndUse,
    pub water_qbft: EndUse,
}

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
pub enum FuelType {
    #[strum(serialize = "electricity_kwh")]
    Electricity,
    #[strum(serialize = "natural_gas_kwh")]
    NaturalGas,
    #[strum(serialize = "propane_kwh")]
    Propane,
    #[strum(serialize = "fuel_oil_kwh")]
    FuelOil,
    #[strum(serialize = "other_fuels_kwh")]
    OtherFuels,
    #[strum(serialize = "district_cooling_kwh")]
    DistrictCooling,
    #[strum(serialize = "district_heating_kwh")]
    DistrictHeating,
    #[strum(serialize = "water_qbft")]
    Water,
}

impl EndUses {
    pub fn end_use(&self, fuel: FuelType) -> &EndUse {
        match fuel {
            FuelType::Electricity => &self.electricity_kwh,
            FuelType::NaturalGas => &self.natural_gas_kwh,
            FuelType::Propane => &self.propane_kwh,
            FuelType::FuelOil => &self.fuel_oil_kwh,
            FuelType::OtherFuels => &self.other_fuels_kwh,
            FuelType::DistrictCooling => &self.district_cooling_kwh,
            FuelType::DistrictHeating => &self.district_heating_kwh,
            FuelType::Water => &self.water_qbft,
        }
    }

    pub fn end_use_mut(&mut self, fuel: FuelType) -> &mut EndUse {
        match fuel {
            FuelType::Electricity => &mut self.electricity_kwh,
            FuelType::NaturalGas => &mut self.natural_gas_kwh,
            FuelType::Propane => &mut self.propane_kwh,
            FuelType::FuelOil => &mut self.fuel_oil_kwh,
            FuelType::OtherFuels => &mut self.other_fuels_kwh,
            FuelType::DistrictCooling => &mut self.district_cooling_kwh,
            FuelType::DistrictHeating => &mut self.district_heating_kwh,
            FuelType::Water => &mut self.water_qbft,
        }
    }

    pub fn merge_end_uses(&mut self, other: &EndUses) {
        for fuel in FuelType::iter() {
            self.end_use_mut(fuel).merge_end_use(other.end_use(fuel));
        }
    }
}

impl MergeRules for EndUses {
    const RULES: &'static [(&'static str, MergeRule)] = &[
        ("electricity_kwh", MergeRule::Nested),
        ("natural_gas_kwh", MergeRule::Nested),
        ("propane_kwh", MergeRule::Nested),
        ("fuel_oil_kwh", MergeRule::Nested),
        ("other_fuels_kwh", MergeRule::Nested),
        ("district_cooling_kwh", MergeRule::Nested),
        ("district_heating_kwh", MergeRule::Nested),
        ("water_qbft", MergeRule::Nested),
    ];
}

impl Merge for EndUses {
    fn merge(&mut self, other: &Self) {
        self.merge_end_uses(other);
    }
}

impl ReportNode for EndUses {
    const DEFINITION: &'static str = "EndUses";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::test_support::assert_rules_cover;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    fn should_serialize_every_fuel_even_when_empty() {
        let value = EndUses::default().to_value().unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 8);
        for fuel in FuelType::iter() {
            assert_eq!(object[&fuel.to_string()], json!({}));
        }
        assert_rules_cover(&EndUses::default());
    }

    #[rstest]
    fn should_merge_each_fuel_separately() {
        let mut existing = EndUses::from_value(json!({
            "electricity_kwh": {"heating": 100.0},
            "natural_gas_kwh": {"heating": 40.0},
        }))
        .unwrap();
        let new = EndUses::from_value(json!({
            "electricity_kwh": {"heating": 50.0, "fans": 3.0},
        }))
        .unwrap();

        existing.merge(&new);

        assert_eq!(existing.electricity_kwh.heating, Some(150.));
        assert_eq!(existing.electricity_kwh.fans, Some(3.));
        assert_eq!(existing.natural_gas_kwh.heating, Some(40.));
        assert_eq!(existing.end_use(FuelType::Water), &EndUse::default());
    }
}
