use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};

/// Cost of one item used to construct a feature.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ConstructionCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl ReportNode for ConstructionCost {
    const DEFINITION: &'static str = "ConstructionCost";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    fn should_read_cost_item() {
        let cost = ConstructionCost::from_value(json!({
            "category": "Construction",
            "item_name": "Exterior Wall",
            "unit_cost": 12.5,
            "cost_units": "CostPerArea",
            "item_quantity": null,
            "total_cost": 25000.0,
        }))
        .unwrap();

        assert_eq!(cost.item_name.as_deref(), Some("Exterior Wall"));
        assert_eq!(cost.item_quantity, None);
        assert_eq!(cost.to_value().unwrap()["total_cost"], json!(25000.0));
    }
}
