use crate::reports::ReportNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of upgrading the district electrical network: remaining violations, the upgrades
/// made and what they cost.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ScenarioPowerDistributionCost {
    pub results: Vec<CostResult>,
    pub outputs: Vec<CostOutput>,
    pub violation_summary: Vec<ViolationSummary>,
    pub costs_per_equipment: Vec<CostPerEquipment>,
    pub equipment: Vec<UpgradedEquipment>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CostResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_violations: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CostOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    pub jobs: Vec<Value>,
}

/// Network violations found at one stage of the upgrade.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ViolationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_time_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal_violations_present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_violations_present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bus_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bus_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_voltage_violation_buses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_overvoltage_violation_buses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_upper_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_undervoltage_violation_buses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_lower_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_loading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_transformer_loading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_line_violations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_upper_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_transformer_violations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_upper_limit: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CostPerEquipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
}

/// A rating or setting of upgraded equipment, numeric or named.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

/// One piece of network equipment and how up to three of its parameters changed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct UpgradedEquipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter1_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter1_original: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter1_upgraded: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter2_original: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter2_upgraded: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter3_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter3_original: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter3_upgraded: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScenarioPowerDistributionCost {
    pub fn add_result(&mut self, result: CostResult) {
        self.results.push(result);
    }

    pub fn add_outputs(&mut self, output: CostOutput) {
        self.outputs.push(output);
    }

    pub fn add_violation_summary(&mut self, summary: ViolationSummary) {
        self.violation_summary.push(summary);
    }

    pub fn add_costs_per_equipment(&mut self, cost: CostPerEquipment) {
        self.costs_per_equipment.push(cost);
    }

    pub fn add_equipment(&mut self, equipment: UpgradedEquipment) {
        self.equipment.push(equipment);
    }
}

impl ReportNode for ScenarioPowerDistributionCost {
    const DEFINITION: &'static str = "ScenarioPowerDistributionCost";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    fn should_keep_empty_lists_when_serializing() {
        let value = ScenarioPowerDistributionCost::default().to_value().unwrap();

        assert_eq!(
            value,
            json!({
                "results": [],
                "outputs": [],
                "violation_summary": [],
                "costs_per_equipment": [],
                "equipment": [],
            })
        );
    }

    #[rstest]
    fn should_collect_upgrade_results() {
        let mut cost = ScenarioPowerDistributionCost::default();
        cost.add_result(CostResult {
            num_violations: Some(3),
        });
        cost.add_outputs(CostOutput {
            log_file: Some("upgrade_cost.log".into()),
            jobs: vec![],
        });
        cost.add_violation_summary(ViolationSummary {
            stage: Some("Initial".into()),
            thermal_violations_present: Some(true),
            max_line_loading: Some(1.23),
            num_line_violations: Some(2),
            ..Default::default()
        });
        cost.add_costs_per_equipment(CostPerEquipment {
            name: Some("transformer".into()),
            equipment_type: Some("new".into()),
            count: Some(2),
            total_cost_usd: Some(45000.),
        });
        cost.add_equipment(UpgradedEquipment {
            equipment_type: Some("Transformer".into()),
            equipment_name: Some("tr_1".into()),
            parameter1_name: Some("kva".into()),
            parameter1_original: Some(ParameterValue::Number(75.)),
            parameter1_upgraded: Some(ParameterValue::Number(150.)),
            parameter2_name: Some("conn".into()),
            parameter2_original: Some(ParameterValue::Text("wye".into())),
            ..Default::default()
        });

        let value = cost.to_value().unwrap();

        assert_eq!(value["results"], json!([{"num_violations": 3}]));
        assert_eq!(value["outputs"][0]["jobs"], json!([]));
        assert_eq!(
            value["costs_per_equipment"][0],
            json!({"name": "transformer", "type": "new", "count": 2, "total_cost_usd": 45000.0})
        );
        assert_eq!(value["equipment"][0]["parameter1_upgraded"], json!(150.0));
        assert_eq!(value["equipment"][0]["parameter2_original"], json!("wye"));
        assert_eq!(ScenarioPowerDistributionCost::from_value(value).unwrap(), cost);
    }

    #[rstest]
    fn should_reject_negative_cost() {
        let result = ScenarioPowerDistributionCost::from_value(json!({
            "costs_per_equipment": [{"total_cost_usd": -1.0}],
        }));

        assert!(result.is_err());
    }
}
