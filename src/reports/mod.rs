//! Typed records of the feature and scenario report documents.

pub mod construction_cost;
pub mod distributed_generation;
pub mod end_use;
pub mod end_uses;
pub mod feature_report;
pub mod location;
pub mod power_distribution;
pub mod program;
pub mod qaqc_flags;
pub mod reporting_period;
pub mod scenario_power_distribution;
pub mod scenario_power_distribution_cost;
pub mod scenario_report;
pub mod thermal_storage;
pub mod timeseries_csv;

use crate::errors::ReportError;
use crate::schema::Validator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A record that maps onto one definition of the report schema.
///
/// Reading strips `null` members, validates and then deserializes, so a missing field takes its
/// default and unknown keys are dropped. Writing serializes and then validates the output.
pub trait ReportNode: Serialize + DeserializeOwned {
    const DEFINITION: &'static str;

    fn from_value_with(value: Value, validator: &Validator) -> Result<Self, ReportError> {
        let value = strip_nulls(value);
        validator.ensure_valid(Self::DEFINITION, &value)?;

        Ok(serde_json::from_value(value)?)
    }

    fn from_value(value: Value) -> Result<Self, ReportError> {
        Self::from_value_with(value, &*Validator::shared()?)
    }

    fn to_value_with(&self, validator: &Validator) -> Result<Value, ReportError> {
        let value = serde_json::to_value(self)?;
        validator.ensure_valid(Self::DEFINITION, &value)?;

        Ok(value)
    }

    fn to_value(&self) -> Result<Value, ReportError> {
        self.to_value_with(&*Validator::shared()?)
    }
}

/// Removes members whose value is `null` from every object in the tree.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, strip_nulls(value)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}
