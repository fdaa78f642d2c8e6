use crate::errors::ReportError;
use indexmap::IndexMap;
use jsonschema::Draft;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const EMBEDDED_SCHEMA: &str = include_str!("../schema/scenario_schema.json");

static SHARED_VALIDATOR: Mutex<Option<Arc<Validator>>> = parking_lot::const_mutex(None);

/// Checks report data against the named definitions of a draft 6 schema document.
///
/// One compiled validator is kept per definition, each referring back into the whole document
/// so that `$ref`s between definitions resolve.
pub struct Validator {
    document: Value,
    definitions: IndexMap<String, jsonschema::Validator>,
}

impl Validator {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let document = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, ReportError> {
        let all_definitions = document
            .get("definitions")
            .and_then(Value::as_object)
            .ok_or_else(|| ReportError::InvalidSchema("document has no definitions".into()))?;

        let mut definitions = IndexMap::with_capacity(all_definitions.len());
        for name in all_definitions.keys() {
            let wrapper = json!({
                "$schema": "http://json-schema.org/draft-06/schema#",
                "definitions": all_definitions,
                "allOf": [{ "$ref": format!("#/definitions/{name}") }],
            });
            let compiled = jsonschema::options()
                .with_draft(Draft::Draft6)
                .build(&wrapper)
                .map_err(|err| ReportError::InvalidSchema(format!("definition {name}: {err}")))?;
            definitions.insert(name.clone(), compiled);
        }
        debug!("compiled {} report schema definitions", definitions.len());

        Ok(Self {
            document,
            definitions,
        })
    }

    /// The process-wide validator over the schema document built into this crate, or the one
    /// passed to [`Validator::install_shared`]. Loaded at most once.
    pub fn shared() -> Result<Arc<Validator>, ReportError> {
        let mut shared = SHARED_VALIDATOR.lock();
        if let Some(validator) = shared.as_ref() {
            return Ok(Arc::clone(validator));
        }

        debug!("loading embedded report schema");
        let validator = Arc::new(Self::from_value(serde_json::from_str(EMBEDDED_SCHEMA)?)?);
        *shared = Some(Arc::clone(&validator));

        Ok(validator)
    }

    /// Use a different schema document for the shared validator. Must happen before anything
    /// calls [`Validator::shared`].
    pub fn install_shared(validator: Validator) -> Result<Arc<Validator>, ReportError> {
        let mut shared = SHARED_VALIDATOR.lock();
        if shared.is_some() {
            return Err(ReportError::SharedValidatorAlreadyLoaded);
        }
        let validator = Arc::new(validator);
        *shared = Some(Arc::clone(&validator));

        Ok(validator)
    }

    pub fn schema(&self) -> &Value {
        &self.document
    }

    pub fn definitions(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Returns one message per violation; empty when the data is valid.
    pub fn validate(&self, definition: &str, data: &Value) -> Vec<String> {
        let Some(validator) = self.definitions.get(definition) else {
            return vec![format!("unknown schema definition '{definition}'")];
        };

        validator
            .iter_errors(data)
            .map(|error| {
                let path = error.instance_path.to_string();
                format!("{}: {error}", if path.is_empty() { "/" } else { &path })
            })
            .collect()
    }

    pub fn ensure_valid(&self, definition: &str, data: &Value) -> Result<(), ReportError> {
        let violations = self.validate(definition, data);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ReportError::schema_violation(definition, violations))
        }
    }

    /// Checks the schema document itself against its meta-schema.
    pub fn schema_validation_errors(&self) -> Vec<String> {
        match jsonschema::meta::validate(&self.document) {
            Ok(()) => vec![],
            Err(error) => vec![error.to_string()],
        }
    }
}

impl Debug for Validator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .finish()
    }
}
