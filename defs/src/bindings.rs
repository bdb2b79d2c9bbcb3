use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::Schema;

pub const SENSITIVE_PLACEHOLDER: &str = "(sensitive value)";

/// Resolved variable values, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, Value>);

impl Bindings {
    pub fn new() -> Self {
        Bindings(BTreeMap::new())
    }

    pub fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        self.0.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }

    /// Copy with every value of a sensitive variable replaced by a placeholder.
    pub fn redacted(&self, schema: &Schema) -> Bindings {
        self.0
            .iter()
            .map(|(name, value)| {
                let sensitive = schema.get(name).is_some_and(|v| v.sensitive);
                if sensitive {
                    (name.clone(), Value::String(SENSITIVE_PLACEHOLDER.to_string()))
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }

    /// Renders the bindings as `.tfvars` attributes.
    pub fn to_tfvars(&self) -> Result<String, hcl::Error> {
        hcl::to_string(&self.0)
    }
}

impl FromIterator<(String, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Bindings(iter.into_iter().collect())
    }
}

impl From<Bindings> for Value {
    fn from(bindings: Bindings) -> Self {
        Value::Object(bindings.0.into_iter().collect())
    }
}
