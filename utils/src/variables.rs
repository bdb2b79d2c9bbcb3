use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde_json::Value;
use tfvars_defs::{value_kind, Bindings, Schema, VariableDeclaration, VariableError};

use crate::rules::verify_validation_rules;

/// Checks the structural invariants of a schema: unique names, and defaults
/// that match their declared type and nullability.
pub fn validate(schema: &Schema) -> Result<(), VariableError> {
    let mut seen = HashSet::new();
    for variable in schema.variables() {
        if !seen.insert(variable.name.as_str()) {
            return Err(VariableError::DuplicateName(variable.name.clone()));
        }
    }

    for variable in schema.variables() {
        if let Some(default) = &variable.default {
            verify_value(variable, default)?;
        }
    }

    Ok(())
}

/// Computes the bindings for `schema`: the override when given, otherwise
/// the default. Fails on undeclared overrides, values of the wrong type,
/// variables left without a value, and failing validation rules.
pub fn resolve(
    schema: &Schema,
    overrides: &BTreeMap<String, Value>,
) -> Result<Bindings, VariableError> {
    validate(schema)?;

    if let Some(unknown) = overrides.keys().find(|name| schema.get(name).is_none()) {
        return Err(VariableError::UnknownVariable(unknown.clone()));
    }

    let mut bindings = Bindings::new();
    let mut missing_variables = Vec::new();

    for variable in schema.variables() {
        let value = match overrides.get(&variable.name) {
            Some(value) => {
                verify_value(variable, value)?;
                value.clone()
            }
            None => match &variable.default {
                Some(default) => default.clone(),
                None => {
                    missing_variables.push(variable.name.clone());
                    continue;
                }
            },
        };
        debug!("Resolved variable \"{}\"", variable.name);
        bindings.insert(variable.name.clone(), value);
    }

    if !missing_variables.is_empty() {
        return Err(VariableError::MissingRequiredVariable(missing_variables));
    }

    verify_validation_rules(schema, &bindings)?;

    Ok(bindings)
}

pub(crate) fn verify_value(
    variable: &VariableDeclaration,
    value: &Value,
) -> Result<(), VariableError> {
    if value.is_null() {
        if variable.nullable {
            return Ok(());
        }
        return Err(VariableError::NullNotAllowed(variable.name.clone()));
    }
    if !variable.var_type.conforms(value) {
        return Err(VariableError::TypeMismatch {
            name: variable.name.clone(),
            expected: variable.var_type.to_string(),
            actual: value_kind(value).to_string(),
        });
    }
    Ok(())
}
