use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use log::debug;
use serde_json::Value;
use tfvars_defs::{expression_to_json, Schema, VarType};

/// Splits a `NAME=VALUE` assignment as given to `--var`.
pub fn parse_var_assignment(raw: &str) -> Result<(String, String), anyhow::Error> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid variable assignment \"{}\", expected NAME=VALUE", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Variable assignment \"{}\" has an empty name", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Converts a raw command-line value according to the declared type.
///
/// Strings (and `any`) are taken verbatim, numbers and bools are parsed, and
/// collection types are read as HCL literal expressions.
pub fn coerce_raw_value(raw: &str, var_type: Option<&VarType>) -> Result<Value, anyhow::Error> {
    match var_type {
        None | Some(VarType::String) | Some(VarType::Any) => Ok(Value::String(raw.to_string())),
        Some(VarType::Number) => {
            let trimmed = raw.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Value::from(i));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| anyhow!("\"{}\" is not a valid number", raw))
        }
        Some(VarType::Bool) => match raw.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(anyhow!("\"{}\" is not a valid bool, expected true or false", raw)),
        },
        Some(_) => parse_hcl_literal(raw),
    }
}

fn parse_hcl_literal(raw: &str) -> Result<Value, anyhow::Error> {
    let body = hcl::parse(&format!("value = {}", raw))
        .with_context(|| format!("\"{}\" is not a valid HCL value", raw))?;
    let attr = body
        .attributes()
        .next()
        .ok_or_else(|| anyhow!("\"{}\" is not a valid HCL value", raw))?;
    expression_to_json(attr.expr()).map_err(|e| anyhow!("\"{}\": {}", raw, e))
}

/// Builds overrides from `--var` assignments, typed by the schema.
/// Undeclared names are kept as strings so resolution can report them.
pub fn parse_var_flags(
    schema: &Schema,
    assignments: &[String],
) -> Result<BTreeMap<String, Value>, anyhow::Error> {
    let mut overrides = BTreeMap::new();
    for raw in assignments {
        let (name, value) = parse_var_assignment(raw)?;
        let var_type = schema.get(&name).map(|v| &v.var_type);
        let value = coerce_raw_value(&value, var_type)
            .with_context(|| format!("Invalid value for variable \"{}\"", name))?;
        debug!("Variable \"{}\" set on the command line", name);
        overrides.insert(name, value);
    }
    Ok(overrides)
}

/// Reads a variable definitions file: JSON when the name ends in `.json`,
/// HCL attributes otherwise.
pub fn load_var_file(path: &Path) -> Result<BTreeMap<String, Value>, anyhow::Error> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        return serde_json::from_str(&contents)
            .with_context(|| format!("{} must contain a JSON object", path.display()));
    }

    let body = hcl::parse(&contents)
        .with_context(|| format!("Failed to parse HCL in {}", path.display()))?;
    if let Some(block) = body.blocks().next() {
        return Err(anyhow!(
            "Unexpected \"{}\" block in {}, only attributes are allowed",
            block.identifier(),
            path.display()
        ));
    }

    let mut values = BTreeMap::new();
    for attr in body.attributes() {
        let value = expression_to_json(attr.expr())
            .map_err(|e| anyhow!("Variable \"{}\" in {}: {}", attr.key(), path.display(), e))?;
        values.insert(attr.key().to_string(), value);
    }
    Ok(values)
}

/// Merges override layers in order, later layers win.
pub fn merge_overrides<I>(layers: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = BTreeMap<String, Value>>,
{
    let mut merged = BTreeMap::new();
    for layer in layers {
        merged.extend(layer);
    }
    merged
}
