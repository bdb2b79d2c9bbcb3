use hcl::eval::{Context, Evaluate, FuncArgs, FuncDef, ParamType};
use hcl::Value;
use log::debug;
use tfvars_defs::{json_to_hcl, Bindings, Schema, VariableError};

/// Evaluates the `validation` blocks of every declaration against the
/// resolved bindings. Null values are not validated.
pub fn verify_validation_rules(schema: &Schema, bindings: &Bindings) -> Result<(), VariableError> {
    if schema.variables().iter().all(|v| v.validations.is_empty()) {
        return Ok(());
    }

    let vars: hcl::Map<String, Value> = bindings
        .iter()
        .map(|(name, value)| (name.clone(), json_to_hcl(value)))
        .collect();

    let mut ctx = Context::new();
    ctx.declare_var("var", Value::Object(vars));
    ctx.declare_func("length", FuncDef::builder().param(ParamType::Any).build(length));
    ctx.declare_func(
        "contains",
        FuncDef::builder()
            .param(ParamType::Any)
            .param(ParamType::Any)
            .build(contains),
    );

    for variable in schema.variables() {
        if bindings.get(&variable.name).map_or(true, |v| v.is_null()) {
            continue;
        }
        for rule in &variable.validations {
            let outcome = rule.condition.evaluate(&ctx);
            debug!(
                "Validation of \"{}\" evaluated to {:?}",
                variable.name, outcome
            );
            match outcome {
                Ok(Value::Bool(true)) => {}
                Ok(Value::Bool(false)) => {
                    return Err(VariableError::ValidationFailed {
                        name: variable.name.clone(),
                        message: rule.error_message.clone(),
                    })
                }
                Ok(other) => {
                    return Err(VariableError::ValidationFailed {
                        name: variable.name.clone(),
                        message: format!("condition must evaluate to a bool, got {:?}", other),
                    })
                }
                Err(err) => {
                    return Err(VariableError::ValidationFailed {
                        name: variable.name.clone(),
                        message: format!("failed to evaluate condition: {}", err),
                    })
                }
            }
        }
    }

    Ok(())
}

fn length(args: FuncArgs) -> Result<Value, String> {
    match &args[0] {
        Value::String(s) => Ok(Value::from(s.chars().count())),
        Value::Array(items) => Ok(Value::from(items.len())),
        Value::Object(entries) => Ok(Value::from(entries.len())),
        other => Err(format!("length() does not accept {:?}", other)),
    }
}

fn contains(args: FuncArgs) -> Result<Value, String> {
    match &args[0] {
        Value::Array(items) => Ok(Value::Bool(items.contains(&args[1]))),
        other => Err(format!("contains() expects a list, got {:?}", other)),
    }
}
