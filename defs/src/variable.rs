use std::collections::HashSet;

use hcl::{Block, Expression};
use serde_json::Value;

use crate::literal::expression_to_json;
use crate::{VarType, VariableError};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub var_type: VarType,
    /// `None` makes the variable required, `Some(Value::Null)` is an explicit null default.
    pub default: Option<Value>,
    pub nullable: bool,
    pub sensitive: bool,
    pub validations: Vec<VariableValidation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableValidation {
    pub condition: Expression,
    pub error_message: String,
}

impl VariableDeclaration {
    pub fn new(name: &str, var_type: VarType) -> Self {
        VariableDeclaration {
            name: name.to_string(),
            description: None,
            var_type,
            default: None,
            nullable: true,
            sensitive: false,
            validations: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn from_block(block: &Block) -> Result<Self, VariableError> {
        if block.identifier() != "variable" {
            return Err(VariableError::Parse(format!(
                "Block \"{}\" is not a variable block",
                block.identifier()
            )));
        }
        let name = match block.labels() {
            [label] => label.as_str().to_string(),
            labels => {
                return Err(VariableError::Parse(format!(
                    "Variable block should have a single label, found {}",
                    labels.len()
                )))
            }
        };
        if !is_valid_identifier(&name) {
            return Err(VariableError::Parse(format!(
                "Invalid variable name \"{}\": names must start with a letter or underscore and contain only letters, digits, underscores and dashes",
                name
            )));
        }

        let mut variable = VariableDeclaration::new(&name, VarType::Any);
        let mut seen = HashSet::new();

        for attr in block.body().attributes() {
            let key = attr.key();
            if !seen.insert(key) {
                return Err(VariableError::Parse(format!(
                    "Attribute \"{}\" is set more than once in variable \"{}\"",
                    key, name
                )));
            }
            match key {
                "description" => {
                    variable.description = Some(string_literal(attr.expr()).ok_or_else(|| {
                        VariableError::Parse(format!(
                            "Description of variable \"{}\" must be a string literal",
                            name
                        ))
                    })?);
                }
                "type" => {
                    variable.var_type = attr.expr().to_string().parse().map_err(|e| {
                        VariableError::Parse(format!("Variable \"{}\": {}", name, e))
                    })?;
                }
                "default" => {
                    variable.default = Some(expression_to_json(attr.expr()).map_err(|e| {
                        VariableError::Parse(format!(
                            "Invalid default for variable \"{}\": {}",
                            name, e
                        ))
                    })?);
                }
                "nullable" => variable.nullable = bool_literal(attr.expr(), &name, key)?,
                "sensitive" => variable.sensitive = bool_literal(attr.expr(), &name, key)?,
                other => {
                    return Err(VariableError::Parse(format!(
                        "Unsupported argument \"{}\" in variable \"{}\"",
                        other, name
                    )))
                }
            }
        }

        for inner in block.body().blocks() {
            if inner.identifier() != "validation" {
                return Err(VariableError::Parse(format!(
                    "Unsupported block type \"{}\" in variable \"{}\"",
                    inner.identifier(),
                    name
                )));
            }
            variable
                .validations
                .push(VariableValidation::from_block(inner, &name)?);
        }

        Ok(variable)
    }
}

impl VariableValidation {
    pub fn from_block(block: &Block, variable: &str) -> Result<Self, VariableError> {
        if !block.labels().is_empty() {
            return Err(VariableError::Parse(format!(
                "Validation block in variable \"{}\" must not have labels",
                variable
            )));
        }
        let mut condition = None;
        let mut error_message = None;
        for attr in block.body().attributes() {
            match attr.key() {
                "condition" if condition.is_none() => condition = Some(attr.expr().clone()),
                "error_message" if error_message.is_none() => {
                    error_message = Some(string_literal(attr.expr()).ok_or_else(|| {
                        VariableError::Parse(format!(
                            "Validation error_message in variable \"{}\" must be a string literal",
                            variable
                        ))
                    })?)
                }
                "condition" | "error_message" => {
                    return Err(VariableError::Parse(format!(
                        "Attribute \"{}\" is set more than once in a validation of variable \"{}\"",
                        attr.key(),
                        variable
                    )))
                }
                other => {
                    return Err(VariableError::Parse(format!(
                        "Unsupported argument \"{}\" in validation of variable \"{}\"",
                        other, variable
                    )))
                }
            }
        }
        if block.body().blocks().next().is_some() {
            return Err(VariableError::Parse(format!(
                "Validation of variable \"{}\" must not contain nested blocks",
                variable
            )));
        }
        match (condition, error_message) {
            (Some(condition), Some(error_message)) => Ok(VariableValidation {
                condition,
                error_message,
            }),
            (None, _) => Err(VariableError::Parse(format!(
                "Validation of variable \"{}\" is missing \"condition\"",
                variable
            ))),
            (_, None) => Err(VariableError::Parse(format!(
                "Validation of variable \"{}\" is missing \"error_message\"",
                variable
            ))),
        }
    }
}

fn string_literal(expr: &Expression) -> Option<String> {
    match expression_to_json(expr) {
        Ok(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn bool_literal(expr: &Expression, variable: &str, key: &str) -> Result<bool, VariableError> {
    match expr {
        Expression::Bool(b) => Ok(*b),
        _ => Err(VariableError::Parse(format!(
            "Attribute \"{}\" of variable \"{}\" must be true or false",
            key, variable
        ))),
    }
}

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
