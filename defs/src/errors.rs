use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariableError {
    #[error("Failed to parse variable declarations: {0}")]
    Parse(String),

    #[error("Variable \"{0}\" is declared more than once")]
    DuplicateName(String),

    #[error("Variable \"{name}\" is of type {actual} but should be of type {expected}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Variable \"{0}\" is not declared. Please check the available variables")]
    UnknownVariable(String),

    #[error("Missing required variable{}: \"{}\"", plural(.0), .0.join("\", \""))]
    MissingRequiredVariable(Vec<String>),

    #[error("Variable \"{0}\" is not nullable and cannot be set to null")]
    NullNotAllowed(String),

    #[error("Invalid value for variable \"{name}\": {message}")]
    ValidationFailed { name: String, message: String },
}

impl VariableError {
    /// Name of the variable the error is about, if it concerns a single one.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            VariableError::Parse(_) => None,
            VariableError::DuplicateName(name)
            | VariableError::UnknownVariable(name)
            | VariableError::NullNotAllowed(name)
            | VariableError::TypeMismatch { name, .. }
            | VariableError::ValidationFailed { name, .. } => Some(name),
            VariableError::MissingRequiredVariable(names) => match names.as_slice() {
                [name] => Some(name),
                _ => None,
            },
        }
    }
}

fn plural(names: &[String]) -> &'static str {
    if names.len() > 1 {
        "s"
    } else {
        ""
    }
}
