use std::str::FromStr;

use hcl::Body;
use log::debug;

use crate::{VariableDeclaration, VariableError};

/// Ordered set of variable declarations as they appear in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    variables: Vec<VariableDeclaration>,
}

impl Schema {
    pub fn new(variables: Vec<VariableDeclaration>) -> Self {
        Schema { variables }
    }

    /// Collects every `variable` block of `body`. Other blocks are skipped so
    /// complete `.tf` files can be loaded.
    pub fn from_body(body: &Body) -> Result<Self, VariableError> {
        let mut variables = Vec::new();
        for block in body.blocks() {
            if block.identifier() != "variable" {
                debug!("Skipping \"{}\" block", block.identifier());
                continue;
            }
            let variable = VariableDeclaration::from_block(block)?;
            debug!("Parsing variable block {:?} as {:?}", block, variable);
            variables.push(variable);
        }
        Ok(Schema { variables })
    }

    pub fn variables(&self) -> &[VariableDeclaration] {
        &self.variables
    }

    /// First declaration with the given name.
    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn extend(&mut self, other: Schema) {
        self.variables.extend(other.variables);
    }
}

impl FromStr for Schema {
    type Err = VariableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = hcl::parse(s).map_err(|err| VariableError::Parse(err.to_string()))?;
        Schema::from_body(&body)
    }
}
