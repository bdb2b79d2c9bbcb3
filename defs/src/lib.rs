mod bindings;
mod errors;
mod literal;
mod schema;
mod var_type;
mod variable;

pub use bindings::{Bindings, SENSITIVE_PLACEHOLDER};
pub use errors::VariableError;
pub use literal::{expression_to_json, json_to_hcl};
pub use schema::Schema;
pub use var_type::{value_kind, ObjectAttribute, VarType};
pub use variable::{is_valid_identifier, VariableDeclaration, VariableValidation};
