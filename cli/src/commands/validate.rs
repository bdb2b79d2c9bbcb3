use std::path::Path;

use colored::Colorize;
use log::info;
use tfvars_utils::{load_path, validate, verify_variable_name_casing};

use super::exit_with_error;

pub fn handle_validate(path: &Path, strict: bool) {
    let schema = match load_path(path) {
        Ok(schema) => schema,
        Err(e) => exit_with_error("Failed to load variables", e),
    };

    if let Err(e) = validate(&schema) {
        exit_with_error("Variable declarations are invalid", e.into());
    }

    if strict {
        if let Err(e) = verify_variable_name_casing(&schema) {
            exit_with_error("Strict checks failed", e);
        }
    }

    info!("Validated {} variable(s) in {}", schema.len(), path.display());
    println!(
        "{} {} variable(s) declared in {}",
        "Valid:".green().bold(),
        schema.len(),
        path.display()
    );
}
