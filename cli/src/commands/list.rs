use std::path::Path;

use colored::Colorize;
use prettytable::{row, Table};
use tfvars_defs::VariableDeclaration;
use tfvars_utils::load_path;

use super::exit_with_error;

pub fn handle_list(path: &Path) {
    let schema = match load_path(path) {
        Ok(schema) => schema,
        Err(e) => exit_with_error("Failed to load variables", e),
    };

    let mut table = Table::new();
    table.add_row(row![
        "Name".blue().bold(),
        "Type".blue().bold(),
        "Default".blue().bold(),
        "Required".blue().bold(),
        "Description".blue().bold()
    ]);

    for variable in schema.variables() {
        table.add_row(row![
            variable.name,
            variable.var_type,
            display_default(variable),
            if variable.is_required() { "yes" } else { "no" },
            variable.description.as_deref().unwrap_or("")
        ]);
    }

    table.printstd();
}

fn display_default(variable: &VariableDeclaration) -> String {
    match &variable.default {
        None => "-".to_string(),
        Some(_) if variable.sensitive => "(sensitive)".to_string(),
        Some(value) => value.to_string(),
    }
}
