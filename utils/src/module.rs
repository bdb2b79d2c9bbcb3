use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use log::{info, warn};
use tfvars_defs::{Schema, VariableError};
use walkdir::WalkDir;

/// Parses variable declarations from HCL source.
pub fn load(contents: &str) -> Result<Schema, VariableError> {
    let schema: Schema = contents.parse()?;
    for variable in schema.variables() {
        if variable.description.is_none() {
            warn!("Variable \"{}\" has no description", variable.name);
        }
    }
    Ok(schema)
}

pub fn load_file(path: &Path) -> Result<Schema, anyhow::Error> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let schema = load(&contents).with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        "Loaded {} variable(s) from {}",
        schema.len(),
        path.display()
    );
    Ok(schema)
}

/// Loads every `*.tf` file directly inside `dir`, in file name order.
pub fn load_dir(dir: &Path) -> Result<Schema, anyhow::Error> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "tf") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();

    let mut schema = Schema::default();
    for file in &files {
        schema.extend(load_file(file)?);
    }
    Ok(schema)
}

/// Loads a single file, or every `*.tf` file when `path` is a directory.
pub fn load_path(path: &Path) -> Result<Schema, anyhow::Error> {
    if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}
