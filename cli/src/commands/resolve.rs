use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use log::info;
use serde_json::Value;
use tfvars_utils::{load_path, load_var_file, merge_overrides, parse_var_flags, resolve};

use super::exit_with_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Tfvars,
}

pub fn handle_resolve(
    path: &Path,
    vars: &[String],
    var_files: &[PathBuf],
    format: OutputFormat,
    show_sensitive: bool,
) {
    match run_resolve(path, vars, var_files, format, show_sensitive) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => exit_with_error("Failed to resolve variables", e),
    }
}

fn run_resolve(
    path: &Path,
    vars: &[String],
    var_files: &[PathBuf],
    format: OutputFormat,
    show_sensitive: bool,
) -> Result<String, anyhow::Error> {
    let schema = load_path(path)?;

    let mut layers = Vec::new();
    for var_file in var_files {
        layers.push(load_var_file(var_file)?);
    }
    layers.push(parse_var_flags(&schema, vars)?);
    let overrides = merge_overrides(layers);

    let bindings = resolve(&schema, &overrides)?;
    info!("Resolved {} variable(s)", bindings.len());

    let bindings = if show_sensitive {
        bindings
    } else {
        bindings.redacted(&schema)
    };

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&Value::from(bindings))
            .context("Failed to render bindings as JSON"),
        OutputFormat::Tfvars => bindings
            .to_tfvars()
            .context("Failed to render bindings as tfvars"),
    }
}
