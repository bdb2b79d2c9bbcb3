mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use commands::{handle_list, handle_resolve, handle_validate, OutputFormat};
use tfvars_utils::setup_logging;

#[derive(Parser)]
#[command(
    name = "tfvars",
    version = env!("TFVARS_VERSION"),
    about = "Load, validate and resolve Terraform variable declarations"
)]
struct Cli {
    /// Increase log output (-v for info, -vv for debug). LOG_LEVEL takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check declarations for duplicate names and mistyped defaults
    Validate {
        /// File or directory with variable declarations
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Also require snake_case variable names
        #[arg(long)]
        strict: bool,
    },
    /// List declared variables in declaration order
    List {
        /// File or directory with variable declarations
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Resolve every variable from overrides and defaults
    Resolve {
        /// File or directory with variable declarations
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Set a variable, e.g. --var docker_registry=myregistry
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Read variable values from a .tfvars or .tfvars.json file
        #[arg(long = "var-file", value_name = "FILE")]
        var_files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print sensitive values instead of redacting them
        #[arg(long)]
        show_sensitive: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Validate { path, strict } => handle_validate(&path, strict),
        Commands::List { path } => handle_list(&path),
        Commands::Resolve {
            path,
            vars,
            var_files,
            format,
            show_sensitive,
        } => handle_resolve(&path, &vars, &var_files, format, show_sensitive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_arguments() {
        let cli = Cli::parse_from([
            "tfvars",
            "-vv",
            "resolve",
            "infra",
            "--var",
            "docker_registry=myregistry",
            "--var",
            "desired_count=3",
            "--var-file",
            "prod.tfvars",
            "--format",
            "tfvars",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Resolve {
                path,
                vars,
                var_files,
                format,
                show_sensitive,
            } => {
                assert_eq!(path, PathBuf::from("infra"));
                assert_eq!(vars, vec!["docker_registry=myregistry", "desired_count=3"]);
                assert_eq!(var_files, vec![PathBuf::from("prod.tfvars")]);
                assert_eq!(format, OutputFormat::Tfvars);
                assert!(!show_sensitive);
            }
            _ => panic!("expected resolve"),
        }
    }
}
