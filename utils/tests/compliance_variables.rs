use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tfvars_defs::{Schema, VarType, VariableDeclaration, VariableError};
use tfvars_utils::{
    load, load_dir, load_file, load_var_file, merge_overrides, parse_var_flags, resolve, validate,
};

fn fixture(name: &str) -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn compliance_schema() -> Schema {
    load_file(&fixture("variables.tf")).expect("fixture should load")
}

fn overrides(value: Value) -> BTreeMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn fixture_loads_in_declaration_order() {
    let schema = compliance_schema();
    assert_eq!(
        schema.names().collect::<Vec<_>>(),
        vec![
            "environment",
            "aws_region",
            "app_name",
            "docker_registry",
            "desired_count"
        ]
    );

    let registry = schema.get("docker_registry").unwrap();
    assert_eq!(registry.var_type, VarType::String);
    assert!(registry.is_required());
    assert_eq!(registry.description.as_deref(), Some("Docker registry URL"));

    let count = schema.get("desired_count").unwrap();
    assert_eq!(count.var_type, VarType::Number);
    assert_eq!(count.default, Some(json!(2)));
}

#[test]
fn fixture_validates() {
    assert_eq!(validate(&compliance_schema()), Ok(()));
}

#[test]
fn duplicate_names_fail_validation() {
    let mut schema = compliance_schema();
    schema.extend(Schema::new(vec![VariableDeclaration::new(
        "aws_region",
        VarType::String,
    )]));
    assert_eq!(
        validate(&schema),
        Err(VariableError::DuplicateName("aws_region".to_string()))
    );
}

#[test]
fn non_numeric_default_for_number_fails_validation() {
    let schema = load(
        r#"
        variable "desired_count" {
          type    = number
          default = "two"
        }
        "#,
    )
    .unwrap();
    assert!(matches!(
        validate(&schema),
        Err(VariableError::TypeMismatch { name, .. }) if name == "desired_count"
    ));
}

#[test]
fn unknown_field_is_a_parse_error() {
    let result = load(
        r#"
        variable "aws_region" {
          type     = string
          region   = "us-west-2"
        }
        "#,
    );
    assert!(matches!(result, Err(VariableError::Parse(_))));
}

#[test]
fn malformed_source_is_a_parse_error() {
    assert!(matches!(
        load("variable \"aws_region\" {"),
        Err(VariableError::Parse(_))
    ));
}

#[test]
fn missing_registry_is_reported_by_name() {
    let err = resolve(&compliance_schema(), &BTreeMap::new()).unwrap_err();
    assert_eq!(
        err,
        VariableError::MissingRequiredVariable(vec!["docker_registry".to_string()])
    );
    assert_eq!(err.variable_name(), Some("docker_registry"));
}

#[test]
fn registry_override_resolves_everything_else_to_defaults() {
    let bindings = resolve(
        &compliance_schema(),
        &overrides(json!({ "docker_registry": "myregistry" })),
    )
    .unwrap();

    let expected: Value = json!({
        "environment": "dev",
        "aws_region": "us-west-2",
        "app_name": "compliance-api",
        "docker_registry": "myregistry",
        "desired_count": 2
    });
    assert_eq!(Value::from(bindings), expected);
}

#[test]
fn unknown_override_is_rejected() {
    let err = resolve(
        &compliance_schema(),
        &overrides(json!({ "nonexistent_var": "x" })),
    )
    .unwrap_err();
    assert_eq!(
        err,
        VariableError::UnknownVariable("nonexistent_var".to_string())
    );
}

#[test]
fn override_of_wrong_type_is_rejected() {
    let err = resolve(
        &compliance_schema(),
        &overrides(json!({ "docker_registry": "myregistry", "desired_count": "3" })),
    )
    .unwrap_err();
    assert_eq!(
        err,
        VariableError::TypeMismatch {
            name: "desired_count".to_string(),
            expected: "number".to_string(),
            actual: "string".to_string(),
        }
    );
}

#[test]
fn resolve_is_idempotent() {
    let schema = compliance_schema();
    let overrides = overrides(json!({ "docker_registry": "myregistry", "desired_count": 3 }));
    let first = resolve(&schema, &overrides).unwrap();
    let second = resolve(&schema, &overrides).unwrap();
    assert_eq!(first, second);
}

#[test]
fn var_file_and_flags_layer_in_order() {
    let schema = compliance_schema();
    let from_file = load_var_file(&fixture("prod.tfvars")).unwrap();
    let from_flags = parse_var_flags(&schema, &["desired_count=6".to_string()]).unwrap();

    let bindings = resolve(&schema, &merge_overrides(vec![from_file, from_flags])).unwrap();
    assert_eq!(bindings.get("environment"), Some(&json!("prod")));
    assert_eq!(bindings.get("desired_count"), Some(&json!(6)));
    assert_eq!(bindings.get("aws_region"), Some(&json!("us-west-2")));
    assert_eq!(
        bindings.get("docker_registry"),
        Some(&json!("123456789012.dkr.ecr.us-west-2.amazonaws.com"))
    );
}

#[test]
fn duplicates_across_files_are_caught() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture("variables.tf"), dir.path().join("variables.tf")).unwrap();
    fs::write(
        dir.path().join("extra.tf"),
        r#"
        variable "environment" {
          type = string
        }
        "#,
    )
    .unwrap();

    let schema = load_dir(dir.path()).unwrap();
    assert_eq!(schema.len(), 6);
    assert_eq!(
        validate(&schema),
        Err(VariableError::DuplicateName("environment".to_string()))
    );
}
