use heck::ToSnakeCase;
use tfvars_defs::Schema;

pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Verifies that every variable name is already snake_case
pub fn verify_variable_name_casing(schema: &Schema) -> Result<(), anyhow::Error> {
    let mut errors = Vec::new();

    for name in schema.names() {
        let snake_case = to_snake_case(name);
        if name != snake_case {
            errors.push(format!(
                "Variable '{}' is not snake_case, expected '{}'",
                name, snake_case
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Variable name casing verification failed:\n{}",
            errors.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_snake_case_camel() {
        assert_eq!(to_snake_case("dockerRegistry"), "docker_registry");
    }

    #[test]
    fn test_convert_snake_case_dashes() {
        assert_eq!(to_snake_case("app-name"), "app_name");
    }

    #[test]
    fn test_snake_case_names_pass() {
        let schema: Schema = r#"
            variable "aws_region" {}
            variable "desired_count" {}
        "#
        .parse()
        .unwrap();
        assert!(verify_variable_name_casing(&schema).is_ok());
    }

    #[test]
    fn test_mixed_case_names_fail() {
        let schema: Schema = r#"
            variable "appName" {}
            variable "app-id" {}
            variable "region" {}
        "#
        .parse()
        .unwrap();
        let err = verify_variable_name_casing(&schema).unwrap_err().to_string();
        assert!(err.contains("'appName'"));
        assert!(err.contains("'app-id'"));
        assert!(!err.contains("'region'"));
    }
}
