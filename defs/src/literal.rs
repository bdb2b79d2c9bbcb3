use hcl::{Expression, ObjectKey};
use serde_json::{Map, Value};

/// Converts a literal HCL expression into JSON.
///
/// Only constant values are accepted: null, bools, numbers, strings without
/// interpolation, and arrays/objects built from those. References, function
/// calls and operators are rejected.
pub fn expression_to_json(expr: &Expression) -> Result<Value, String> {
    match expr {
        Expression::Null => Ok(Value::Null),
        Expression::Bool(b) => Ok(Value::Bool(*b)),
        Expression::Number(n) => serde_json::to_value(n).map_err(|e| e.to_string()),
        Expression::String(s) => Ok(Value::String(s.clone())),
        Expression::Array(items) => items
            .iter()
            .map(expression_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expression::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(object_key_to_string(key)?, expression_to_json(value)?);
            }
            Ok(Value::Object(map))
        }
        Expression::TemplateExpr(template) => {
            let raw = template.to_string();
            if raw.contains("${") || raw.contains("%{") {
                Err(format!("interpolation is not allowed here: {}", raw))
            } else {
                Ok(Value::String(raw))
            }
        }
        Expression::Parenthesis(inner) => expression_to_json(inner),
        other => Err(format!("expected a literal value, found `{}`", other)),
    }
}

#[allow(unreachable_patterns)]
fn object_key_to_string(key: &ObjectKey) -> Result<String, String> {
    match key {
        ObjectKey::Identifier(ident) => Ok(ident.as_str().to_string()),
        ObjectKey::Expression(expr) => match expression_to_json(expr)? {
            Value::String(s) => Ok(s),
            other => Err(format!("object keys must be strings, found {}", other)),
        },
        other => Err(format!("unsupported object key {:?}", other)),
    }
}

/// Converts JSON into an HCL value, for expression evaluation and rendering.
pub fn json_to_hcl(value: &Value) -> hcl::Value {
    match value {
        Value::Null => hcl::Value::Null,
        Value::Bool(b) => hcl::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                hcl::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                hcl::Value::from(u)
            } else {
                n.as_f64()
                    .and_then(hcl::Number::from_f64)
                    .map_or(hcl::Value::Null, hcl::Value::Number)
            }
        }
        Value::String(s) => hcl::Value::String(s.clone()),
        Value::Array(items) => hcl::Value::Array(items.iter().map(json_to_hcl).collect()),
        Value::Object(entries) => hcl::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), json_to_hcl(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn expr(source: &str) -> Expression {
        let body = hcl::parse(&format!("value = {}", source)).unwrap();
        let attribute = body.attributes().next().unwrap();
        attribute.expr().clone()
    }

    #[test]
    fn test_literal_primitives() {
        assert_eq!(expression_to_json(&expr("\"us-west-2\"")).unwrap(), json!("us-west-2"));
        assert_eq!(expression_to_json(&expr("2")).unwrap(), json!(2));
        assert_eq!(expression_to_json(&expr("true")).unwrap(), json!(true));
        assert_eq!(expression_to_json(&expr("null")).unwrap(), Value::Null);
    }

    #[test]
    fn test_literal_collections() {
        assert_eq!(
            expression_to_json(&expr("[\"a\", 1, false]")).unwrap(),
            json!(["a", 1, false])
        );
        assert_eq!(
            expression_to_json(&expr("{ Name = \"api\", \"team-id\" = 7 }")).unwrap(),
            json!({"Name": "api", "team-id": 7})
        );
    }

    #[test]
    fn test_non_literals_are_rejected() {
        assert!(expression_to_json(&expr("var.region")).is_err());
        assert!(expression_to_json(&expr("upper(\"a\")")).is_err());
        assert!(expression_to_json(&expr("\"${var.region}-a\"")).is_err());
        assert!(expression_to_json(&expr("1 + 1")).is_err());
    }

    #[test]
    fn test_json_to_hcl() {
        let value = json_to_hcl(&json!({"count": 2, "names": ["a"], "on": true}));
        let object = value.as_object().unwrap();
        assert_eq!(object.get("count"), Some(&hcl::Value::from(2i64)));
        assert_eq!(
            object.get("names"),
            Some(&hcl::Value::Array(vec![hcl::Value::from("a")]))
        );
        assert_eq!(object.get("on"), Some(&hcl::Value::Bool(true)));
    }
}
