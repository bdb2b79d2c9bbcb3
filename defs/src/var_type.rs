use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::VariableError;

/// Type constraint of a variable, parsed from its `type` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarType {
    String,
    Number,
    Bool,
    Any,
    List(Box<VarType>),
    Set(Box<VarType>),
    Map(Box<VarType>),
    Object(BTreeMap<String, ObjectAttribute>),
    Tuple(Vec<VarType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAttribute {
    pub attr_type: VarType,
    pub optional: bool,
}

impl VarType {
    /// Checks `value` against this type by matching type tags recursively.
    /// `null` is accepted everywhere, nullability is checked by the caller.
    pub fn conforms(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (VarType::Any, _) => true,
            (VarType::String, Value::String(_)) => true,
            (VarType::Number, Value::Number(_)) => true,
            (VarType::Bool, Value::Bool(_)) => true,
            (VarType::List(element) | VarType::Set(element), Value::Array(items)) => {
                items.iter().all(|item| element.conforms(item))
            }
            (VarType::Map(element), Value::Object(entries)) => {
                entries.values().all(|entry| element.conforms(entry))
            }
            (VarType::Object(attributes), Value::Object(entries)) => {
                attributes
                    .iter()
                    .all(|(key, attribute)| match entries.get(key) {
                        Some(entry) => attribute.attr_type.conforms(entry),
                        None => attribute.optional,
                    })
            }
            (VarType::Tuple(elements), Value::Array(items)) => {
                elements.len() == items.len()
                    && elements
                        .iter()
                        .zip(items)
                        .all(|(element, item)| element.conforms(item))
            }
            _ => false,
        }
    }
}

/// Short kind name of a JSON value, used in type mismatch messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::String => write!(f, "string"),
            VarType::Number => write!(f, "number"),
            VarType::Bool => write!(f, "bool"),
            VarType::Any => write!(f, "any"),
            VarType::List(element) => write!(f, "list({})", element),
            VarType::Set(element) => write!(f, "set({})", element),
            VarType::Map(element) => write!(f, "map({})", element),
            VarType::Object(attributes) => {
                let rendered: Vec<String> = attributes
                    .iter()
                    .map(|(key, attribute)| {
                        if attribute.optional {
                            format!("{} = optional({})", key, attribute.attr_type)
                        } else {
                            format!("{} = {}", key, attribute.attr_type)
                        }
                    })
                    .collect();
                write!(f, "object({{{}}})", rendered.join(", "))
            }
            VarType::Tuple(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "tuple([{}])", rendered.join(", "))
            }
        }
    }
}

impl FromStr for VarType {
    type Err = VariableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut source = s.trim();
        // Legacy forms: "string" and ${string}
        if source.len() >= 2 && source.starts_with('"') && source.ends_with('"') {
            source = &source[1..source.len() - 1];
        }
        if source.starts_with("${") && source.ends_with('}') {
            source = &source[2..source.len() - 1];
        }

        let mut parser = TypeParser::new(source);
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }
}

struct TypeParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(source: &'a str) -> Self {
        TypeParser { source, pos: 0 }
    }

    fn error(&self, message: &str) -> VariableError {
        VariableError::Parse(format!(
            "Invalid type expression \"{}\": {} at offset {}",
            self.source, message, self.pos
        ))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), VariableError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected)))
        }
    }

    fn identifier(&mut self) -> Result<&'a str, VariableError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a type keyword"));
        }
        let source = self.source;
        Ok(&source[start..self.pos])
    }

    fn object_key(&mut self) -> Result<String, VariableError> {
        self.skip_whitespace();
        if self.eat('"') {
            let start = self.pos;
            while let Some(c) = self.peek() {
                if c == '"' {
                    let key = self.source[start..self.pos].to_string();
                    self.pos += 1;
                    return Ok(key);
                }
                self.pos += c.len_utf8();
            }
            return Err(self.error("unterminated attribute name"));
        }
        Ok(self.identifier()?.to_string())
    }

    fn parse_type(&mut self) -> Result<VarType, VariableError> {
        let keyword = self.identifier()?;
        match keyword {
            "string" => Ok(VarType::String),
            "number" => Ok(VarType::Number),
            "bool" => Ok(VarType::Bool),
            "any" => Ok(VarType::Any),
            "list" | "set" | "map" => {
                let element = if self.eat('(') {
                    let element = self.parse_type()?;
                    self.expect(')')?;
                    element
                } else {
                    VarType::Any
                };
                let element = Box::new(element);
                Ok(match keyword {
                    "list" => VarType::List(element),
                    "set" => VarType::Set(element),
                    _ => VarType::Map(element),
                })
            }
            "object" => {
                self.expect('(')?;
                self.expect('{')?;
                let mut attributes = BTreeMap::new();
                while !self.eat('}') {
                    let key = self.object_key()?;
                    if !self.eat('=') {
                        self.expect(':')?;
                    }
                    let attribute = self.parse_attribute()?;
                    if attributes.insert(key.clone(), attribute).is_some() {
                        return Err(self.error(&format!("duplicate attribute \"{}\"", key)));
                    }
                    self.eat(',');
                }
                self.expect(')')?;
                Ok(VarType::Object(attributes))
            }
            "tuple" => {
                self.expect('(')?;
                self.expect('[')?;
                let mut elements = Vec::new();
                while !self.eat(']') {
                    elements.push(self.parse_type()?);
                    self.eat(',');
                }
                self.expect(')')?;
                Ok(VarType::Tuple(elements))
            }
            other => Err(self.error(&format!("unknown type \"{}\"", other))),
        }
    }

    fn parse_attribute(&mut self) -> Result<ObjectAttribute, VariableError> {
        self.skip_whitespace();
        let rest = &self.source[self.pos..];
        if rest.starts_with("optional") && rest["optional".len()..].trim_start().starts_with('(')
        {
            self.pos += "optional".len();
            self.expect('(')?;
            let attr_type = self.parse_type()?;
            if self.eat(',') {
                return Err(self.error("default values in optional() are not supported"));
            }
            self.expect(')')?;
            return Ok(ObjectAttribute {
                attr_type,
                optional: true,
            });
        }
        Ok(ObjectAttribute {
            attr_type: self.parse_type()?,
            optional: false,
        })
    }
}
