//! Declared parameter schemas for tools.
//!
//! A [`ToolSpec`] lists every parameter a tool accepts. Incoming argument
//! maps are validated against it before any collaborator is touched:
//! unknown names, missing required values, wrong types and out-of-range
//! numbers are all rejected up front.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::tool::ToolArgs;
use crate::error::{RegistryError, ToolError};

/// Semantic type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// A list of strings. A single string is accepted as a one-element list.
    StringList,
}

impl ParamType {
    /// JSON Schema type name.
    pub fn schema_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::StringList => "array",
        }
    }

    /// Check and normalize a value. `Ok(None)` means "treat as absent".
    fn coerce(&self, name: &str, value: Value) -> Result<Option<Value>, ToolError> {
        match (self, value) {
            (ParamType::String, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::String(trimmed.to_string())))
                }
            }
            (ParamType::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Some(json!(i))),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(Some(json!(f as i64))),
                    _ => Err(ToolError::invalid(name, "expected integer")),
                },
            },
            (ParamType::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(|i| Some(json!(i)))
                .map_err(|_| ToolError::invalid(name, "expected integer")),
            (ParamType::Number, Value::Number(n)) => Ok(Some(Value::Number(n))),
            (ParamType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| Some(json!(f)))
                .ok_or_else(|| ToolError::invalid(name, "expected number")),
            (ParamType::Boolean, Value::Bool(b)) => Ok(Some(Value::Bool(b))),
            (ParamType::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" => Ok(Some(Value::Bool(true))),
                "false" => Ok(Some(Value::Bool(false))),
                _ => Err(ToolError::invalid(name, "expected boolean")),
            },
            (ParamType::StringList, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(json!([trimmed])))
                }
            }
            (ParamType::StringList, Value::Array(items)) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) if !s.trim().is_empty() => {
                            list.push(Value::String(s.trim().to_string()))
                        }
                        Value::String(_) => {}
                        _ => return Err(ToolError::invalid(name, "expected list of strings")),
                    }
                }
                Ok(Some(Value::Array(list)))
            }
            (ty, _) => Err(ToolError::invalid(
                name,
                format!("expected {}", ty.describe()),
            )),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::StringList => "list of strings",
        }
    }
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    /// Alternative names accepted and folded onto `name`.
    pub aliases: Vec<&'static str>,
    pub ty: ParamType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
    /// Inclusive numeric bounds.
    pub range: Option<(f64, f64)>,
}

impl ParamSpec {
    fn new(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            ty,
            required: false,
            default: None,
            description: "",
            range: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, ParamType::Integer)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, ParamType::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ParamType::Boolean)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, ParamType::StringList)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the caller omits the parameter.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Accept another name for this parameter.
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Restrict a numeric parameter to `min..=max`.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Whether `key` addresses this parameter.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.aliases.iter().any(|a| *a == key)
    }

    fn check_range(&self, value: &Value) -> Result<(), ToolError> {
        let (Some((min, max)), Some(n)) = (self.range, value.as_f64()) else {
            return Ok(());
        };
        if n < min || n > max {
            let reason = match self.ty {
                ParamType::Integer => format!("must be between {} and {}", min as i64, max as i64),
                _ => format!("must be between {} and {}", min, max),
            };
            return Err(ToolError::invalid(self.name, reason));
        }
        Ok(())
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!(self.ty.schema_type()));
        if self.ty == ParamType::StringList {
            schema.insert("items".to_string(), json!({"type": "string"}));
        }
        if !self.description.is_empty() {
            schema.insert("description".to_string(), json!(self.description));
        }
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        if let Some((min, max)) = self.range {
            let (min, max) = match self.ty {
                ParamType::Integer => (json!(min as i64), json!(max as i64)),
                _ => (json!(min), json!(max)),
            };
            schema.insert("minimum".to_string(), min);
            schema.insert("maximum".to_string(), max);
        }
        Value::Object(schema)
    }
}

/// A tool's name, description and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Create a spec without parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a parameter by canonical name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Look up a parameter by canonical name or alias.
    pub fn resolve(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.answers_to(key))
    }

    /// JSON Schema describing the arguments, for discovery.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check internal consistency. Run once at registration.
    pub fn check(&self) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidSpec {
            tool: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("tool name is empty".to_string()));
        }

        let mut seen: Vec<&str> = Vec::new();
        for param in &self.params {
            for key in std::iter::once(&param.name).chain(param.aliases.iter()) {
                if seen.contains(key) {
                    return Err(invalid(format!("parameter name '{}' declared twice", key)));
                }
                seen.push(key);
            }

            if param.required && param.default.is_some() {
                return Err(invalid(format!(
                    "required parameter '{}' has a default",
                    param.name
                )));
            }

            if let Some(default) = &param.default {
                let coerced = param
                    .ty
                    .coerce(param.name, default.clone())
                    .map_err(|e| invalid(format!("default for '{}': {}", param.name, e)))?;
                if let Some(value) = coerced {
                    param
                        .check_range(&value)
                        .map_err(|e| invalid(format!("default for '{}': {}", param.name, e)))?;
                }
            }
        }

        Ok(())
    }

    /// Validate raw arguments and produce normalized [`ToolArgs`].
    ///
    /// Aliases are folded onto canonical names, `null` counts as absent,
    /// and defaults fill in omitted optional parameters.
    pub fn validate(&self, raw: Map<String, Value>) -> Result<ToolArgs, ToolError> {
        let mut normalized = Map::new();
        // Names given so far, including ones whose value coerced to absent.
        let mut given = HashSet::new();

        for (key, value) in raw {
            if value.is_null() {
                continue;
            }

            let param = self
                .resolve(&key)
                .ok_or_else(|| ToolError::UnexpectedParameter(key.clone()))?;

            if !given.insert(param.name) {
                return Err(ToolError::invalid(
                    param.name,
                    format!("given more than once (as '{}')", key),
                ));
            }

            if let Some(value) = param.ty.coerce(param.name, value)? {
                param.check_range(&value)?;
                normalized.insert(param.name.to_string(), value);
            }
        }

        for param in &self.params {
            if normalized.contains_key(param.name) {
                continue;
            }
            if param.required {
                return Err(ToolError::MissingParameter(param.name.to_string()));
            }
            if let Some(default) = &param.default {
                normalized.insert(param.name.to_string(), default.clone());
            }
        }

        Ok(ToolArgs::new(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ToolSpec {
        ToolSpec::new("find_restaurants", "Find restaurants")
            .param(ParamSpec::string("location").alias("destination").required())
            .param(ParamSpec::string_list("cuisine").alias("cuisine_type"))
            .param(ParamSpec::integer("limit").default_value(json!(8)).range(1.0, 20.0))
            .param(ParamSpec::number("min_rating").range(1.0, 5.0))
            .param(ParamSpec::boolean("open_now"))
    }

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_missing_required() {
        let err = spec().validate(raw(json!({"cuisine": "thai"}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(ref p) if p == "location"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = spec().validate(raw(json!({"location": null}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(_)));
    }

    #[test]
    fn test_empty_required_string_is_missing() {
        let err = spec().validate(raw(json!({"location": "   "}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(_)));
    }

    #[test]
    fn test_blank_alias_still_counts_as_given() {
        let err = spec()
            .validate(raw(json!({"destination": "  ", "location": "Rome"})))
            .unwrap_err();
        assert!(err.to_string().contains("given more than once"));

        let err = spec()
            .validate(raw(json!({"location": "Rome", "destination": ""})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { ref name, .. } if name == "location"));
    }

    #[test]
    fn test_alias_folds_to_canonical() {
        let args = spec()
            .validate(raw(json!({"destination": "Rome", "cuisine_type": "pizza"})))
            .unwrap();
        assert_eq!(args.get_string("location").unwrap(), "Rome");
        assert_eq!(args.get_string_list("cuisine"), vec!["pizza".to_string()]);
    }

    #[test]
    fn test_alias_and_name_together_rejected() {
        let err = spec()
            .validate(raw(json!({"destination": "Rome", "location": "Milan"})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { .. }));
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = spec()
            .validate(raw(json!({"location": "Rome", "city": "Rome"})))
            .unwrap_err();
        assert!(matches!(err, ToolError::UnexpectedParameter(ref p) if p == "city"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = spec()
            .validate(raw(json!({"location": 42})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { ref name, .. } if name == "location"));

        let err = spec()
            .validate(raw(json!({"location": "Rome", "cuisine": [1, 2]})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { ref name, .. } if name == "cuisine"));
    }

    #[test]
    fn test_defaults_and_coercion() {
        let args = spec()
            .validate(raw(json!({"location": "Rome", "min_rating": "4.5", "open_now": "true"})))
            .unwrap();
        assert_eq!(args.get_i64_opt("limit").unwrap(), Some(8));
        assert_eq!(args.get_f64_opt("min_rating").unwrap(), Some(4.5));
        assert_eq!(args.get_bool_opt("open_now").unwrap(), Some(true));

        let args = spec()
            .validate(raw(json!({"location": "Rome", "limit": 3.0})))
            .unwrap();
        assert_eq!(args.get_i64_opt("limit").unwrap(), Some(3));
    }

    #[test]
    fn test_range_enforced() {
        let err = spec()
            .validate(raw(json!({"location": "Rome", "limit": 50})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'limit': must be between 1 and 20"
        );
    }

    #[test]
    fn test_input_schema() {
        let schema = spec().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["location"]));
        assert_eq!(schema["properties"]["cuisine"]["type"], "array");
        assert_eq!(schema["properties"]["limit"]["default"], 8);
        assert_eq!(schema["properties"]["limit"]["maximum"], 20);
    }

    #[test]
    fn test_check_rejects_required_with_default() {
        let spec = ToolSpec::new("bad", "Bad")
            .param(ParamSpec::string("location").required().default_value(json!("Paris")));
        assert!(matches!(spec.check(), Err(RegistryError::InvalidSpec { .. })));
    }

    #[test]
    fn test_check_rejects_alias_collision() {
        let spec = ToolSpec::new("bad", "Bad")
            .param(ParamSpec::string("location"))
            .param(ParamSpec::string("destination").alias("location"));
        assert!(spec.check().is_err());
    }

    #[test]
    fn test_check_rejects_bad_default() {
        let spec = ToolSpec::new("bad", "Bad")
            .param(ParamSpec::integer("days").default_value(json!(10)).range(1.0, 7.0));
        assert!(spec.check().is_err());
        assert!(self::spec().check().is_ok());
    }
}
