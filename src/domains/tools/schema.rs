//! Declarative argument schemas and the validator that enforces them.
//!
//! A [`Schema`] is both what a tool advertises as its `inputSchema` and what
//! incoming arguments are checked against before the handler runs. Validation
//! is a pure gate: the candidate value is never coerced or modified.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};
use std::fmt;

use super::error::{ToolError, ToolResult};

/// The JSON types a schema node can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    String,
    Number,
    Boolean,
    Array,
}

impl SchemaType {
    /// The name of this type as it appears in schemas and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recursive description of an accepted argument value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Declared type; when absent any runtime type is accepted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Human-readable description, opaque to the validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested property schemas (object schemas only).
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    /// Property names that must be present (object schemas only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Finite set of permitted literal values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

impl Schema {
    /// Create a schema node of the given type.
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn array() -> Self {
        Self::new(SchemaType::Array)
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a nested property.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark properties as required.
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Look up a declared property.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.get(name)
    }

    /// Restrict accepted values to a literal set.
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Render this schema as the JSON object advertised to clients.
    pub fn to_json_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Check `candidate` against this schema.
    ///
    /// See [`validate_arguments`].
    pub fn validate(&self, candidate: Option<&Value>) -> ToolResult<()> {
        validate_arguments(self, candidate)
    }
}

/// Property schemas, kept in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, Schema)>);

impl Properties {
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: String, schema: Schema) {
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = schema,
            None => self.0.push((name, schema)),
        }
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, schema)| (key, schema)))
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                Schema::deserialize(value)
                    .map(|schema| (key, schema))
                    .map_err(<D::Error as de::Error>::custom)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Validate a top-level argument object against an object schema.
///
/// Fails with [`ToolError::InvalidArguments`] when the candidate is missing or
/// not a JSON object, a required property is absent, a declared property has
/// the wrong runtime type, or a value falls outside a declared enum. Unknown
/// properties are ignored. Nested object schemas are checked recursively and
/// reported with dotted names (`filters.limit`).
pub fn validate_arguments(schema: &Schema, candidate: Option<&Value>) -> ToolResult<()> {
    match candidate {
        Some(Value::Object(object)) => validate_object(schema, object, None),
        _ => Err(ToolError::invalid_arguments("Arguments must be an object")),
    }
}

fn validate_object(schema: &Schema, object: &Map<String, Value>, prefix: Option<&str>) -> ToolResult<()> {
    for name in &schema.required {
        if !object.contains_key(name) {
            return Err(ToolError::invalid_arguments(format!(
                "Missing required property: {}",
                qualify(prefix, name)
            )));
        }
    }

    for (key, value) in object {
        let Some(property) = schema.properties.get(key) else {
            continue;
        };
        let path = qualify(prefix, key);

        if let Some(expected) = property.schema_type {
            let actual = json_type_name(value);
            if expected.as_str() != actual {
                return Err(ToolError::invalid_arguments(format!(
                    "Property {} must be of type {}, got {}",
                    path, expected, actual
                )));
            }
        }

        if let Some(allowed) = &property.enum_values {
            if !enum_contains(allowed, value) {
                return Err(ToolError::invalid_arguments(format!(
                    "Property {} must be one of: {}",
                    path,
                    format_enum(allowed)
                )));
            }
        }

        if let (Some(SchemaType::Object), Value::Object(nested)) = (property.schema_type, value) {
            validate_object(property, nested, Some(&path))?;
        }
    }

    Ok(())
}

/// Runtime type of a JSON value. Arrays are reported as `array`, never `object`.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Enum membership. Numbers compare by numeric value, so `1.0` matches `1`.
fn enum_contains(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => candidate == value,
    })
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, name),
        None => name.to_string(),
    }
}

fn format_enum(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_schema() -> Schema {
        Schema::object()
            .with_property("text", Schema::string())
            .with_property(
                "operation",
                Schema::string().with_enum(["uppercase", "lowercase", "reverse", "wordcount"]),
            )
            .with_property("tags", Schema::array())
            .with_property("options", Schema::object())
            .with_required(["text", "operation"])
    }

    fn message(result: ToolResult<()>) -> String {
        match result {
            Err(ToolError::InvalidArguments(msg)) => msg,
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_arguments_pass() {
        let args = json!({ "text": "hi", "operation": "reverse" });
        assert!(text_schema().validate(Some(&args)).is_ok());
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert_eq!(message(text_schema().validate(None)), "Arguments must be an object");
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        for candidate in [json!([1, 2]), json!("text"), json!(42), json!(true), json!(null)] {
            assert_eq!(
                message(text_schema().validate(Some(&candidate))),
                "Arguments must be an object"
            );
        }
    }

    #[test]
    fn test_missing_required_property_named() {
        let args = json!({ "text": "abc" });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Missing required property: operation"
        );
    }

    #[test]
    fn test_type_mismatch_names_property_and_types() {
        let args = json!({ "text": 5, "operation": "reverse" });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Property text must be of type string, got number"
        );
    }

    #[test]
    fn test_array_is_not_an_object() {
        let args = json!({ "text": "a", "operation": "reverse", "options": [] });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Property options must be of type object, got array"
        );
    }

    #[test]
    fn test_object_is_not_an_array() {
        let args = json!({ "text": "a", "operation": "reverse", "tags": {} });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Property tags must be of type array, got object"
        );
    }

    #[test]
    fn test_null_never_matches_declared_type() {
        let args = json!({ "text": null, "operation": "reverse" });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Property text must be of type string, got null"
        );
    }

    #[test]
    fn test_enum_rejects_value_of_correct_type() {
        let args = json!({ "text": "a", "operation": "shout" });
        assert_eq!(
            message(text_schema().validate(Some(&args))),
            "Property operation must be one of: uppercase, lowercase, reverse, wordcount"
        );
    }

    #[test]
    fn test_enum_without_type_still_restricts() {
        let schema = Schema::object().with_property("level", Schema::default().with_enum([1, 2]));
        assert!(schema.validate(Some(&json!({ "level": 2 }))).is_ok());
        assert_eq!(
            message(schema.validate(Some(&json!({ "level": "2" })))),
            "Property level must be one of: 1, 2"
        );
    }

    #[test]
    fn test_enum_compares_numbers_by_value() {
        let schema = Schema::object().with_property("n", Schema::number().with_enum([1, 2]));
        assert!(schema.validate(Some(&json!({ "n": 1.0 }))).is_ok());
        assert!(schema.validate(Some(&json!({ "n": 2 }))).is_ok());
        assert_eq!(
            message(schema.validate(Some(&json!({ "n": 1.5 })))),
            "Property n must be one of: 1, 2"
        );
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let schema = text_schema();
        assert_eq!(
            schema.properties.names().collect::<Vec<_>>(),
            vec!["text", "operation", "tags", "options"]
        );

        let advertised = schema.to_json_object();
        let keys: Vec<_> = advertised["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["text", "operation", "tags", "options"]);

        let round_trip: Schema = serde_json::from_value(Value::Object(advertised)).unwrap();
        assert_eq!(round_trip, schema);
    }

    #[test]
    fn test_unknown_properties_ignored() {
        let args = json!({ "text": "a", "operation": "reverse", "extra": [1, { "x": null }] });
        assert!(text_schema().validate(Some(&args)).is_ok());
    }

    #[test]
    fn test_nested_object_validated_recursively() {
        let schema = Schema::object()
            .with_property(
                "filters",
                Schema::object()
                    .with_property("limit", Schema::number())
                    .with_property("offset", Schema::number()),
            )
            .with_property("source", Schema::string())
            .with_required(["source"]);

        assert!(schema
            .validate(Some(&json!({ "source": "db", "filters": { "limit": 2 } })))
            .is_ok());
        assert_eq!(
            message(schema.validate(Some(&json!({ "source": "db", "filters": { "limit": "2" } })))),
            "Property filters.limit must be of type number, got string"
        );
    }

    #[test]
    fn test_nested_required_is_qualified() {
        let schema = Schema::object().with_property(
            "target",
            Schema::object()
                .with_property("path", Schema::string())
                .with_required(["path"]),
        );
        assert_eq!(
            message(schema.validate(Some(&json!({ "target": {} })))),
            "Missing required property: target.path"
        );
    }

    #[test]
    fn test_schema_serializes_as_input_schema() {
        let schema = Schema::object()
            .with_property(
                "operation",
                Schema::string()
                    .with_description("Operation to perform")
                    .with_enum(["read", "write"]),
            )
            .with_required(["operation"]);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "operation": {
                        "type": "string",
                        "description": "Operation to perform",
                        "enum": ["read", "write"]
                    }
                },
                "required": ["operation"]
            })
        );
        assert_eq!(schema.to_json_object()["type"], json!("object"));
    }

    #[test]
    fn test_schema_deserializes_from_json() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": { "n": { "type": "number" } },
            "required": ["n"]
        }))
        .unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert_eq!(schema.property("n").unwrap().schema_type, Some(SchemaType::Number));
        assert_eq!(schema.required, vec!["n".to_string()]);
    }
}
