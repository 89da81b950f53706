use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tags a property descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl SchemaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Whether `value` conforms to this tag.
    ///
    /// Integers satisfy `number`. Only integer-typed JSON numbers satisfy
    /// `integer`, so `1.0` is rejected there.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Null => value.is_null(),
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag names no supported [`SchemaType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported schema type: {0}")]
pub struct UnknownSchemaType(pub String);

impl FromStr for SchemaType {
    type Err = UnknownSchemaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            "null" => Ok(Self::Null),
            other => Err(UnknownSchemaType(other.to_string())),
        }
    }
}

/// Dynamic type of a supplied JSON value, as reported in type mismatches.
///
/// Every JSON number reports as `number`; the integer/float split only
/// matters when deciding the `integer` tag in [`SchemaType::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// Descriptor for a single property.
///
/// Kept free-form: only the `type` key matters to validation, anything else
/// (such as `description`) is carried through to `tools/list` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySchema(Map<String, Value>);

impl PropertySchema {
    #[must_use]
    pub fn new(kind: SchemaType) -> Self {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        Self(map)
    }

    /// Wrap an arbitrary descriptor as-is.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.0
            .insert("description".to_string(), Value::String(description.into()));
        self
    }

    /// The declared `type` tag, if present and a string.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }
}

/// Root type tag of an [`InputSchema`]; only `"object"` is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum RootType {
    #[default]
    #[serde(rename = "object")]
    Object,
}

/// Input schema of a tool. The root is always an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    kind: RootType,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::object()
    }
}

impl InputSchema {
    /// An object schema with no properties.
    #[must_use]
    pub fn object() -> Self {
        Self {
            kind: RootType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark `name` as required. Repeated names are kept once.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Required names that have no entry in `properties`.
    ///
    /// Such a schema still validates, but it is a configuration defect.
    #[must_use]
    pub fn undeclared_required(&self) -> Vec<&str> {
        self.required
            .iter()
            .filter(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_produces_wire_shape() {
        let schema = InputSchema::object()
            .property(
                "state",
                PropertySchema::new(SchemaType::String)
                    .with_description("The state to get weather alerts for"),
            )
            .required("state");

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {
                    "state": {
                        "type": "string",
                        "description": "The state to get weather alerts for"
                    }
                },
                "required": ["state"]
            })
        );
    }

    #[test]
    fn empty_required_is_omitted() {
        let value = serde_json::to_value(InputSchema::object()).unwrap();
        assert_eq!(value, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn required_is_deduplicated() {
        let schema = InputSchema::object().required("a").required("a");
        assert_eq!(schema.required, vec!["a".to_string()]);
    }

    #[test]
    fn undeclared_required_reports_missing_properties() {
        let schema = InputSchema::object()
            .property("state", PropertySchema::new(SchemaType::String))
            .required("state")
            .required("zone");
        assert_eq!(schema.undeclared_required(), vec!["zone"]);
    }

    #[test]
    fn type_tag_requires_string() {
        let mut map = Map::new();
        map.insert("type".into(), json!(7));
        assert!(PropertySchema::from_map(map).type_tag().is_none());
        assert_eq!(
            PropertySchema::new(SchemaType::Integer).type_tag(),
            Some("integer")
        );
    }

    #[test]
    fn schema_type_parsing() {
        assert_eq!("boolean".parse::<SchemaType>(), Ok(SchemaType::Boolean));
        assert_eq!(
            "date".parse::<SchemaType>(),
            Err(UnknownSchemaType("date".into()))
        );
    }

    #[test]
    fn integer_and_number_distinguished() {
        assert!(SchemaType::Integer.matches(&json!(3)));
        assert!(!SchemaType::Integer.matches(&json!(3.0)));
        assert!(SchemaType::Number.matches(&json!(3)));
        assert!(SchemaType::Number.matches(&json!(3.5)));
        assert!(SchemaType::Integer.matches(&json!(u64::MAX)));
    }

    #[test]
    fn every_json_number_reports_as_number() {
        assert_eq!(JsonType::of(&json!(3)), JsonType::Number);
        assert_eq!(JsonType::of(&json!(3.0)), JsonType::Number);
        assert_eq!(JsonType::of(&json!(-3)), JsonType::Number);
        assert_eq!(JsonType::Number.to_string(), "number");
    }

    #[test]
    fn root_type_is_always_object() {
        let schema: InputSchema =
            serde_json::from_value(json!({"type": "object", "properties": {}})).unwrap();
        assert_eq!(schema, InputSchema::object());
        assert!(serde_json::from_value::<InputSchema>(json!({"type": "array"})).is_err());
    }
}
