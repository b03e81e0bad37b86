//! Declarative collection schema descriptors.
//!
//! Each resource supplies a [`CollectionSchema`] describing its fields. Store
//! adapters register the descriptor once at start-up and validate every write
//! against it. The same descriptor renders the JSON-schema document that
//! clients use to build entry forms.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::record::{Document, ID_FIELD};

/// Type of a single document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Signed 64-bit integer.
    Int64,
    /// Any JSON number.
    Number,
    /// UTF-8 string with an optional maximum length in characters.
    String {
        /// Maximum number of characters, when bounded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Homogeneous array.
    Array {
        /// Kind shared by every element.
        items: Box<FieldKind>,
    },
    /// Nested object with its own declared fields.
    Object {
        /// Declared nested fields; all are optional.
        fields: Vec<FieldSchema>,
    },
}

impl FieldKind {
    /// Unbounded string.
    #[must_use]
    pub const fn string() -> Self {
        Self::String { max_length: None }
    }

    /// String bounded to `max_length` characters.
    #[must_use]
    pub const fn bounded_string(max_length: usize) -> Self {
        Self::String {
            max_length: Some(max_length),
        }
    }

    /// Array of `items`.
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    /// Object with the given nested fields.
    #[must_use]
    pub const fn object(fields: Vec<FieldSchema>) -> Self {
        Self::Object { fields }
    }

    const fn expected(&self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Number => "number",
            Self::String { .. } => "string",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }

    fn json_schema(&self) -> Map<String, Value> {
        let mut out = Map::new();
        match self {
            Self::Int64 => {
                out.insert("type".into(), json!("integer"));
                out.insert("format".into(), json!("int64"));
            }
            Self::Number => {
                out.insert("type".into(), json!("number"));
            }
            Self::String { max_length } => {
                out.insert("type".into(), json!("string"));
                if let Some(max) = max_length {
                    out.insert("maxLength".into(), json!(max));
                }
            }
            Self::Array { items } => {
                out.insert("type".into(), json!("array"));
                out.insert("items".into(), Value::Object(items.json_schema()));
            }
            Self::Object { fields } => {
                out.insert("type".into(), json!("object"));
                out.insert("properties".into(), properties(fields));
            }
        }
        out
    }
}

/// Named field within a collection or nested object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Wire name of the field.
    pub name: String,
    /// Human-readable description shown in forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field type.
    pub kind: FieldKind,
}

impl FieldSchema {
    /// Declare a field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Reason a document does not conform to a [`CollectionSchema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    /// A required field is absent or `null`.
    #[error("field '{field}' is required")]
    MissingRequired {
        /// Offending field path.
        field: String,
    },
    /// A field holds a value of the wrong type.
    #[error("field '{field}' must be of type {expected}")]
    WrongType {
        /// Offending field path.
        field: String,
        /// Declared type name.
        expected: &'static str,
    },
    /// A string field exceeds its maximum length.
    #[error("field '{field}' must be at most {max_length} characters")]
    TooLong {
        /// Offending field path.
        field: String,
        /// Declared maximum length.
        max_length: usize,
    },
    /// The document carries a field the schema does not declare.
    #[error("field '{field}' is not declared in the collection schema")]
    UnknownField {
        /// Offending field path.
        field: String,
    },
}

/// Declarative descriptor for a collection.
///
/// The primary key is always the store-generated `id` field.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use storefront::domain::{CollectionSchema, FieldKind};
///
/// let schema = CollectionSchema::new("products", "Products on sale")
///     .field("name", FieldKind::bounded_string(100))
///     .field("price", FieldKind::Number)
///     .require("name");
///
/// let document = json!({ "name": "Pen", "price": 1.5 });
/// let document = document.as_object().expect("object");
/// assert!(schema.validate(document).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    name: String,
    description: String,
    fields: Vec<FieldSchema>,
    required: Vec<String>,
}

impl CollectionSchema {
    /// Start a descriptor for the collection called `name`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Declare a top-level field.
    #[must_use]
    pub fn field(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.with_field(FieldSchema::new(name, kind))
    }

    /// Declare a fully specified top-level field.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark a top-level field as required.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared top-level fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Names of required top-level fields.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Check `document` against the descriptor.
    ///
    /// The `id` field is managed by the store and skipped here. Optional
    /// fields may be `null`, which is treated as absent.
    ///
    /// # Errors
    /// Returns the first [`SchemaViolation`] encountered.
    pub fn validate(&self, document: &Document) -> Result<(), SchemaViolation> {
        for name in &self.required {
            if document.get(name).is_none_or(Value::is_null) {
                return Err(SchemaViolation::MissingRequired {
                    field: name.clone(),
                });
            }
        }
        let body = document.iter().filter(|(key, _)| key.as_str() != ID_FIELD);
        validate_object(&self.fields, body, "")
    }

    /// Render the descriptor as a JSON-schema document.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut props = Map::new();
        props.insert(
            ID_FIELD.to_owned(),
            json!({
                "description": "A unique identifier for the record",
                "type": "integer",
                "format": "int64",
                "autoGenerate": true
            }),
        );
        if let Value::Object(declared) = properties(&self.fields) {
            props.extend(declared);
        }
        json!({
            "title": self.name,
            "description": self.description,
            "properties": props,
            "primary_key": [ID_FIELD],
            "required": self.required,
        })
    }
}

fn properties(fields: &[FieldSchema]) -> Value {
    let mut out = Map::new();
    for field in fields {
        let mut schema = field.kind.json_schema();
        if let Some(description) = &field.description {
            schema.insert("description".into(), json!(description));
        }
        out.insert(field.name.clone(), Value::Object(schema));
    }
    Value::Object(out)
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_object<'a>(
    fields: &[FieldSchema],
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    prefix: &str,
) -> Result<(), SchemaViolation> {
    for (key, value) in entries {
        let path = join_path(prefix, key);
        let Some(field) = fields.iter().find(|field| field.name == *key) else {
            return Err(SchemaViolation::UnknownField { field: path });
        };
        if !value.is_null() {
            validate_value(&field.kind, value, &path)?;
        }
    }
    Ok(())
}

fn validate_value(kind: &FieldKind, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let wrong_type = || SchemaViolation::WrongType {
        field: path.to_owned(),
        expected: kind.expected(),
    };
    match (kind, value) {
        (FieldKind::Int64, Value::Number(number)) if number.is_i64() => Ok(()),
        (FieldKind::Number, Value::Number(_)) => Ok(()),
        (FieldKind::String { max_length }, Value::String(text)) => match max_length {
            Some(max) if text.chars().count() > *max => Err(SchemaViolation::TooLong {
                field: path.to_owned(),
                max_length: *max,
            }),
            _ => Ok(()),
        },
        (FieldKind::Array { items }, Value::Array(elements)) => {
            for (index, element) in elements.iter().enumerate() {
                validate_value(items, element, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        (FieldKind::Object { fields }, Value::Object(map)) => {
            validate_object(fields, map.iter(), path)
        }
        _ => Err(wrong_type()),
    }
}
