use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::{Error, ErrorKind, Result};

/// Type of a flattened schema property.
///
/// Array types index each element through the scalar element's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    BooleanArray,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::StringArray => "string[]",
            FieldType::NumberArray => "number[]",
            FieldType::BooleanArray => "boolean[]",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FieldType::StringArray | FieldType::NumberArray | FieldType::BooleanArray
        )
    }

    /// The element type for arrays, the type itself for scalars.
    pub fn scalar(&self) -> FieldType {
        match self {
            FieldType::StringArray => FieldType::String,
            FieldType::NumberArray => FieldType::Number,
            FieldType::BooleanArray => FieldType::Boolean,
            other => *other,
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldType> {
        match s {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "boolean" => Ok(FieldType::Boolean),
            "string[]" => Ok(FieldType::StringArray),
            "number[]" => Ok(FieldType::NumberArray),
            "boolean[]" => Ok(FieldType::BooleanArray),
            other => Err(Error::new(
                ErrorKind::InvalidSchemaType,
                format!("unknown schema type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<FieldType, D::Error> {
        struct FieldTypeVisitor;

        impl Visitor<'_> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a schema type string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<FieldType, E> {
                v.parse().map_err(|_| {
                    de::Error::unknown_variant(
                        v,
                        &[
                            "string",
                            "number",
                            "boolean",
                            "string[]",
                            "number[]",
                            "boolean[]",
                        ],
                    )
                })
            }
        }

        deserializer.deserialize_str(FieldTypeVisitor)
    }
}

/// Flattened document schema.
///
/// Nested schema objects become dotted paths, so `{"meta": {"rating":
/// "number"}}` yields the property `meta.rating`. Property order follows
/// the definition order of the schema value.
#[derive(Debug, Clone)]
pub struct Schema {
    properties: Vec<(String, FieldType)>,
}

impl Schema {
    /// Parse a schema definition.
    ///
    /// The definition is a JSON object mapping property names to type
    /// strings or nested objects. Anything else fails with
    /// `INVALID_SCHEMA_TYPE`.
    pub fn parse(definition: &Value) -> Result<Schema> {
        let object = definition.as_object().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidSchemaType,
                "schema definition must be an object".to_string(),
            )
        })?;

        let mut properties = Vec::new();
        Self::flatten(object, "", &mut properties)?;
        Ok(Schema { properties })
    }

    /// Build a schema straight from flattened pairs (used when restoring
    /// persisted state).
    pub fn from_flattened(properties: Vec<(String, FieldType)>) -> Schema {
        Schema { properties }
    }

    fn flatten(
        object: &serde_json::Map<String, Value>,
        prefix: &str,
        out: &mut Vec<(String, FieldType)>,
    ) -> Result<()> {
        for (key, value) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            match value {
                Value::String(type_name) => {
                    out.push((path, type_name.parse()?));
                }
                Value::Object(nested) => {
                    Self::flatten(nested, &path, out)?;
                }
                other => {
                    return Err(Error::new(
                        ErrorKind::InvalidSchemaType,
                        format!("invalid schema entry for '{}': {}", path, other),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn properties(&self) -> &[(String, FieldType)] {
        &self.properties
    }

    pub fn field_type(&self, path: &str) -> Option<FieldType> {
        self.properties
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, t)| *t)
    }

    /// Scalar (non-array) paths, the candidates for sorting.
    pub fn scalar_properties(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.properties
            .iter()
            .filter(|(_, t)| !t.is_array())
            .map(|(p, t)| (p.as_str(), *t))
    }
}

/// Check that a JSON value is usable as the given field type.
pub fn value_matches_type(value: &Value, field_type: FieldType) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Number => value.as_f64().is_some(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::StringArray | FieldType::NumberArray | FieldType::BooleanArray => value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .all(|item| value_matches_type(item, field_type.scalar()))
            })
            .unwrap_or(false),
    }
}
