//! Pure functions turning loosely-typed JSON-LD fields into canonical values.
//!
//! Sites encode the same schema.org property as a string, a list, or a nested
//! object depending on their CMS. Every normalizer takes a [`Field`] and has one
//! arm per shape; a shape it cannot use degrades to an empty value.

use serde_json::{Map, Number, Value};

mod author;
mod duration;
mod image;
mod instructions;
mod nutrition;
mod slug;
mod text;

pub use author::parse_author;
pub use duration::parse_duration;
pub use image::image_url;
pub use instructions::{parse_ingredients, parse_instructions};
pub use nutrition::parse_nutrition;
pub use slug::slugify;
pub use text::{clean_str, clean_text};

/// One JSON-LD property value, classified by shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Missing or `null`
    Absent,
    /// String, number or boolean
    Scalar(&'a Value),
    List(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> Field<'a> {
    /// Look up `key` on a record; non-object records have no fields
    pub fn of(record: &'a Value, key: &str) -> Self {
        Field::from(record.get(key))
    }

    /// Text of a scalar, or `None` for anything that is not a truthy scalar
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Field::Scalar(value) => truthy_text(value),
            _ => None,
        }
    }
}

impl<'a> From<&'a Value> for Field<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Field::Absent,
            Value::Array(items) => Field::List(items),
            Value::Object(map) => Field::Object(map),
            scalar => Field::Scalar(scalar),
        }
    }
}

impl<'a> From<Option<&'a Value>> for Field<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Field::Absent, Field::from)
    }
}

/// Empty strings, zero and `false` carry no information in scraped metadata.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Whole-valued floats print without a fraction: `4.0` reads as "4"
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}
