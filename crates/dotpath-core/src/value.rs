use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping container: unique string keys, deterministic iteration order.
pub type Map = BTreeMap<String, Value>;

/// A dynamically typed tree of mappings, attribute objects and scalars.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Map(Map),
    Object(Object),
}

impl Value {
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Static name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "mapping",
            Value::Object(_) => "object",
        }
    }

    /// Like [`Value::type_name`], but names the class of attribute objects.
    pub fn describe(&self) -> String {
        match self {
            Value::Object(object) => format!("object `{}`", object.class()),
            other => other.type_name().to_string(),
        }
    }
}

/// How an [`Object`] stores its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLayout {
    /// Fields live in an enumerable field dictionary.
    Dict,
    /// Fixed set of declared names; no field dictionary is exposed.
    Slots(BTreeSet<String>),
}

/// An attribute-bearing object: named fields, each individually gettable,
/// settable and deletable.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: String,
    layout: FieldLayout,
    fields: Map,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            layout: FieldLayout::Dict,
            fields: Map::new(),
        }
    }

    pub fn with_slots<I, S>(class: impl Into<String>, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: class.into(),
            layout: FieldLayout::Slots(slots.into_iter().map(Into::into).collect()),
            fields: Map::new(),
        }
    }

    /// Builder-style field assignment. Undeclared slot names are ignored.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if self.declares(&name) {
            self.fields.insert(name, value.into());
        }
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Whether `name` may be stored on this object.
    pub fn declares(&self, name: &str) -> bool {
        match &self.layout {
            FieldLayout::Dict => true,
            FieldLayout::Slots(slots) => slots.contains(name),
        }
    }

    /// The enumerable field dictionary, absent for slots objects.
    pub fn field_dict(&self) -> Option<&Map> {
        match self.layout {
            FieldLayout::Dict => Some(&self.fields),
            FieldLayout::Slots(_) => None,
        }
    }

    pub fn field_dict_mut(&mut self) -> Option<&mut Map> {
        match self.layout {
            FieldLayout::Dict => Some(&mut self.fields),
            FieldLayout::Slots(_) => None,
        }
    }

    pub(crate) fn stored(&self) -> &Map {
        &self.fields
    }

    pub(crate) fn stored_mut(&mut self) -> &mut Map {
        &mut self.fields
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(number),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(flag),
            Value::Number(number) => serde_json::Value::Number(number),
            Value::String(text) => serde_json::Value::String(text),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => map_to_json(map),
            Value::Object(object) => map_to_json(object.fields),
        }
    }
}

fn map_to_json(map: Map) -> serde_json::Value {
    serde_json::Value::Object(
        map.into_iter()
            .map(|(key, value)| (key, serde_json::Value::from(value)))
            .collect(),
    )
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Number(number.into())
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Number(number.into())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Value::Number(number.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become `Null`.
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
