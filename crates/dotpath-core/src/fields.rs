use crate::value::{Map, Object, Value};

/// Which kind of container a lookup failed on; selects the error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Mapping,
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{class}` has no slot named `{name}`")]
pub struct RejectedField {
    pub class: String,
    pub name: String,
}

/// Uniform field access over mappings and attribute objects.
pub trait Fields {
    fn kind(&self) -> ContainerKind;

    fn get_field(&self, name: &str) -> Option<&Value>;

    fn get_field_mut(&mut self, name: &str) -> Option<&mut Value>;

    fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Writes `value` under `name`, returning the previous value.
    fn set_field(&mut self, name: &str, value: Value) -> Result<Option<Value>, RejectedField>;

    fn delete_field(&mut self, name: &str) -> Option<Value>;

    /// Names that regex segments may expand over.
    fn list_fields(&self) -> Vec<String>;

    /// Returns the field, inserting an empty mapping first when absent.
    fn get_or_insert_map(&mut self, name: &str) -> Result<&mut Value, RejectedField>;
}

impl Fields for Map {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Mapping
    }

    fn get_field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<Option<Value>, RejectedField> {
        Ok(self.insert(name.to_string(), value))
    }

    fn delete_field(&mut self, name: &str) -> Option<Value> {
        self.remove(name)
    }

    fn list_fields(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn get_or_insert_map(&mut self, name: &str) -> Result<&mut Value, RejectedField> {
        Ok(self.entry(name.to_string()).or_insert_with(Value::map))
    }
}

impl Fields for Object {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Object
    }

    fn get_field(&self, name: &str) -> Option<&Value> {
        self.stored().get(name)
    }

    fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.stored_mut().get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<Option<Value>, RejectedField> {
        if !self.declares(name) {
            return Err(RejectedField {
                class: self.class().to_string(),
                name: name.to_string(),
            });
        }
        Ok(self.stored_mut().insert(name.to_string(), value))
    }

    fn delete_field(&mut self, name: &str) -> Option<Value> {
        self.stored_mut().remove(name)
    }

    // Slots objects are not enumerable.
    fn list_fields(&self) -> Vec<String> {
        self.field_dict()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn get_or_insert_map(&mut self, name: &str) -> Result<&mut Value, RejectedField> {
        if !self.declares(name) {
            return Err(RejectedField {
                class: self.class().to_string(),
                name: name.to_string(),
            });
        }
        Ok(self
            .stored_mut()
            .entry(name.to_string())
            .or_insert_with(Value::map))
    }
}

impl Value {
    /// Field access for containers; scalars, arrays and null have none.
    pub fn as_fields(&self) -> Option<&dyn Fields> {
        match self {
            Value::Map(map) => Some(map as &dyn Fields),
            Value::Object(object) => Some(object as &dyn Fields),
            _ => None,
        }
    }

    pub fn as_fields_mut(&mut self) -> Option<&mut dyn Fields> {
        match self {
            Value::Map(map) => Some(map as &mut dyn Fields),
            Value::Object(object) => Some(object as &mut dyn Fields),
            _ => None,
        }
    }

    /// Mappings report missing keys; everything else reports missing attributes.
    pub fn container_kind(&self) -> ContainerKind {
        match self {
            Value::Map(_) => ContainerKind::Mapping,
            _ => ContainerKind::Object,
        }
    }
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
