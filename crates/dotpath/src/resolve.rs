//! One traversal step: a container plus one segment gives the next value(s).

use dotpath_core::{Fields, PathError, Pattern, RejectedField, Value};

/// What a mutable literal lookup does when the name is absent. The third
/// policy, returning a default, is [`field`] / [`field_mut`] yielding `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnAbsent {
    Raise,
    Create,
}

/// Read-only literal lookup. Non-containers have no fields.
pub(crate) fn field<'a>(container: &'a Value, name: &str) -> Option<&'a Value> {
    container.as_fields()?.get_field(name)
}

pub(crate) fn field_mut<'a>(container: &'a mut Value, name: &str) -> Option<&'a mut Value> {
    container.as_fields_mut()?.get_field_mut(name)
}

/// Mutable literal lookup that either fails or creates an empty mapping
/// when `name` is absent.
pub(crate) fn descend<'a>(
    container: &'a mut Value,
    name: &str,
    on_absent: OnAbsent,
    path: &str,
) -> Result<&'a mut Value, PathError> {
    let kind = container.container_kind();
    let owner = container.describe();
    let fields = container
        .as_fields_mut()
        .ok_or_else(|| PathError::not_found(kind, name, &owner, path))?;

    match on_absent {
        OnAbsent::Create => fields
            .get_or_insert_map(name)
            .map_err(|rejected| rejected_error(rejected, path)),
        OnAbsent::Raise => fields
            .get_field_mut(name)
            .ok_or_else(|| PathError::not_found(kind, name, &owner, path)),
    }
}

/// Writes `value` under `name`, creating the key/attribute if absent.
pub(crate) fn write_field(
    container: &mut Value,
    name: &str,
    value: Value,
    path: &str,
) -> Result<(), PathError> {
    let kind = container.container_kind();
    let owner = container.describe();
    let fields = container
        .as_fields_mut()
        .ok_or_else(|| PathError::not_found(kind, name, &owner, path))?;
    fields
        .set_field(name, value)
        .map(|_| ())
        .map_err(|rejected| rejected_error(rejected, path))
}

/// Keys of `container` that fully match `pattern`: every mapping key, or the
/// stored fields of a dict-layout object. Zero matches is not an error.
pub(crate) fn matching_keys(container: &Value, pattern: &Pattern) -> Vec<String> {
    container
        .as_fields()
        .map(|fields| {
            fields
                .list_fields()
                .into_iter()
                .filter(|key| pattern.is_match(key))
                .collect()
        })
        .unwrap_or_default()
}

fn rejected_error(rejected: RejectedField, path: &str) -> PathError {
    PathError::AttributeNotFound {
        attribute: rejected.name,
        owner: format!("object `{}`", rejected.class),
        path: path.to_string(),
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
