//! Single-path traversal over literal keys: no branching, no patterns.

use crate::resolve::{self, OnAbsent};
use dotpath_core::{PathError, Value};

/// Splits a non-regex path: every dot separates keys, braces mean nothing.
pub(crate) fn literal_keys(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// Follows `keys` from `root`. A missing or non-container intermediate
/// short-circuits to `None`.
pub(crate) fn lookup<'a>(root: &'a Value, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(root, |current, key| resolve::field(current, key))
}

pub(crate) fn lookup_mut<'a>(root: &'a mut Value, keys: &[String]) -> Option<&'a mut Value> {
    let mut current = root;
    for key in keys {
        current = resolve::field_mut(current, key)?;
    }
    Some(current)
}

/// Writes `value` at `keys`. Only intermediates can fail; the leaf is
/// always created or overwritten.
pub(crate) fn assign(
    root: &mut Value,
    keys: &[String],
    value: Value,
    make_missing: bool,
    path: &str,
) -> Result<(), PathError> {
    let Some((leaf, parents)) = keys.split_last() else {
        return Ok(());
    };
    let on_absent = if make_missing {
        OnAbsent::Create
    } else {
        OnAbsent::Raise
    };

    let mut current = root;
    for key in parents {
        current = resolve::descend(current, key, on_absent, path)?;
    }
    resolve::write_field(current, leaf, value, path)
}

/// Deletes the leaf at `keys`. With `allow_missing`, an absent intermediate
/// or leaf is a silent no-op.
pub(crate) fn remove(
    root: &mut Value,
    keys: &[String],
    allow_missing: bool,
    path: &str,
) -> Result<(), PathError> {
    let Some((leaf, parents)) = keys.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for key in parents {
        let kind = current.container_kind();
        let owner = current.describe();
        current = match resolve::field_mut(current, key) {
            Some(next) => next,
            None if allow_missing => return Ok(()),
            None => return Err(PathError::not_found(kind, key, &owner, path)),
        };
    }

    let kind = current.container_kind();
    let owner = current.describe();
    let removed = current
        .as_fields_mut()
        .and_then(|fields| fields.delete_field(leaf));
    if removed.is_none() && !allow_missing {
        return Err(PathError::not_found(kind, leaf, &owner, path));
    }
    Ok(())
}

#[cfg(test)]
#[path = "traverse_test.rs"]
mod tests;
