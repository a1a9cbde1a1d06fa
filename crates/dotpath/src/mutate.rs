//! Read-transform-write over one or many paths, and the shallow merge built
//! on top of it.

use crate::fanout;
use crate::options::{MissingPolicy, MutateOptions, UpdateOptions};
use crate::traverse;
use dotpath_core::{BoxError, Map, Path, PathError, Value};
use tracing::{debug, trace};

/// One concrete leaf to transform: the path as reported in errors, and the
/// literal keys that reach it.
struct Target {
    path: String,
    keys: Vec<String>,
}

/// Resolves `path` to the concrete leaves a mutation visits. Regex targets are
/// fixed before anything is written.
fn targets(obj: &Value, path: &str, regex: bool) -> Result<Vec<Target>, PathError> {
    if !regex {
        return Ok(vec![Target {
            path: path.to_string(),
            keys: traverse::literal_keys(path),
        }]);
    }

    let parsed = Path::parse(path)?;
    Ok(fanout::collect(obj, &parsed)
        .into_iter()
        .map(|leaf| Target {
            path: leaf.path,
            keys: leaf.keys,
        })
        .collect())
}

fn transform_failure<E: Into<BoxError>>(path: &str) -> impl FnOnce(E) -> PathError + '_ {
    move |source| PathError::TransformFailure {
        path: path.to_string(),
        source: source.into(),
    }
}

/// Replaces the value at `path` with `transform(value)`.
///
/// A missing leaf is handed to `transform` as the policy's default, or skipped
/// under [`MissingPolicy::Ignore`] (the default). Results are written back with
/// intermediates created as needed. In regex mode every concrete leaf found by
/// the read is transformed and written independently.
pub fn mutate<F, E>(
    obj: &mut Value,
    path: &str,
    mut transform: F,
    options: &MutateOptions,
) -> Result<(), PathError>
where
    F: FnMut(Value) -> Result<Value, E>,
    E: Into<BoxError>,
{
    if obj.is_null() {
        return Err(PathError::NullRoot);
    }

    let mut applied = 0usize;
    for target in targets(obj, path, options.regex)? {
        let Some(current) = options
            .default
            .resolve(traverse::lookup(obj, &target.keys))
        else {
            trace!(leaf = %target.path, "skipping missing leaf");
            continue;
        };
        let next = transform(current).map_err(transform_failure(&target.path))?;
        traverse::assign(obj, &target.keys, next, true, &target.path)?;
        applied += 1;
    }

    debug!(path, regex = options.regex, applied, "mutate");
    Ok(())
}

/// Runs `transform` on the value at `path` without copying it out.
///
/// Nothing is written back. For a missing leaf with a
/// [`MissingPolicy::Default`] policy the transform sees a scratch copy of the
/// default, which is then discarded.
pub fn mutate_in_place<F, E>(
    obj: &mut Value,
    path: &str,
    mut transform: F,
    options: &MutateOptions,
) -> Result<(), PathError>
where
    F: FnMut(&mut Value) -> Result<(), E>,
    E: Into<BoxError>,
{
    let applied = apply_in_place(obj, path, &options.default, options.regex, |target, value| {
        transform(value).map_err(transform_failure(target))
    })?;
    debug!(path, regex = options.regex, applied, "mutate_in_place");
    Ok(())
}

fn apply_in_place<F>(
    obj: &mut Value,
    path: &str,
    policy: &MissingPolicy,
    regex: bool,
    mut apply: F,
) -> Result<usize, PathError>
where
    F: FnMut(&str, &mut Value) -> Result<(), PathError>,
{
    if obj.is_null() {
        return Err(PathError::NullRoot);
    }

    let mut applied = 0usize;
    for target in targets(obj, path, regex)? {
        match (traverse::lookup_mut(obj, &target.keys), policy) {
            (Some(value), _) => apply(&target.path, value)?,
            (None, MissingPolicy::Default(default)) => {
                let mut scratch = default.clone();
                apply(&target.path, &mut scratch)?;
            }
            (None, MissingPolicy::Ignore) => {
                trace!(leaf = %target.path, "skipping missing leaf");
                continue;
            }
        }
        applied += 1;
    }
    Ok(applied)
}

/// Shallow-merges the mapping `patch` into the mapping or dict-layout object
/// at `path`. Patch entries win; other existing entries are kept.
///
/// `patch` is checked before anything else. A missing target is a
/// `TypeMismatch` unless in regex mode, where missing branches are skipped.
pub fn update(
    obj: &mut Value,
    path: &str,
    patch: &Value,
    options: &UpdateOptions,
) -> Result<(), PathError> {
    let Some(patch) = patch.as_map() else {
        return Err(PathError::InvalidPatch {
            found: patch.describe(),
        });
    };

    let policy = if options.regex {
        MissingPolicy::Ignore
    } else {
        MissingPolicy::Default(Value::Null)
    };
    let merged = apply_in_place(obj, path, &policy, options.regex, |target, value| {
        merge(value, patch, target)
    })?;
    debug!(path, regex = options.regex, merged, keys = patch.len(), "update");
    Ok(())
}

fn merge(target: &mut Value, patch: &Map, path: &str) -> Result<(), PathError> {
    let found = target.describe();
    let mismatch = || PathError::TypeMismatch {
        path: path.to_string(),
        found: found.clone(),
    };
    let fields = match target {
        Value::Map(map) => map,
        Value::Object(object) => object.field_dict_mut().ok_or_else(mismatch)?,
        _ => return Err(mismatch()),
    };
    fields.extend(patch.iter().map(|(key, value)| (key.clone(), value.clone())));
    Ok(())
}

#[cfg(test)]
#[path = "mutate_test.rs"]
mod tests;
