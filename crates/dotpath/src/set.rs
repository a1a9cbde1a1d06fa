use crate::fanout;
use crate::options::SetOptions;
use crate::traverse;
use dotpath_core::{Path, PathError, Value};
use tracing::debug;

/// Writes `value` at `path`, creating the leaf if needed.
///
/// Missing intermediates fail with `KeyNotFound`/`AttributeNotFound` unless
/// `make_missing` creates them as empty mappings. In regex mode every matched
/// branch is written; a `{...}` segment that matches nothing is never created
/// and raises `AmbiguousCreate` under `make_missing`.
pub fn set(obj: &mut Value, path: &str, value: Value, options: &SetOptions) -> Result<(), PathError> {
    if obj.is_null() {
        return Err(PathError::NullRoot);
    }

    if options.regex {
        let parsed = Path::parse(path)?;
        let written = fanout::assign(obj, &parsed, &value, options.make_missing)?;
        debug!(path, written, "set");
    } else {
        traverse::assign(
            obj,
            &traverse::literal_keys(path),
            value,
            options.make_missing,
            path,
        )?;
        debug!(path, "set");
    }
    Ok(())
}

#[cfg(test)]
#[path = "set_test.rs"]
mod tests;
