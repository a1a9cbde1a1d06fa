use crate::fanout;
use crate::options::DeleteOptions;
use crate::traverse;
use dotpath_core::{Path, PathError, Value};
use tracing::debug;

/// Removes the key or attribute at `path`.
///
/// With `allow_missing` (the default) an absent leaf, an absent intermediate
/// or a null root is a silent no-op. In regex mode the existing leaves are
/// collected first and then removed one by one, so the deletions never
/// re-match a key set that is changing underneath them.
pub fn delete(obj: &mut Value, path: &str, options: &DeleteOptions) -> Result<(), PathError> {
    if obj.is_null() {
        if options.allow_missing {
            return Ok(());
        }
        return Err(PathError::NullRoot);
    }

    if !options.regex {
        traverse::remove(obj, &traverse::literal_keys(path), options.allow_missing, path)?;
        debug!(path, "delete");
        return Ok(());
    }

    let parsed = Path::parse(path)?;
    let existing: Vec<(String, Vec<String>)> = fanout::collect(obj, &parsed)
        .into_iter()
        .filter(|leaf| leaf.value.is_some())
        .map(|leaf| (leaf.path, leaf.keys))
        .collect();
    for (concrete, keys) in &existing {
        traverse::remove(obj, keys, true, concrete)?;
    }
    debug!(path, deleted = existing.len(), "delete");
    Ok(())
}

#[cfg(test)]
#[path = "delete_test.rs"]
mod tests;
