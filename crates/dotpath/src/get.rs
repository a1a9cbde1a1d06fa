use crate::fanout::{self, Matches};
use crate::options::{GetOptions, HasOptions};
use crate::traverse;
use dotpath_core::{Path, PathError, Value};
use tracing::debug;

/// Reads the value at a dot-separated `path`.
///
/// A missing leaf or intermediate resolves through `options.default`;
/// `Ok(None)` only happens under [`MissingPolicy::Ignore`]. A null `obj` is
/// an error unless `options.allow_none`, in which case `Some(Null)` is
/// returned.
///
/// [`MissingPolicy::Ignore`]: crate::MissingPolicy::Ignore
pub fn get(obj: &Value, path: &str, options: &GetOptions) -> Result<Option<Value>, PathError> {
    if obj.is_null() {
        if !options.allow_none {
            return Err(PathError::NullRoot);
        }
        return Ok(Some(Value::Null));
    }

    let found = traverse::lookup(obj, &traverse::literal_keys(path));
    debug!(path, found = found.is_some(), "get");
    Ok(options.default.resolve(found))
}

/// Reads every value matched by a path whose `{...}` segments are regular
/// expressions, keyed by concrete path.
///
/// Matching nothing yields an empty map. A dotted key shows up re-wrapped in
/// the result (`a.{b\.c}`), so any returned path can be passed back in.
pub fn get_matches(obj: &Value, path: &str, options: &GetOptions) -> Result<Matches, PathError> {
    if obj.is_null() {
        if !options.allow_none {
            return Err(PathError::NullRoot);
        }
        return Ok(Matches::new());
    }

    let parsed = Path::parse(path)?;
    let matches = fanout::finalize(fanout::collect(obj, &parsed), &options.default);
    debug!(path, matches = matches.len(), "get_matches");
    Ok(matches)
}

/// Whether the leaf at `path` exists. In regex mode, whether any matched
/// branch reaches an existing leaf.
pub fn has(obj: &Value, path: &str, options: &HasOptions) -> Result<bool, PathError> {
    if obj.is_null() {
        if !options.allow_none {
            return Err(PathError::NullRoot);
        }
        return Ok(false);
    }

    let found = if options.regex {
        let parsed = Path::parse(path)?;
        fanout::collect(obj, &parsed)
            .iter()
            .any(|leaf| leaf.value.is_some())
    } else {
        traverse::lookup(obj, &traverse::literal_keys(path)).is_some()
    };
    debug!(path, regex = options.regex, found, "has");
    Ok(found)
}

#[cfg(test)]
#[path = "get_test.rs"]
mod tests;
