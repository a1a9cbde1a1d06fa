use crate::options::SetOptions;
use crate::set::set;
use dotpath_core::{PathError, Value};
use tracing::debug;

/// Builds a nested mapping with one branch per combination of `layers`, every
/// leaf holding a clone of `value`.
///
/// `[["cat", "dog"], ["x", "y"]]` yields branches `cat.x`, `cat.y`, `dog.x`,
/// `dog.y`. Keys are joined with `.` before being set, so a key that itself
/// contains a dot adds a nesting level. Every layer must be non-empty; this is
/// checked before anything is built.
pub fn populate<L, K>(layers: &[L], value: Value) -> Result<Value, PathError>
where
    L: AsRef<[K]>,
    K: AsRef<str>,
{
    if let Some(index) = layers.iter().position(|layer| layer.as_ref().is_empty()) {
        return Err(PathError::EmptyLayer { index });
    }

    let mut root = Value::map();
    if layers.is_empty() {
        return Ok(root);
    }

    let options = SetOptions {
        make_missing: true,
        regex: false,
    };
    let mut cursor = vec![0usize; layers.len()];
    let mut branches = 0usize;
    loop {
        let path = layers
            .iter()
            .zip(&cursor)
            .map(|(layer, &at)| layer.as_ref()[at].as_ref())
            .collect::<Vec<_>>()
            .join(".");
        set(&mut root, &path, value.clone(), &options)?;
        branches += 1;

        // Odometer step: the last layer turns fastest.
        let Some(turned) = (0..layers.len()).rev().find(|&depth| {
            cursor[depth] + 1 < layers[depth].as_ref().len()
        }) else {
            break;
        };
        cursor[turned] += 1;
        for reset in &mut cursor[turned + 1..] {
            *reset = 0;
        }
    }

    debug!(layers = layers.len(), branches, "populate");
    Ok(root)
}

#[cfg(test)]
#[path = "populate_test.rs"]
mod tests;
