//! Multi-path traversal: `{...}` segments fan one branch out into one branch
//! per matching key, and results are keyed by concrete path.

use crate::options::MissingPolicy;
use crate::resolve::{self, OnAbsent};
use dotpath_core::{push_key, ContainerKind, Path, PathError, Segment, Value};
use std::collections::BTreeMap;
use tracing::trace;

/// Concrete path -> value, one entry per surviving branch.
pub type Matches = BTreeMap<String, Value>;

/// A branch after the last segment. `path` is the display form, `keys` the
/// literal keys that reach the leaf. `value` is `None` when the terminal
/// lookup found nothing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Leaf<'a> {
    pub path: String,
    pub keys: Vec<String>,
    pub value: Option<&'a Value>,
}

impl<'a> Leaf<'a> {
    fn child(&self, key: &str, value: Option<&'a Value>) -> Self {
        let mut path = self.path.clone();
        push_key(&mut path, key);
        let mut keys = self.keys.clone();
        keys.push(key.to_string());
        Leaf { path, keys, value }
    }
}

/// Walks every branch of `path` from `root`, one segment at a time.
///
/// A branch whose intermediate lookup failed, or that reached `Null` before
/// a remaining segment, is dropped. Only a failed lookup of the final segment
/// survives as a leaf with no value.
pub(crate) fn collect<'a>(root: &'a Value, path: &Path) -> Vec<Leaf<'a>> {
    let mut branches = vec![Leaf {
        path: String::new(),
        keys: Vec::new(),
        value: Some(root),
    }];

    for segment in path.segments() {
        let mut next = Vec::with_capacity(branches.len());
        for branch in &branches {
            let Some(current) = branch.value else {
                trace!(branch = %branch.path, "dropping branch below missing value");
                continue;
            };
            if current.is_null() {
                trace!(branch = %branch.path, "dropping branch below null");
                continue;
            }
            match segment {
                Segment::Literal(name) => {
                    next.push(branch.child(name, resolve::field(current, name)));
                }
                Segment::Pattern(pattern) => {
                    for key in resolve::matching_keys(current, pattern) {
                        next.push(branch.child(&key, resolve::field(current, &key)));
                    }
                }
            }
        }
        branches = next;
    }

    branches
}

/// Applies the missing-value policy to collected leaves.
pub(crate) fn finalize(leaves: Vec<Leaf<'_>>, policy: &MissingPolicy) -> Matches {
    leaves
        .into_iter()
        .filter_map(|leaf| policy.resolve(leaf.value).map(|value| (leaf.path, value)))
        .collect()
}

/// Writes `value` at every leaf of `path`, returning how many leaves were
/// written. Not transactional: a failing branch leaves earlier writes applied.
pub(crate) fn assign(
    root: &mut Value,
    path: &Path,
    value: &Value,
    make_missing: bool,
) -> Result<usize, PathError> {
    let mut writer = Writer {
        value,
        make_missing,
        written: 0,
    };
    writer.visit(root, path.segments(), String::new())?;
    Ok(writer.written)
}

struct Writer<'v> {
    value: &'v Value,
    make_missing: bool,
    written: usize,
}

impl Writer<'_> {
    fn visit(
        &mut self,
        current: &mut Value,
        segments: &[Segment],
        concrete: String,
    ) -> Result<(), PathError> {
        let Some((segment, rest)) = segments.split_first() else {
            return Ok(());
        };
        if current.is_null() {
            trace!(branch = %concrete, "skipping null branch");
            return Ok(());
        }

        let keys = match segment {
            Segment::Literal(name) => vec![name.clone()],
            Segment::Pattern(pattern) => {
                let keys = resolve::matching_keys(current, pattern);
                if keys.is_empty() && self.make_missing {
                    return Err(PathError::AmbiguousCreate {
                        pattern: segment.to_string(),
                    });
                }
                keys
            }
        };

        for key in keys {
            let mut branch = concrete.clone();
            push_key(&mut branch, &key);

            if rest.is_empty() {
                resolve::write_field(current, &key, self.value.clone(), &branch)?;
                self.written += 1;
                continue;
            }

            let next = if self.make_missing {
                Some(resolve::descend(current, &key, OnAbsent::Create, &branch)?)
            } else {
                // Mappings raise on a missing key; objects skip the branch.
                let kind = current.container_kind();
                match resolve::field_mut(current, &key) {
                    None if kind == ContainerKind::Mapping => {
                        return Err(PathError::KeyNotFound { key, path: branch });
                    }
                    next => next,
                }
            };
            match next {
                Some(next) => self.visit(next, rest, branch)?,
                None => trace!(branch = %branch, "skipping missing intermediate"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fanout_test.rs"]
mod tests;
