use crate::fields::ContainerKind;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("root object was null")]
    NullRoot,
    #[error("key `{key}` not found while resolving `{path}`")]
    KeyNotFound { key: String, path: String },
    #[error("{owner} has no attribute `{attribute}` (resolving `{path}`)")]
    AttributeNotFound {
        attribute: String,
        owner: String,
        path: String,
    },
    #[error("value at `{path}` is {found}, not a mapping or an object with a field dictionary")]
    TypeMismatch { path: String, found: String },
    #[error("patch must be a mapping but was {found}")]
    InvalidPatch { found: String },
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("no key matched pattern `{pattern}`, cannot decide which key to create")]
    AmbiguousCreate { pattern: String },
    #[error("transform failed at `{path}`: {source}")]
    TransformFailure {
        path: String,
        #[source]
        source: BoxError,
    },
    #[error("layer {index} has no keys")]
    EmptyLayer { index: usize },
}

impl PathError {
    /// Lookup failure of `name` on a container of the given kind.
    pub fn not_found(kind: ContainerKind, name: &str, owner: &str, path: &str) -> Self {
        match kind {
            ContainerKind::Mapping => PathError::KeyNotFound {
                key: name.to_string(),
                path: path.to_string(),
            },
            ContainerKind::Object => PathError::AttributeNotFound {
                attribute: name.to_string(),
                owner: owner.to_string(),
                path: path.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
