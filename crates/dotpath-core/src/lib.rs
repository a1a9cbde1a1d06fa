pub mod error;
pub mod fields;
pub mod path;
pub mod value;

pub use error::{BoxError, PathError};
pub use fields::{ContainerKind, Fields, RejectedField};
pub use path::{concrete_keys, escape_key, push_key, split_segments, Path, Pattern, Segment};
pub use value::{FieldLayout, Map, Object, Value};
