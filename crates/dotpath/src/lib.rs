mod delete;
mod fanout;
mod get;
mod mutate;
pub mod options;
mod populate;
mod resolve;
mod set;
mod traverse;

pub use delete::delete;
pub use fanout::Matches;
pub use get::{get, get_matches, has};
pub use mutate::{mutate, mutate_in_place, update};
pub use options::{
    DeleteOptions, GetOptions, HasOptions, MissingPolicy, MutateOptions, SetOptions, UpdateOptions,
};
pub use populate::populate;
pub use set::set;

pub use dotpath_core::{
    concrete_keys, escape_key, BoxError, ContainerKind, FieldLayout, Fields, Map, Object, Path,
    PathError, Pattern, RejectedField, Segment, Value,
};
