mod entity;
mod field;
pub mod models;
pub mod sql;
mod state;

pub use self::entity::{Entity, EntityOptions, Index, base_fields};
pub use self::field::{Field, FieldDefault, FieldType, FieldValue, Generator, OnDelete};
pub use self::state::ProjectState;
