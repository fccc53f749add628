mod command;
mod query;

pub use self::command::{CustomerCommandRepositoryTrait, DynCustomerCommandRepository};
pub use self::query::{CustomerQueryRepositoryTrait, DynCustomerQueryRepository};
