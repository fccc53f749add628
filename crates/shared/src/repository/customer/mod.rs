mod command;
mod query;

pub use self::command::CustomerCommandRepository;
pub use self::query::CustomerQueryRepository;

pub(crate) const CUSTOMER_COLUMNS: &str =
    "id, created_at, updated_at, is_active, is_deleted, name, phonenumber, email, address, user_id";
