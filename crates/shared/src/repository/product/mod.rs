mod command;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::query::ProductQueryRepository;

pub(crate) const PRODUCT_COLUMNS: &str =
    "id, created_at, updated_at, is_active, is_deleted, name, description, price, category_id";
