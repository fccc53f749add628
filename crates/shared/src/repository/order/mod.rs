mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

pub(crate) const ORDER_COLUMNS: &str =
    "id, created_at, updated_at, is_active, is_deleted, customer_id, status, total_amount, order_number";
