mod category;
mod customer;
mod order;
mod product;
mod user;

pub use self::category::CategoryRepository;
pub use self::customer::{CustomerCommandRepository, CustomerQueryRepository};
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::user::UserRepository;
