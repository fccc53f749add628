mod category;
mod customer;
mod order;
mod price;
mod product;
mod user;

pub use self::category::Category;
pub use self::customer::Customer;
pub use self::order::{DEFAULT_ORDER_STATUS, Order};
pub use self::price::{Price, PriceParseError};
pub use self::product::Product;
pub use self::user::User;
