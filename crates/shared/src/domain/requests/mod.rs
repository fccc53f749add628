mod category;
mod customer;
mod order;
mod product;
mod user;

pub use self::category::CreateCategoryRequest;
pub use self::customer::{CreateCustomerRequest, UpdateCustomerRequest};
pub use self::order::CreateOrderRequest;
pub use self::product::CreateProductRequest;
pub use self::user::CreateUserRequest;

use crate::model::Price;
use validator::ValidationError;

/// Amounts are stored in `decimal(10, 2)` columns.
pub(crate) fn validate_price(price: &Price) -> Result<(), ValidationError> {
    if !price.fits(10) {
        return Err(ValidationError::new("range").with_message("Price exceeds 10 digits".into()));
    }
    if price.minor() < 0 {
        return Err(ValidationError::new("range").with_message("Price must not be negative".into()));
    }
    Ok(())
}
