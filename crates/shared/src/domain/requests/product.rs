use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate_price;
use crate::model::Price;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub description: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Price,

    pub category_id: Uuid,
}
