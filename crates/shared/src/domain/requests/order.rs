use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate_price;
use crate::model::Price;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,

    #[validate(custom(function = "validate_price"))]
    pub total_amount: Price,

    #[validate(length(min = 1, max = 20, message = "Status must be 1-20 characters"))]
    pub status: Option<String>,
}
