use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Phone number must be 1-50 characters"))]
    pub phonenumber: String,

    #[validate(email(message = "Invalid email format"), length(max = 254))]
    pub email: Option<String>,

    #[validate(length(max = 256))]
    pub address: Option<String>,

    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    pub id: Uuid,

    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"), length(max = 254))]
    pub email: Option<String>,

    #[validate(length(max = 256))]
    pub address: Option<String>,
}
