use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::price::Price;

pub const DEFAULT_ORDER_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub customer_id: Uuid,
    pub status: String,
    pub total_amount: Price,
    pub order_number: String,
}
