use super::ORDER_COLUMNS;
use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateOrderRequest,
    errors::RepositoryError,
    model::{DEFAULT_ORDER_STATUS, Order as OrderModel},
    utils::{generate_order_number, get_uuid, now},
};
use async_trait::async_trait;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order_number = generate_order_number();
        let status = req.status.as_deref().unwrap_or(DEFAULT_ORDER_STATUS);

        let sql = format!(
            r#"
            INSERT INTO orders (id, created_at, updated_at, is_active, is_deleted, customer_id, status, total_amount, order_number)
            VALUES ($1, $2, $2, TRUE, FALSE, $3, $4, $5, $6)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(get_uuid())
            .bind(now())
            .bind(req.customer_id)
            .bind(status)
            .bind(req.total_amount)
            .bind(&order_number)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order for customer {}: {:?}",
                    req.customer_id, err
                );
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created order {} for customer {} (total {})",
            result.order_number, result.customer_id, result.total_amount
        );
        Ok(result)
    }
}
