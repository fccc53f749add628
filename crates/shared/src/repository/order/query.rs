use super::ORDER_COLUMNS;
use crate::{
    abstract_trait::OrderQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Order as OrderModel, schema::models,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
    order_by: String,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self {
            db,
            order_by: models::order().order_by(),
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        let order = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(order)
    }

    // order_number is not unique, so several rows may share one.
    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1 ORDER BY {}",
            self.order_by
        );

        let orders = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(order_number)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {}: {:?}", order_number, e);
                RepositoryError::from(e)
            })?;

        Ok(orders)
    }

    async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("🔍 Fetching orders for customer {}", customer_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY {}",
            self.order_by
        );

        let orders = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(customer_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch orders: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(orders)
    }
}
