use super::CUSTOMER_COLUMNS;
use crate::{
    abstract_trait::CustomerQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::Customer as CustomerModel, schema::models,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CustomerQueryRepository {
    db: ConnectionPool,
    order_by: String,
}

impl CustomerQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self {
            db,
            order_by: models::customer().order_by(),
        }
    }

    async fn find_where_deleted(
        &self,
        is_deleted: bool,
    ) -> Result<Vec<CustomerModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE is_deleted = $1 ORDER BY {}",
            self.order_by
        );

        let rows = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(is_deleted)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customers: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(rows)
    }
}

#[async_trait]
impl CustomerQueryRepositoryTrait for CustomerQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerModel>, RepositoryError> {
        info!("🆔 Fetching customer by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(customer)
    }

    async fn find_by_phonenumber(
        &self,
        phonenumber: &str,
    ) -> Result<Option<CustomerModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE phonenumber = $1");

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(phonenumber)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customer by phone {}: {:?}", phonenumber, e);
                RepositoryError::from(e)
            })?;

        Ok(customer)
    }

    async fn find_active(&self) -> Result<Vec<CustomerModel>, RepositoryError> {
        info!("🔍 Fetching active customers");
        self.find_where_deleted(false).await
    }

    async fn find_trashed(&self) -> Result<Vec<CustomerModel>, RepositoryError> {
        info!("🗑️ Fetching trashed customers");
        self.find_where_deleted(true).await
    }
}
