use super::CUSTOMER_COLUMNS;
use crate::{
    abstract_trait::CustomerCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateCustomerRequest, UpdateCustomerRequest},
    errors::RepositoryError,
    model::Customer as CustomerModel,
    utils::{get_uuid, now},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct CustomerCommandRepository {
    db: ConnectionPool,
}

impl CustomerCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerCommandRepositoryTrait for CustomerCommandRepository {
    async fn create_customer(
        &self,
        req: &CreateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO customers (id, created_at, updated_at, is_active, is_deleted, name, phonenumber, email, address, user_id)
            VALUES ($1, $2, $2, TRUE, FALSE, $3, $4, $5, $6, $7)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(get_uuid())
            .bind(now())
            .bind(&req.name)
            .bind(&req.phonenumber)
            .bind(req.email.clone().unwrap_or_default())
            .bind(req.address.clone().unwrap_or_default())
            .bind(req.user_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create customer with phone {}: {:?}",
                    req.phonenumber, err
                );
                RepositoryError::from(err)
            })?;

        info!("✅ Created customer ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn update_customer(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE customers
            SET name = $2,
                email = $3,
                address = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(req.id)
            .bind(&req.name)
            .bind(req.email.clone().unwrap_or_default())
            .bind(req.address.clone().unwrap_or_default())
            .bind(now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update customer ID {}: {:?}", req.id, err);
                RepositoryError::from(err)
            })?;

        info!("🔄 Updated customer ID {}", result.id);
        Ok(result)
    }

    async fn trash_customer(&self, id: Uuid) -> Result<CustomerModel, RepositoryError> {
        info!("🗑️ Trashing customer: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE customers
            SET is_deleted = TRUE,
                is_active = FALSE,
                updated_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(id)
            .bind(now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to trash customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(customer)
    }

    async fn restore_customer(&self, id: Uuid) -> Result<CustomerModel, RepositoryError> {
        info!("🔄 Restoring customer: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE customers
            SET is_deleted = FALSE,
                is_active = TRUE,
                updated_at = $2
            WHERE id = $1 AND is_deleted = TRUE
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(id)
            .bind(now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to restore customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(customer)
    }

    async fn delete_permanent(&self, id: Uuid) -> Result<(), RepositoryError> {
        info!("❌ Hard deleting customer: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM customers
            WHERE id = $1 AND is_deleted = TRUE
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete customer {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            error!("❌ Customer {} not found or not trashed", id);
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Customer {} permanently deleted", id);
        Ok(())
    }
}
