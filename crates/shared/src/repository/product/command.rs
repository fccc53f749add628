use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateProductRequest,
    errors::RepositoryError,
    model::Product as ProductModel,
    utils::{get_uuid, now},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO products (id, created_at, updated_at, is_active, is_deleted, name, description, price, category_id)
            VALUES ($1, $2, $2, TRUE, FALSE, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(get_uuid())
            .bind(now())
            .bind(&req.name)
            .bind(&req.description)
            .bind(req.price)
            .bind(req.category_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product '{}': {:?}", req.name, err);
                RepositoryError::from(err)
            })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product ID {}", id);
        Ok(())
    }
}
