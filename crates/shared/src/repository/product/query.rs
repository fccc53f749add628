use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::ProductQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::Product as ProductModel, schema::models,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
    order_by: String,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self {
            db,
            order_by: models::product().order_by(),
        }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(product)
    }

    async fn find_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching products for category {}", category_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY {}",
            self.order_by
        );

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(category_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(products)
    }
}
