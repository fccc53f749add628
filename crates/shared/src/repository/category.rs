use crate::{
    abstract_trait::CategoryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateCategoryRequest,
    errors::RepositoryError,
    model::Category as CategoryModel,
    utils::{get_uuid, now},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

const CATEGORY_COLUMNS: &str =
    "id, created_at, updated_at, is_active, is_deleted, name, description";

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO categories (id, created_at, updated_at, is_active, is_deleted, name, description)
            VALUES ($1, $2, $2, TRUE, FALSE, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "#
        );

        let category = sqlx::query_as::<_, CategoryModel>(&sql)
            .bind(get_uuid())
            .bind(now())
            .bind(&req.name)
            .bind(&req.description)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create category '{}': {:?}", req.name, err);
                RepositoryError::from(err)
            })?;

        info!("✅ Created category ID {} ({})", category.id, category.name);
        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

        sqlx::query_as::<_, CategoryModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch category {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete category {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted category ID {}", id);
        Ok(())
    }
}
