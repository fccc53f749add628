use crate::{
    abstract_trait::UserRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateUserRequest,
    errors::RepositoryError,
    model::User as UserModel,
    utils::{get_uuid, now},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

const USER_COLUMNS: &str = "id, email, first_name, last_name, is_active, is_staff, date_joined";

#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        req.validate()?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO users (id, email, first_name, last_name, is_active, is_staff, date_joined)
            VALUES ($1, $2, $3, $4, TRUE, FALSE, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, UserModel>(&sql)
            .bind(get_uuid())
            .bind(&req.email)
            .bind(&req.first_name)
            .bind(&req.last_name)
            .bind(now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create user {}: {:?}", req.email, err);
                RepositoryError::from(err)
            })?;

        info!("✅ Created user ID {} ({})", user.id, user.email);
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete user {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted user ID {}", id);
        Ok(())
    }
}
