use crate::{domain::requests::CreateUserRequest, errors::RepositoryError, model::User as UserModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError>;
}
