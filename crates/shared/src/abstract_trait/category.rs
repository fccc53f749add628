use crate::{
    domain::requests::CreateCategoryRequest, errors::RepositoryError,
    model::Category as CategoryModel,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCategoryRepository = Arc<dyn CategoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryRepositoryTrait {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryModel>, RepositoryError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), RepositoryError>;
}
