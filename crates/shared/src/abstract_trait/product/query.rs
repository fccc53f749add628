use crate::{errors::RepositoryError, model::Product as ProductModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
}
