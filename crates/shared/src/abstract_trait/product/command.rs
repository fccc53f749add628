use crate::{
    domain::requests::CreateProductRequest, errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError>;
}
