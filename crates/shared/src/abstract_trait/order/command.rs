use crate::{
    domain::requests::CreateOrderRequest, errors::RepositoryError, model::Order as OrderModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError>;
}
