use crate::{errors::RepositoryError, model::Order as OrderModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OrderModel>, RepositoryError>;
}
