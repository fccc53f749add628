use crate::{errors::RepositoryError, model::Customer as CustomerModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCustomerQueryRepository = Arc<dyn CustomerQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CustomerQueryRepositoryTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerModel>, RepositoryError>;
    async fn find_by_phonenumber(
        &self,
        phonenumber: &str,
    ) -> Result<Option<CustomerModel>, RepositoryError>;
    async fn find_active(&self) -> Result<Vec<CustomerModel>, RepositoryError>;
    async fn find_trashed(&self) -> Result<Vec<CustomerModel>, RepositoryError>;
}
