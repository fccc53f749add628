use crate::{
    domain::requests::{CreateCustomerRequest, UpdateCustomerRequest},
    errors::RepositoryError,
    model::Customer as CustomerModel,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCustomerCommandRepository = Arc<dyn CustomerCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CustomerCommandRepositoryTrait {
    async fn create_customer(
        &self,
        req: &CreateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError>;
    async fn update_customer(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError>;
    async fn trash_customer(&self, id: Uuid) -> Result<CustomerModel, RepositoryError>;
    async fn restore_customer(&self, id: Uuid) -> Result<CustomerModel, RepositoryError>;
    async fn delete_permanent(&self, id: Uuid) -> Result<(), RepositoryError>;
}
