mod category;
mod customer;
mod order;
mod product;
mod user;

pub use self::category::{CategoryRepositoryTrait, DynCategoryRepository};
pub use self::customer::{
    CustomerCommandRepositoryTrait, CustomerQueryRepositoryTrait, DynCustomerCommandRepository,
    DynCustomerQueryRepository,
};
pub use self::order::{
    DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandRepositoryTrait,
    OrderQueryRepositoryTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
    ProductQueryRepositoryTrait,
};
pub use self::user::{DynUserRepository, UserRepositoryTrait};
