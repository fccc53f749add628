use shared::{
    abstract_trait::{
        CategoryRepositoryTrait, CustomerCommandRepositoryTrait, CustomerQueryRepositoryTrait,
        OrderCommandRepositoryTrait, OrderQueryRepositoryTrait, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait, UserRepositoryTrait,
    },
    config::{ConnectionManager, ConnectionPool},
    domain::requests::{
        CreateCategoryRequest, CreateCustomerRequest, CreateOrderRequest, CreateProductRequest,
        CreateUserRequest, UpdateCustomerRequest,
    },
    errors::RepositoryError,
    migrations::MigrationExecutor,
    model::{Category, Customer, DEFAULT_ORDER_STATUS, Price},
    repository::{
        CategoryRepository, CustomerCommandRepository, CustomerQueryRepository,
        OrderCommandRepository, OrderQueryRepository, ProductCommandRepository,
        ProductQueryRepository, UserRepository,
    },
    utils::{ORDER_NUMBER_LENGTH, get_uuid},
};

async fn migrated_pool() -> ConnectionPool {
    let pool = ConnectionManager::in_memory().await.unwrap();
    MigrationExecutor::from_history(pool.clone())
        .unwrap()
        .migrate(None)
        .await
        .unwrap();
    pool
}

fn customer_request(phonenumber: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        name: "Ada Lovelace".to_string(),
        phonenumber: phonenumber.to_string(),
        email: Some("ada@example.com".to_string()),
        address: None,
        user_id: None,
    }
}

async fn create_customer(pool: &ConnectionPool, phonenumber: &str) -> Customer {
    CustomerCommandRepository::new(pool.clone())
        .create_customer(&customer_request(phonenumber))
        .await
        .unwrap()
}

async fn create_category(pool: &ConnectionPool, name: &str) -> Category {
    CategoryRepository::new(pool.clone())
        .create_category(&CreateCategoryRequest {
            name: name.to_string(),
            description: String::new(),
        })
        .await
        .unwrap()
}

async fn count_customers(pool: &ConnectionPool) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM customers")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn create_customer_sets_base_fields() {
    let pool = migrated_pool().await;

    let customer = create_customer(&pool, "+15551234").await;

    assert!(customer.is_active);
    assert!(!customer.is_deleted);
    assert_eq!(customer.created_at, customer.updated_at);
    assert_eq!(customer.email, "ada@example.com");
    assert_eq!(customer.address, "");
    assert_eq!(customer.user_id, None);
}

#[tokio::test]
async fn duplicate_phonenumber_is_rejected() {
    let pool = migrated_pool().await;
    let repo = CustomerCommandRepository::new(pool.clone());

    repo.create_customer(&customer_request("+15550000"))
        .await
        .unwrap();
    let err = repo
        .create_customer(&customer_request("+15550000"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::AlreadyExists(_)), "{err:?}");
    assert_eq!(count_customers(&pool).await, 1);
}

#[tokio::test]
async fn invalid_request_fails_validation_before_write() {
    let pool = migrated_pool().await;
    let repo = CustomerCommandRepository::new(pool.clone());

    let mut req = customer_request("x".repeat(51).as_str());
    req.email = Some("not-an-email".to_string());

    match repo.create_customer(&req).await {
        Err(RepositoryError::Validation(messages)) => {
            assert!(messages.iter().any(|m| m.starts_with("phonenumber")));
            assert!(messages.iter().any(|m| m.starts_with("email")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(count_customers(&pool).await, 0);
}

#[tokio::test]
async fn update_customer_refreshes_updated_at() {
    let pool = migrated_pool().await;
    let repo = CustomerCommandRepository::new(pool.clone());
    let customer = create_customer(&pool, "+15550001").await;

    let updated = repo
        .update_customer(&UpdateCustomerRequest {
            id: customer.id,
            name: "Ada King".to_string(),
            email: None,
            address: Some("12 St James's Square".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.address, "12 St James's Square");
    assert_eq!(updated.created_at, customer.created_at);
    assert!(updated.updated_at >= customer.updated_at);
}

#[tokio::test]
async fn trash_keeps_the_row() {
    let pool = migrated_pool().await;
    let command = CustomerCommandRepository::new(pool.clone());
    let query = CustomerQueryRepository::new(pool.clone());
    let customer = create_customer(&pool, "+15550002").await;

    let trashed = command.trash_customer(customer.id).await.unwrap();
    assert!(trashed.is_deleted);
    assert!(!trashed.is_active);

    let found = query.find_by_id(customer.id).await.unwrap().unwrap();
    assert!(found.is_deleted);
    assert_eq!(count_customers(&pool).await, 1);

    assert!(query.find_active().await.unwrap().is_empty());
    assert_eq!(query.find_trashed().await.unwrap().len(), 1);

    // a trashed phone number is still taken
    let err = command
        .create_customer(&customer_request("+15550002"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(_)));

    // trashing twice finds nothing to trash
    assert!(matches!(
        command.trash_customer(customer.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn restore_and_delete_permanent() {
    let pool = migrated_pool().await;
    let command = CustomerCommandRepository::new(pool.clone());
    let query = CustomerQueryRepository::new(pool.clone());
    let customer = create_customer(&pool, "+15550003").await;

    // only trashed rows can be removed
    assert!(matches!(
        command.delete_permanent(customer.id).await,
        Err(RepositoryError::NotFound)
    ));

    command.trash_customer(customer.id).await.unwrap();
    let restored = command.restore_customer(customer.id).await.unwrap();
    assert!(restored.is_active);
    assert!(!restored.is_deleted);

    command.trash_customer(customer.id).await.unwrap();
    command.delete_permanent(customer.id).await.unwrap();

    assert!(query.find_by_id(customer.id).await.unwrap().is_none());
    assert_eq!(count_customers(&pool).await, 0);
}

#[tokio::test]
async fn find_by_phonenumber() {
    let pool = migrated_pool().await;
    let query = CustomerQueryRepository::new(pool.clone());
    let customer = create_customer(&pool, "+15550004").await;

    let found = query.find_by_phonenumber("+15550004").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(customer.id));
    assert!(query.find_by_phonenumber("+0").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_user_cascades_to_customer() {
    let pool = migrated_pool().await;
    let users = UserRepository::new(pool.clone());
    let customers = CustomerCommandRepository::new(pool.clone());

    let user = users
        .create_user(&CreateUserRequest {
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        })
        .await
        .unwrap();
    assert!(user.is_active);
    assert!(!user.is_staff);

    let mut req = customer_request("+15550005");
    req.user_id = Some(user.id);
    let customer = customers.create_customer(&req).await.unwrap();
    assert_eq!(customer.user_id, Some(user.id));

    // one customer per user
    let mut second = customer_request("+15550006");
    second.user_id = Some(user.id);
    assert!(matches!(
        customers.create_customer(&second).await,
        Err(RepositoryError::AlreadyExists(_))
    ));

    users.delete_user(user.id).await.unwrap();

    assert!(users.find_by_id(user.id).await.unwrap().is_none());
    assert_eq!(count_customers(&pool).await, 0);
}

#[tokio::test]
async fn customer_with_unknown_user_is_rejected() {
    let pool = migrated_pool().await;
    let mut req = customer_request("+15550007");
    req.user_id = Some(get_uuid());

    let err = CustomerCommandRepository::new(pool)
        .create_customer(&req)
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ForeignKey(_)), "{err:?}");
}

#[tokio::test]
async fn products_are_listed_alphabetically() {
    let pool = migrated_pool().await;
    let category = create_category(&pool, "Books").await;
    let command = ProductCommandRepository::new(pool.clone());
    let query = ProductQueryRepository::new(pool.clone());

    for name in ["Zen", "Anathem", "Middlemarch"] {
        command
            .create_product(&CreateProductRequest {
                name: name.to_string(),
                description: format!("{name} paperback"),
                price: "12.50".parse().unwrap(),
                category_id: category.id,
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = query
        .find_by_category(category.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Anathem", "Middlemarch", "Zen"]);
}

#[tokio::test]
async fn deleting_category_cascades_to_products() {
    let pool = migrated_pool().await;
    let category = create_category(&pool, "Games").await;
    let command = ProductCommandRepository::new(pool.clone());
    let query = ProductQueryRepository::new(pool.clone());

    let product = command
        .create_product(&CreateProductRequest {
            name: "Chess set".to_string(),
            description: String::new(),
            price: Price::from_minor(4999),
            category_id: category.id,
        })
        .await
        .unwrap();
    assert_eq!(product.price.to_string(), "49.99");

    CategoryRepository::new(pool.clone())
        .delete_category(category.id)
        .await
        .unwrap();

    assert!(query.find_by_id(product.id).await.unwrap().is_none());
}

#[tokio::test]
async fn category_names_are_unique() {
    let pool = migrated_pool().await;
    create_category(&pool, "Music").await;

    let err = CategoryRepository::new(pool)
        .create_category(&CreateCategoryRequest {
            name: "Music".to_string(),
            description: "again".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::AlreadyExists(_)));
}

#[tokio::test]
async fn oversized_price_is_rejected() {
    let pool = migrated_pool().await;
    let category = create_category(&pool, "Jewellery").await;

    let err = ProductCommandRepository::new(pool)
        .create_product(&CreateProductRequest {
            name: "Crown".to_string(),
            description: String::new(),
            price: "100000000.00".parse().unwrap(),
            category_id: category.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Validation(_)));
}

#[tokio::test]
async fn new_order_gets_order_number_and_default_status() {
    let pool = migrated_pool().await;
    let customer = create_customer(&pool, "+15550008").await;
    let command = OrderCommandRepository::new(pool.clone());
    let query = OrderQueryRepository::new(pool.clone());

    let order = command
        .create_order(&CreateOrderRequest {
            customer_id: customer.id,
            total_amount: "25.00".parse().unwrap(),
            status: None,
        })
        .await
        .unwrap();

    assert_eq!(order.order_number.len(), ORDER_NUMBER_LENGTH);
    assert_eq!(order.status, DEFAULT_ORDER_STATUS);
    assert_eq!(order.total_amount.minor(), 2500);

    let by_number = query.find_by_order_number(&order.order_number).await.unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, order.id);

    let shipped = command
        .create_order(&CreateOrderRequest {
            customer_id: customer.id,
            total_amount: Price::from_minor(100),
            status: Some("shipped".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(shipped.status, "shipped");
    assert_ne!(shipped.order_number, order.order_number);

    let orders = query.find_by_customer(customer.id).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(query.find_by_id(order.id).await.unwrap().is_some());
}

#[tokio::test]
async fn order_for_unknown_customer_is_rejected() {
    let pool = migrated_pool().await;

    let err = OrderCommandRepository::new(pool)
        .create_order(&CreateOrderRequest {
            customer_id: get_uuid(),
            total_amount: Price::from_minor(100),
            status: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ForeignKey(_)), "{err:?}");
}
