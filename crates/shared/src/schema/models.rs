//! Target schema: what the tables look like once every migration is applied.

use super::entity::{Entity, base_fields};
use super::field::{Field, FieldType, FieldValue, Generator, OnDelete};

pub fn user() -> Entity {
    Entity::new("User", "users")
        .field(
            Field::new("id", FieldType::Uuid)
                .primary_key()
                .not_editable()
                .default_generated(Generator::Uuid),
        )
        .field(Field::new("email", FieldType::email(254)).unique())
        .field(Field::new("first_name", FieldType::char(150)).blank())
        .field(Field::new("last_name", FieldType::char(150)).blank())
        .field(Field::new("is_active", FieldType::Boolean).default_value(FieldValue::Bool(true)))
        .field(Field::new("is_staff", FieldType::Boolean).default_value(FieldValue::Bool(false)))
        .field(Field::new("date_joined", FieldType::DateTime).default_generated(Generator::Now))
}

pub fn customer() -> Entity {
    Entity::new("Customer", "customers")
        .fields(base_fields())
        .field(Field::new("name", FieldType::char(256)))
        .field(Field::new("phonenumber", FieldType::char(50)).unique())
        .field(Field::new("email", FieldType::email(254)).blank())
        .field(Field::new("address", FieldType::char(256)).blank())
        .field(
            Field::new("user", FieldType::one_to_one("User", OnDelete::Cascade))
                .null()
                .blank()
                .related_name("customer"),
        )
        .ordering(&["-created_at"])
}

pub fn category() -> Entity {
    Entity::new("Category", "categories")
        .fields(base_fields())
        .field(Field::new("name", FieldType::char(100)).unique())
        .field(Field::new("description", FieldType::Text).blank())
        .ordering(&["name"])
}

pub fn product() -> Entity {
    Entity::new("Product", "products")
        .fields(base_fields())
        .field(Field::new("name", FieldType::char(200)))
        .field(Field::new("description", FieldType::Text))
        .field(Field::new("price", FieldType::decimal(10, 2)))
        .field(Field::new(
            "category",
            FieldType::foreign_key("Category", OnDelete::Cascade),
        ))
        .ordering(&["name"])
        .index(&["name"])
        .index(&["category"])
}

pub fn order() -> Entity {
    Entity::new("Order", "orders")
        .fields(base_fields())
        .field(Field::new(
            "customer",
            FieldType::foreign_key("Customer", OnDelete::Cascade),
        ))
        .field(Field::new("status", FieldType::char(20)).default_value(FieldValue::text("pending")))
        .field(Field::new("total_amount", FieldType::decimal(10, 2)))
        .field(
            Field::new("order_number", FieldType::char(20))
                .default_generated(Generator::OrderNumber),
        )
        .ordering(&["-created_at"])
}

pub fn all() -> Vec<Entity> {
    vec![user(), customer(), category(), product(), order()]
}
