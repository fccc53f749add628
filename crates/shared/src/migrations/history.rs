//! The recorded path from an empty database to the declared models.
//!
//! Entries are append-only: once a migration has been applied anywhere it
//! must never change. New schema changes get a new entry at the end.

use super::migration::Migration;
use super::operation::Operation;
use crate::schema::{Entity, Field, FieldType, FieldValue, Generator, OnDelete, base_fields};

pub fn all() -> Vec<Migration> {
    vec![
        initial(),
        user_date_joined(),
        customer(),
        category(),
        product(),
        order(),
        alter_product_price(),
        alter_category_name(),
        customer_user(),
        alter_customer_user(),
        order_order_number(),
    ]
}

fn initial() -> Migration {
    Migration::new("0001_initial").operation(Operation::CreateEntity(
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
            .field(
                Field::new("is_active", FieldType::Boolean).default_value(FieldValue::Bool(true)),
            )
            .field(
                Field::new("is_staff", FieldType::Boolean).default_value(FieldValue::Bool(false)),
            ),
    ))
}

fn user_date_joined() -> Migration {
    Migration::new("0002_user_date_joined")
        .depends_on("0001_initial")
        .operation(Operation::add_field(
            "user",
            Field::new("date_joined", FieldType::DateTime).default_generated(Generator::Now),
        ))
}

fn customer() -> Migration {
    Migration::new("0003_customer")
        .depends_on("0002_user_date_joined")
        .operation(Operation::CreateEntity(
            Entity::new("Customer", "customers")
                .fields(base_fields())
                .field(Field::new("name", FieldType::char(256)))
                .field(Field::new("phonenumber", FieldType::char(50)).unique())
                .field(Field::new("email", FieldType::email(254)).blank())
                .field(Field::new("address", FieldType::char(256)).blank())
                .ordering(&["-created_at"]),
        ))
}

fn category() -> Migration {
    Migration::new("0004_category")
        .depends_on("0003_customer")
        .operation(Operation::CreateEntity(
            Entity::new("Category", "categories")
                .fields(base_fields())
                .field(Field::new("name", FieldType::char(100)))
                .field(Field::new("description", FieldType::Text).blank())
                .ordering(&["name"]),
        ))
}

fn product() -> Migration {
    Migration::new("0005_product")
        .depends_on("0004_category")
        .operation(Operation::CreateEntity(
            Entity::new("Product", "products")
                .fields(base_fields())
                .field(Field::new("name", FieldType::char(200)))
                .field(Field::new("description", FieldType::Text))
                .field(Field::new("price", FieldType::decimal(8, 2)))
                .field(Field::new(
                    "category",
                    FieldType::foreign_key("Category", OnDelete::Cascade),
                ))
                .ordering(&["name"])
                .index(&["name"])
                .index(&["category"]),
        ))
}

fn order() -> Migration {
    Migration::new("0006_order")
        .depends_on("0005_product")
        .operation(Operation::CreateEntity(
            Entity::new("Order", "orders")
                .fields(base_fields())
                .field(Field::new(
                    "customer",
                    FieldType::foreign_key("Customer", OnDelete::Cascade),
                ))
                .field(
                    Field::new("status", FieldType::char(20))
                        .default_value(FieldValue::text("pending")),
                )
                .field(Field::new("total_amount", FieldType::decimal(10, 2)))
                .ordering(&["-created_at"]),
        ))
}

fn alter_product_price() -> Migration {
    Migration::new("0007_alter_product_price")
        .depends_on("0006_order")
        .operation(Operation::alter_field(
            "product",
            Field::new("price", FieldType::decimal(10, 2)),
        ))
}

fn alter_category_name() -> Migration {
    Migration::new("0008_alter_category_name")
        .depends_on("0007_alter_product_price")
        .operation(Operation::alter_field(
            "category",
            Field::new("name", FieldType::char(100)).unique(),
        ))
}

fn customer_user() -> Migration {
    Migration::new("0009_customer_user")
        .depends_on("0008_alter_category_name")
        .operation(Operation::add_field(
            "customer",
            Field::new("user", FieldType::foreign_key("User", OnDelete::SetNull))
                .null()
                .blank(),
        ))
}

fn alter_customer_user() -> Migration {
    Migration::new("0010_alter_customer_user")
        .depends_on("0009_customer_user")
        .operation(Operation::alter_field(
            "customer",
            Field::new("user", FieldType::one_to_one("User", OnDelete::Cascade))
                .null()
                .blank()
                .related_name("customer"),
        ))
}

fn order_order_number() -> Migration {
    Migration::new("0011_order_order_number")
        .depends_on("0010_alter_customer_user")
        .operation(Operation::add_field(
            "order",
            Field::new("order_number", FieldType::char(20))
                .default_generated(Generator::OrderNumber),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::MigrationGraph;
    use crate::schema::{ProjectState, models};

    #[test]
    fn history_forms_a_single_chain() {
        let graph = MigrationGraph::new(all()).unwrap();
        let order: Vec<&str> = graph.ordered().map(|m| m.name.as_str()).collect();

        assert_eq!(order.len(), 11);
        assert_eq!(order.first(), Some(&"0001_initial"));
        assert_eq!(order.last(), Some(&"0011_order_order_number"));
        for pair in graph.ordered().collect::<Vec<_>>().windows(2) {
            assert_eq!(pair[1].dependencies, vec![pair[0].name.clone()]);
        }
    }

    #[test]
    fn replayed_history_matches_model_declarations() {
        let graph = MigrationGraph::new(all()).unwrap();
        let replayed = graph.project_state().unwrap();
        let declared = ProjectState::from_entities(models::all());

        assert_eq!(replayed.diff(&declared), Vec::<String>::new());
        assert_eq!(replayed, declared);
    }

    #[test]
    fn order_number_is_not_unique() {
        let order = models::order();
        let field = order.get_field("order_number").unwrap();
        assert!(!field.is_unique());
        assert_eq!(field.kind.max_length(), Some(20));
    }
}
