use crate::schema::{Entity, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateEntity(Entity),
    AddField { entity: String, field: Field },
    AlterField { entity: String, field: Field },
}

impl Operation {
    pub fn add_field(entity: &str, field: Field) -> Self {
        Operation::AddField {
            entity: entity.to_string(),
            field,
        }
    }

    pub fn alter_field(entity: &str, field: Field) -> Self {
        Operation::AlterField {
            entity: entity.to_string(),
            field,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Operation::CreateEntity(entity) => format!("Create model {}", entity.name),
            Operation::AddField { entity, field } => {
                format!("Add field {} to {}", field.name, entity.to_lowercase())
            }
            Operation::AlterField { entity, field } => {
                format!("Alter field {} on {}", field.name, entity.to_lowercase())
            }
        }
    }
}
