use std::collections::BTreeMap;

use super::entity::Entity;
use crate::errors::MigrationError;
use crate::migrations::Operation;

/// In-memory picture of the schema at some point in the migration history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    entities: BTreeMap<String, Entity>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            entities: entities.into_iter().map(|e| (e.key(), e)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(&name.to_lowercase())
    }

    pub fn entity(&self, name: &str) -> Result<&Entity, MigrationError> {
        self.get(name)
            .ok_or_else(|| MigrationError::UnknownEntity(name.to_string()))
    }

    pub fn apply(&mut self, operation: &Operation) -> Result<(), MigrationError> {
        match operation {
            Operation::CreateEntity(entity) => {
                let key = entity.key();
                if self.entities.contains_key(&key) {
                    return Err(MigrationError::DuplicateEntity(entity.name.clone()));
                }
                self.entities.insert(key, entity.clone());
            }
            Operation::AddField { entity, field } => {
                let target = self.entity_mut(entity)?;
                if target.get_field(&field.name).is_some() {
                    return Err(MigrationError::DuplicateField {
                        entity: entity.clone(),
                        field: field.name.clone(),
                    });
                }
                target.fields.push(field.clone());
            }
            Operation::AlterField { entity, field } => {
                let target = self.entity_mut(entity)?;
                let slot = target
                    .fields
                    .iter_mut()
                    .find(|f| f.name == field.name)
                    .ok_or_else(|| MigrationError::UnknownField {
                        entity: entity.clone(),
                        field: field.name.clone(),
                    })?;
                *slot = field.clone();
            }
        }
        Ok(())
    }

    /// Changes needed to turn `self` into `target`, one line each.
    pub fn diff(&self, target: &ProjectState) -> Vec<String> {
        let mut changes = Vec::new();

        for (key, wanted) in &target.entities {
            let Some(current) = self.entities.get(key) else {
                changes.push(format!("Create model {}", wanted.name));
                continue;
            };

            if current.db_table != wanted.db_table {
                changes.push(format!(
                    "Rename table for {} to {}",
                    wanted.name, wanted.db_table
                ));
            }

            for field in &wanted.fields {
                match current.get_field(&field.name) {
                    None => changes.push(format!("Add field {} to {}", field.name, key)),
                    Some(existing) if existing != field => {
                        changes.push(format!("Alter field {} on {}", field.name, key))
                    }
                    Some(_) => {}
                }
            }

            for field in &current.fields {
                if wanted.get_field(&field.name).is_none() {
                    changes.push(format!("Remove field {} from {}", field.name, key));
                }
            }

            if current.options != wanted.options {
                changes.push(format!("Change Meta options on {key}"));
            }
        }

        for (key, current) in &self.entities {
            if !target.entities.contains_key(key) {
                changes.push(format!("Delete model {}", current.name));
            }
        }

        changes
    }

    fn entity_mut(&mut self, name: &str) -> Result<&mut Entity, MigrationError> {
        self.entities
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| MigrationError::UnknownEntity(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType, base_fields};

    fn shop() -> Entity {
        Entity::new("Shop", "shops")
            .fields(base_fields())
            .field(Field::new("name", FieldType::char(50)))
    }

    #[test]
    fn create_then_add_and_alter() {
        let mut state = ProjectState::new();
        state.apply(&Operation::CreateEntity(shop())).unwrap();
        state
            .apply(&Operation::AddField {
                entity: "shop".into(),
                field: Field::new("motto", FieldType::Text).blank(),
            })
            .unwrap();
        state
            .apply(&Operation::AlterField {
                entity: "Shop".into(),
                field: Field::new("name", FieldType::char(80)),
            })
            .unwrap();

        let shop = state.entity("SHOP").unwrap();
        assert_eq!(shop.fields.len(), 7);
        assert_eq!(
            shop.get_field("name").unwrap().kind,
            FieldType::Char { max_length: 80 }
        );
    }

    #[test]
    fn rejects_duplicates_and_unknowns() {
        let mut state = ProjectState::from_entities([shop()]);

        assert!(matches!(
            state.apply(&Operation::CreateEntity(shop())),
            Err(MigrationError::DuplicateEntity(_))
        ));
        assert!(matches!(
            state.apply(&Operation::AddField {
                entity: "shop".into(),
                field: Field::new("name", FieldType::Text),
            }),
            Err(MigrationError::DuplicateField { .. })
        ));
        assert!(matches!(
            state.apply(&Operation::AlterField {
                entity: "shop".into(),
                field: Field::new("missing", FieldType::Text),
            }),
            Err(MigrationError::UnknownField { .. })
        ));
        assert!(matches!(
            state.apply(&Operation::AddField {
                entity: "warehouse".into(),
                field: Field::new("name", FieldType::Text),
            }),
            Err(MigrationError::UnknownEntity(_))
        ));
    }

    #[test]
    fn diff_reports_each_kind_of_drift() {
        let current = ProjectState::from_entities([shop()]);
        let wanted = ProjectState::from_entities([
            shop()
                .field(Field::new("motto", FieldType::Text))
                .ordering(&["name"]),
            Entity::new("Till", "tills").fields(base_fields()),
        ]);

        let changes = current.diff(&wanted);
        assert!(changes.contains(&"Add field motto to shop".to_string()));
        assert!(changes.contains(&"Change Meta options on shop".to_string()));
        assert!(changes.contains(&"Create model Till".to_string()));
        assert!(wanted.diff(&wanted).is_empty());
    }
}
