use super::field::{Field, FieldType, FieldValue, Generator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
}

impl Index {
    pub fn new(db_table: &str, fields: &[&str]) -> Self {
        Self {
            name: format!("{}_{}_idx", db_table, fields.join("_")),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityOptions {
    /// Field names; a leading `-` means descending.
    pub ordering: Vec<String>,
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub db_table: String,
    pub fields: Vec<Field>,
    pub options: EntityOptions,
}

impl Entity {
    pub fn new(name: &str, db_table: &str) -> Self {
        Self {
            name: name.to_string(),
            db_table: db_table.to_string(),
            fields: Vec::new(),
            options: EntityOptions::default(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn ordering(mut self, ordering: &[&str]) -> Self {
        self.options.ordering = ordering.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn index(mut self, fields: &[&str]) -> Self {
        let index = Index::new(&self.db_table, fields);
        self.options.indexes.push(index);
        self
    }

    /// Case-insensitive lookup key, the way migrations refer to entities.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.primary_key)
    }

    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(Field::column).collect()
    }

    /// Body of the default `ORDER BY` clause, empty when unordered.
    pub fn order_by(&self) -> String {
        self.options
            .ordering
            .iter()
            .filter_map(|entry| {
                let (name, descending) = match entry.strip_prefix('-') {
                    Some(name) => (name, true),
                    None => (entry.as_str(), false),
                };
                let column = self.get_field(name)?.column();
                Some(if descending {
                    format!("\"{column}\" DESC")
                } else {
                    format!("\"{column}\" ASC")
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Columns every soft-deletable entity carries.
pub fn base_fields() -> Vec<Field> {
    vec![
        Field::new("id", FieldType::Uuid)
            .primary_key()
            .not_editable()
            .default_generated(Generator::Uuid),
        Field::new("created_at", FieldType::DateTime).auto_now_add(),
        Field::new("updated_at", FieldType::DateTime).auto_now(),
        Field::new("is_active", FieldType::Boolean).default_value(FieldValue::Bool(true)),
        Field::new("is_deleted", FieldType::Boolean).default_value(FieldValue::Bool(false)),
    ]
}
