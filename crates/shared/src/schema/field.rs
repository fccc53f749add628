use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::utils::{generate_order_number, get_uuid, now};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl OnDelete {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Uuid,
    DateTime,
    Boolean,
    Char { max_length: u32 },
    Email { max_length: u32 },
    Text,
    /// Stored as an integer count of minor units (`value * 10^decimal_places`).
    Decimal { max_digits: u32, decimal_places: u32 },
    ForeignKey { to: String, on_delete: OnDelete },
    OneToOne { to: String, on_delete: OnDelete },
}

impl FieldType {
    pub fn char(max_length: u32) -> Self {
        FieldType::Char { max_length }
    }

    pub fn email(max_length: u32) -> Self {
        FieldType::Email { max_length }
    }

    pub fn decimal(max_digits: u32, decimal_places: u32) -> Self {
        FieldType::Decimal {
            max_digits,
            decimal_places,
        }
    }

    pub fn foreign_key(to: &str, on_delete: OnDelete) -> Self {
        FieldType::ForeignKey {
            to: to.to_string(),
            on_delete,
        }
    }

    pub fn one_to_one(to: &str, on_delete: OnDelete) -> Self {
        FieldType::OneToOne {
            to: to.to_string(),
            on_delete,
        }
    }

    pub fn related_entity(&self) -> Option<&str> {
        match self {
            FieldType::ForeignKey { to, .. } | FieldType::OneToOne { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn on_delete(&self) -> Option<OnDelete> {
        match self {
            FieldType::ForeignKey { on_delete, .. } | FieldType::OneToOne { on_delete, .. } => {
                Some(*on_delete)
            }
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.related_entity().is_some()
    }

    pub fn max_length(&self) -> Option<u32> {
        match self {
            FieldType::Char { max_length } | FieldType::Email { max_length } => Some(*max_length),
            _ => None,
        }
    }
}

/// Named default-value functions a field can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Uuid,
    OrderNumber,
    Now,
}

impl Generator {
    pub fn generate(&self) -> FieldValue {
        match self {
            Generator::Uuid => FieldValue::Uuid(get_uuid()),
            Generator::OrderNumber => FieldValue::Text(generate_order_number()),
            Generator::Now => FieldValue::DateTime(now()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Generator::Uuid => "get_uuid",
            Generator::OrderNumber => "generate_order_number",
            Generator::Now => "now",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Uuid(Uuid),
    Bool(bool),
    Integer(i64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    /// SQL literal used when printing statements; execution always binds.
    pub fn to_sql_literal(&self) -> String {
        match self {
            FieldValue::Uuid(id) => format!("X'{}'", id.simple()),
            FieldValue::Bool(flag) => i32::from(*flag).to_string(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            FieldValue::DateTime(ts) => format!("'{}'", ts.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    Value(FieldValue),
    Generated(Generator),
}

impl FieldDefault {
    pub fn resolve(&self) -> FieldValue {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Generated(generator) => generator.generate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldType,
    pub primary_key: bool,
    pub unique: bool,
    pub null: bool,
    pub blank: bool,
    pub editable: bool,
    pub default: Option<FieldDefault>,
    pub auto_now: bool,
    pub auto_now_add: bool,
    pub related_name: Option<String>,
}

impl Field {
    pub fn new(name: &str, kind: FieldType) -> Self {
        Self {
            name: name.to_string(),
            kind,
            primary_key: false,
            unique: false,
            null: false,
            blank: false,
            editable: true,
            default: None,
            auto_now: false,
            auto_now_add: false,
            related_name: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn null(mut self) -> Self {
        self.null = true;
        self
    }

    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn not_editable(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn default_value(mut self, value: FieldValue) -> Self {
        self.default = Some(FieldDefault::Value(value));
        self
    }

    pub fn default_generated(mut self, generator: Generator) -> Self {
        self.default = Some(FieldDefault::Generated(generator));
        self
    }

    pub fn auto_now(mut self) -> Self {
        self.auto_now = true;
        self
    }

    pub fn auto_now_add(mut self) -> Self {
        self.auto_now_add = true;
        self
    }

    pub fn related_name(mut self, name: &str) -> Self {
        self.related_name = Some(name.to_string());
        self
    }

    /// Relations live in `<name>_id`.
    pub fn column(&self) -> String {
        if self.kind.is_relation() {
            format!("{}_id", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn is_unique(&self) -> bool {
        self.unique || self.primary_key || matches!(self.kind, FieldType::OneToOne { .. })
    }

    /// Can be added with a bare `ALTER TABLE ... ADD COLUMN`.
    pub fn is_simple_addition(&self) -> bool {
        self.null && self.default.is_none() && !self.is_unique() && !self.kind.is_relation()
    }
}
