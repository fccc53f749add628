//! SQLite DDL rendering for schema declarations.

use super::entity::{Entity, Index};
use super::field::{Field, FieldType};
use super::state::ProjectState;
use crate::errors::MigrationError;

pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn base_type(kind: &FieldType) -> String {
    match kind {
        FieldType::Uuid => "uuid".to_string(),
        FieldType::DateTime => "datetime".to_string(),
        FieldType::Boolean => "bool".to_string(),
        FieldType::Char { max_length } | FieldType::Email { max_length } => {
            format!("varchar({max_length})")
        }
        FieldType::Text => "text".to_string(),
        FieldType::Decimal { .. } => "integer".to_string(),
        FieldType::ForeignKey { .. } | FieldType::OneToOne { .. } => "uuid".to_string(),
    }
}

fn check_constraint(field: &Field) -> Option<String> {
    let column = quote(&field.column());
    match &field.kind {
        FieldType::Char { max_length } | FieldType::Email { max_length } => {
            Some(format!("CHECK (length({column}) <= {max_length})"))
        }
        FieldType::Decimal { max_digits, .. } => Some(format!(
            "CHECK (abs({column}) < {})",
            10_i64.pow(*max_digits)
        )),
        FieldType::Boolean => Some(format!("CHECK ({column} IN (0, 1))")),
        _ => None,
    }
}

/// Column type as declared in the table, following relations to the
/// target's primary key.
pub fn column_type(field: &Field, state: &ProjectState) -> Result<String, MigrationError> {
    match field.kind.related_entity() {
        Some(to) => {
            let target = state.entity(to)?;
            let pk = target
                .primary_key()
                .ok_or_else(|| MigrationError::MissingPrimaryKey(target.name.clone()))?;
            Ok(base_type(&pk.kind))
        }
        None => Ok(base_type(&field.kind)),
    }
}

pub fn column_definition(field: &Field, state: &ProjectState) -> Result<String, MigrationError> {
    let mut parts = vec![quote(&field.column()), column_type(field, state)?];

    parts.push(if field.null { "NULL" } else { "NOT NULL" }.to_string());

    if field.primary_key {
        parts.push("PRIMARY KEY".to_string());
    } else if field.is_unique() {
        parts.push("UNIQUE".to_string());
    }

    if let Some(check) = check_constraint(field) {
        parts.push(check);
    }

    if let (Some(to), Some(on_delete)) = (field.kind.related_entity(), field.kind.on_delete()) {
        let target = state.entity(to)?;
        let pk = target
            .primary_key()
            .ok_or_else(|| MigrationError::MissingPrimaryKey(target.name.clone()))?;
        parts.push(format!(
            "REFERENCES {} ({}) ON DELETE {}",
            quote(&target.db_table),
            quote(&pk.column()),
            on_delete.as_sql()
        ));
    }

    Ok(parts.join(" "))
}

pub fn create_table(
    entity: &Entity,
    table: &str,
    state: &ProjectState,
) -> Result<String, MigrationError> {
    let columns = entity
        .fields
        .iter()
        .map(|field| column_definition(field, state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "CREATE TABLE {} ({})",
        quote(table),
        columns.join(", ")
    ))
}

pub fn create_index(entity: &Entity, index: &Index) -> Result<String, MigrationError> {
    let columns = index
        .fields
        .iter()
        .map(|name| {
            entity
                .get_field(name)
                .map(|f| quote(&f.column()))
                .ok_or_else(|| MigrationError::UnknownField {
                    entity: entity.name.clone(),
                    field: name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "CREATE INDEX {} ON {} ({})",
        quote(&index.name),
        quote(&entity.db_table),
        columns.join(", ")
    ))
}

pub fn add_column(
    entity: &Entity,
    field: &Field,
    state: &ProjectState,
) -> Result<String, MigrationError> {
    Ok(format!(
        "ALTER TABLE {} ADD COLUMN {}",
        quote(&entity.db_table),
        column_definition(field, state)?
    ))
}

/// Nullable, unconstrained column used as a staging slot before a rebuild.
pub fn add_loose_column(
    entity: &Entity,
    field: &Field,
    state: &ProjectState,
) -> Result<String, MigrationError> {
    Ok(format!(
        "ALTER TABLE {} ADD COLUMN {} {} NULL",
        quote(&entity.db_table),
        quote(&field.column()),
        column_type(field, state)?
    ))
}
