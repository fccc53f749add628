//! Turns migration operations into the SQLite statements that realise them.
//!
//! SQLite's `ALTER TABLE` can only append loose columns, so anything beyond
//! that is done by rebuilding the table: create `new__<table>`, copy the
//! shared columns, drop the original, rename the copy, recreate indexes.

use std::collections::HashSet;

use super::migration::Migration;
use super::operation::Operation;
use crate::errors::MigrationError;
use crate::schema::sql::{self, quote};
use crate::schema::{Entity, FieldDefault, ProjectState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStep {
    Execute(String),
    /// Fill `column` from its default; generated defaults get a fresh value
    /// per row.
    Backfill {
        table: String,
        column: String,
        default: FieldDefault,
        only_null: bool,
    },
}

impl SchemaStep {
    pub fn render(&self) -> String {
        match self {
            SchemaStep::Execute(statement) => format!("{statement};"),
            SchemaStep::Backfill {
                table,
                column,
                default,
                only_null,
            } => {
                let filter = if *only_null {
                    format!(" WHERE {} IS NULL", quote(column))
                } else {
                    String::new()
                };
                match default {
                    FieldDefault::Value(value) => format!(
                        "UPDATE {} SET {} = {}{filter};",
                        quote(table),
                        quote(column),
                        value.to_sql_literal()
                    ),
                    FieldDefault::Generated(generator) => format!(
                        "-- UPDATE {} SET {} = {}() per row{filter}",
                        quote(table),
                        quote(column),
                        generator.name()
                    ),
                }
            }
        }
    }
}

/// Steps for every operation of `migration`, starting from `state`. Also
/// returns the state after the migration.
pub fn plan_migration(
    state: &ProjectState,
    migration: &Migration,
) -> Result<(Vec<SchemaStep>, ProjectState), MigrationError> {
    let mut before = state.clone();
    let mut steps = Vec::new();

    for operation in &migration.operations {
        let mut after = before.clone();
        after.apply(operation)?;
        steps.extend(operation_steps(&before, &after, operation)?);
        before = after;
    }

    Ok((steps, before))
}

fn operation_steps(
    before: &ProjectState,
    after: &ProjectState,
    operation: &Operation,
) -> Result<Vec<SchemaStep>, MigrationError> {
    match operation {
        Operation::CreateEntity(entity) => {
            let entity = after.entity(&entity.name)?;
            let mut steps = vec![SchemaStep::Execute(sql::create_table(
                entity,
                &entity.db_table,
                after,
            )?)];
            for index in &entity.options.indexes {
                steps.push(SchemaStep::Execute(sql::create_index(entity, index)?));
            }
            Ok(steps)
        }
        Operation::AddField { entity, field } => {
            let table = after.entity(entity)?;
            if field.is_simple_addition() {
                return Ok(vec![SchemaStep::Execute(sql::add_column(
                    table, field, after,
                )?)]);
            }

            let mut steps = vec![SchemaStep::Execute(sql::add_loose_column(
                table, field, after,
            )?)];
            if let Some(default) = &field.default {
                steps.push(SchemaStep::Backfill {
                    table: table.db_table.clone(),
                    column: field.column(),
                    default: default.clone(),
                    only_null: true,
                });
            }
            // the loose column already exists, so old and new shapes match
            steps.extend(remake_table(table, table, after)?);
            Ok(steps)
        }
        Operation::AlterField { entity, field } => {
            let old = before.entity(entity)?;
            let new = after.entity(entity)?;
            let previous = old
                .get_field(&field.name)
                .ok_or_else(|| MigrationError::UnknownField {
                    entity: entity.clone(),
                    field: field.name.clone(),
                })?;

            let mut steps = Vec::new();
            if previous.null && !field.null {
                if let Some(default) = &field.default {
                    steps.push(SchemaStep::Backfill {
                        table: old.db_table.clone(),
                        column: previous.column(),
                        default: default.clone(),
                        only_null: true,
                    });
                }
            }
            steps.extend(remake_table(old, new, after)?);
            Ok(steps)
        }
    }
}

fn remake_table(
    old: &Entity,
    new: &Entity,
    state: &ProjectState,
) -> Result<Vec<SchemaStep>, MigrationError> {
    let staging = format!("new__{}", new.db_table);
    let existing: HashSet<String> = old.columns().into_iter().collect();
    let copied = new
        .columns()
        .into_iter()
        .filter(|column| existing.contains(column))
        .map(|column| quote(&column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut steps = vec![
        SchemaStep::Execute(sql::create_table(new, &staging, state)?),
        SchemaStep::Execute(format!(
            "INSERT INTO {} ({copied}) SELECT {copied} FROM {}",
            quote(&staging),
            quote(&old.db_table)
        )),
        SchemaStep::Execute(format!("DROP TABLE {}", quote(&old.db_table))),
        SchemaStep::Execute(format!(
            "ALTER TABLE {} RENAME TO {}",
            quote(&staging),
            quote(&new.db_table)
        )),
    ];
    for index in &new.options.indexes {
        steps.push(SchemaStep::Execute(sql::create_index(new, index)?));
    }

    Ok(steps)
}
