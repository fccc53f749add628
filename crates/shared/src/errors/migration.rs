use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Unknown migration: {0}")]
    UnknownMigration(String),

    #[error("Duplicate migration: {0}")]
    DuplicateMigration(String),

    #[error("Migration {migration} depends on unknown migration {dependency}")]
    UnknownDependency {
        migration: String,
        dependency: String,
    },

    #[error("Circular dependency between migrations: {}", .0.join(", "))]
    CircularDependency(Vec<String>),

    #[error("Cannot apply {migration}: dependency {dependency} has not been applied")]
    UnappliedDependency {
        migration: String,
        dependency: String,
    },

    #[error(
        "Inconsistent history: {migration} is applied before its dependency {dependency}"
    )]
    InconsistentHistory {
        migration: String,
        dependency: String,
    },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Entity already exists: {0}")]
    DuplicateEntity(String),

    #[error("Entity {0} has no primary key")]
    MissingPrimaryKey(String),

    #[error("Unknown field {field} on {entity}")]
    UnknownField { entity: String, field: String },

    #[error("Field {field} already exists on {entity}")]
    DuplicateField { entity: String, field: String },

    #[error("Foreign key check failed: {table} references missing rows in {parent}")]
    ForeignKeyCheck { table: String, parent: String },
}
