use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::info;

use crate::config::ConnectionPool;
use crate::errors::MigrationError;

pub const LEDGER_TABLE: &str = "_migrations";

#[derive(Debug, Clone, FromRow)]
pub struct AppliedMigration {
    pub id: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// Reads and writes the ledger of applied migrations.
#[derive(Clone)]
pub struct MigrationRecorder {
    db: ConnectionPool,
}

impl MigrationRecorder {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    pub async fn has_table(&self) -> Result<bool, MigrationError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        )
        .bind(LEDGER_TABLE)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }

    pub async fn ensure_schema(&self) -> Result<(), MigrationError> {
        if self.has_table().await? {
            return Ok(());
        }

        info!("📒 Creating migration ledger table {}", LEDGER_TABLE);
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS "_migrations" (
                "id" integer NOT NULL PRIMARY KEY AUTOINCREMENT,
                "name" varchar(255) NOT NULL UNIQUE,
                "applied_at" datetime NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Ledger rows in the order they were written; empty before the first run.
    pub async fn applied(&self) -> Result<Vec<AppliedMigration>, MigrationError> {
        if !self.has_table().await? {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AppliedMigration>(
            r#"SELECT "id", "name", "applied_at" FROM "_migrations" ORDER BY "id""#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn applied_names(&self) -> Result<HashSet<String>, MigrationError> {
        Ok(self.applied().await?.into_iter().map(|m| m.name).collect())
    }

    /// Runs on the migration's own transaction so the ledger row commits
    /// together with the schema change.
    pub async fn record_applied(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<(), MigrationError> {
        sqlx::query(r#"INSERT INTO "_migrations" ("name", "applied_at") VALUES ($1, $2)"#)
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
