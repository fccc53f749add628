use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::{Connection, Row, SqliteConnection};
use tracing::{debug, error, info, warn};

use super::editor::{SchemaStep, plan_migration};
use super::graph::MigrationGraph;
use super::history;
use super::migration::Migration;
use super::recorder::MigrationRecorder;
use crate::config::ConnectionPool;
use crate::errors::MigrationError;
use crate::schema::sql::quote;
use crate::schema::{FieldDefault, FieldValue, ProjectState, models};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub name: String,
    pub applied_at: Option<DateTime<Utc>>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Applies migrations from a [`MigrationGraph`] against a database and keeps
/// the ledger in step.
pub struct MigrationExecutor {
    db: ConnectionPool,
    graph: MigrationGraph,
    recorder: MigrationRecorder,
}

impl MigrationExecutor {
    pub fn new(db: ConnectionPool, graph: MigrationGraph) -> Self {
        let recorder = MigrationRecorder::new(db.clone());
        Self {
            db,
            graph,
            recorder,
        }
    }

    /// Executor over the application's own migration history.
    pub fn from_history(db: ConnectionPool) -> Result<Self, MigrationError> {
        let graph = MigrationGraph::new(history::all())?;
        Ok(Self::new(db, graph))
    }

    pub fn graph(&self) -> &MigrationGraph {
        &self.graph
    }

    pub fn recorder(&self) -> &MigrationRecorder {
        &self.recorder
    }

    /// Apply every pending migration (up to `target` when given) in
    /// dependency order. Stops at the first failure.
    pub async fn migrate(&self, target: Option<&str>) -> Result<MigrationReport, MigrationError> {
        self.recorder.ensure_schema().await?;
        let applied = self.recorder.applied_names().await?;
        self.graph.check_consistency(&applied)?;

        let plan = self.graph.plan(&applied, target)?;
        if plan.is_empty() {
            info!("✅ No migrations to apply");
            return Ok(MigrationReport::default());
        }

        info!("🚀 Applying {} migration(s)", plan.len());

        let mut report = MigrationReport::default();
        for migration in plan {
            if let Err(err) = self.run(migration).await {
                error!(
                    "❌ Migration {} failed, aborting remaining batch: {}",
                    migration.name, err
                );
                return Err(err);
            }
            report.applied.push(migration.name.clone());
        }

        Ok(report)
    }

    /// Apply a single migration. Returns `false` when it was already applied;
    /// fails without touching the schema when a dependency is missing.
    pub async fn apply(&self, name: &str) -> Result<bool, MigrationError> {
        let migration = self.graph.migration(name)?;

        self.recorder.ensure_schema().await?;
        let applied = self.recorder.applied_names().await?;

        if applied.contains(&migration.name) {
            info!("⏭️ Migration {} already applied", migration.name);
            return Ok(false);
        }

        if let Some(dependency) = migration
            .dependencies
            .iter()
            .find(|dep| !applied.contains(*dep))
        {
            error!(
                "❌ Cannot apply {}: dependency {} is not applied",
                migration.name, dependency
            );
            return Err(MigrationError::UnappliedDependency {
                migration: migration.name.clone(),
                dependency: dependency.clone(),
            });
        }

        self.run(migration).await?;
        Ok(true)
    }

    /// Every known migration in apply order with its ledger timestamp.
    pub async fn show(&self) -> Result<Vec<MigrationStatus>, MigrationError> {
        let applied: HashMap<String, DateTime<Utc>> = self
            .recorder
            .applied()
            .await?
            .into_iter()
            .map(|row| (row.name, row.applied_at))
            .collect();

        for name in applied.keys() {
            if self.graph.get(name).is_none() {
                warn!("⚠️ Ledger lists unknown migration {}", name);
            }
        }

        Ok(self
            .graph
            .ordered()
            .map(|m| MigrationStatus {
                name: m.name.clone(),
                applied_at: applied.get(&m.name).copied(),
            })
            .collect())
    }

    /// Statements `name` would run, without running them.
    pub fn sql_for(&self, name: &str) -> Result<Vec<String>, MigrationError> {
        let migration = self.graph.migration(name)?;
        let state = self.graph.state_before(name)?;
        let (steps, _) = plan_migration(&state, migration)?;

        Ok(steps.iter().map(SchemaStep::render).collect())
    }

    /// Differences between the replayed history and the model declarations.
    pub fn check(&self) -> Result<Vec<String>, MigrationError> {
        let replayed = self.graph.project_state()?;
        Ok(replayed.diff(&ProjectState::from_entities(models::all())))
    }

    async fn run(&self, migration: &Migration) -> Result<(), MigrationError> {
        let state = self.graph.state_before(&migration.name)?;
        let (steps, _) = plan_migration(&state, migration)?;

        info!("🔧 Applying {}", migration.name);
        for operation in &migration.operations {
            debug!("   {}", operation.describe());
        }

        let mut conn = self.db.acquire().await?;

        // Table rebuilds drop parents of live foreign keys; enforcement is
        // restored and verified before the connection goes back to the pool.
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await?;
        let result = execute_steps(&mut conn, &migration.name, &steps).await;
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await?;
        result?;

        info!("✅ Applied {}", migration.name);
        Ok(())
    }
}

async fn execute_steps(
    conn: &mut SqliteConnection,
    name: &str,
    steps: &[SchemaStep],
) -> Result<(), MigrationError> {
    let mut tx = conn.begin().await?;

    for step in steps {
        run_step(&mut tx, step).await?;
    }

    if let Some(row) = sqlx::query("PRAGMA foreign_key_check")
        .fetch_optional(&mut *tx)
        .await?
    {
        let table: String = row.try_get(0)?;
        let parent: String = row.try_get(2)?;
        return Err(MigrationError::ForeignKeyCheck { table, parent });
    }

    MigrationRecorder::record_applied(&mut tx, name).await?;
    tx.commit().await?;

    Ok(())
}

async fn run_step(conn: &mut SqliteConnection, step: &SchemaStep) -> Result<(), MigrationError> {
    match step {
        SchemaStep::Execute(statement) => {
            debug!("   {}", statement);
            sqlx::query(statement).execute(&mut *conn).await?;
        }
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
                FieldDefault::Value(_) => {
                    let statement =
                        format!("UPDATE {} SET {} = $1{filter}", quote(table), quote(column));
                    let result = bind_value(sqlx::query(&statement), &default.resolve())
                        .execute(&mut *conn)
                        .await?;
                    debug!(
                        "   backfilled {} row(s) of {}.{}",
                        result.rows_affected(),
                        table,
                        column
                    );
                }
                FieldDefault::Generated(generator) => {
                    let select = format!("SELECT rowid FROM {}{filter}", quote(table));
                    let rowids: Vec<i64> = sqlx::query_scalar(&select)
                        .fetch_all(&mut *conn)
                        .await?;

                    let update = format!(
                        "UPDATE {} SET {} = $1 WHERE rowid = $2",
                        quote(table),
                        quote(column)
                    );
                    // resolved per row so generated values stay distinct
                    for rowid in &rowids {
                        bind_value(sqlx::query(&update), &default.resolve())
                            .bind(*rowid)
                            .execute(&mut *conn)
                            .await?;
                    }
                    debug!(
                        "   backfilled {} row(s) of {}.{} with {}()",
                        rowids.len(),
                        table,
                        column,
                        generator.name()
                    );
                }
            }
        }
    }

    Ok(())
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &FieldValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FieldValue::Uuid(id) => query.bind(*id),
        FieldValue::Bool(flag) => query.bind(*flag),
        FieldValue::Integer(n) => query.bind(*n),
        FieldValue::Text(text) => query.bind(text.clone()),
        FieldValue::DateTime(ts) => query.bind(*ts),
    }
}
