mod editor;
mod executor;
mod graph;
pub mod history;
mod migration;
mod operation;
mod recorder;

pub use self::editor::{SchemaStep, plan_migration};
pub use self::executor::{MigrationExecutor, MigrationReport, MigrationStatus};
pub use self::graph::MigrationGraph;
pub use self::migration::Migration;
pub use self::operation::Operation;
pub use self::recorder::{AppliedMigration, LEDGER_TABLE, MigrationRecorder};
