mod migration;
mod repository;

pub use self::migration::MigrationError;
pub use self::repository::RepositoryError;
