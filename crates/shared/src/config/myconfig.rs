use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let db_min_conn = match lookup("DB_MIN_CONN") {
            Some(value) => value
                .parse::<u32>()
                .context("DB_MIN_CONN must be a valid u32 integer")?,
            None => 1,
        };

        let db_max_conn = match lookup("DB_MAX_CONN") {
            Some(value) => value
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            None => 5,
        };

        if db_min_conn > db_max_conn {
            anyhow::bail!("DB_MIN_CONN ({db_min_conn}) exceeds DB_MAX_CONN ({db_max_conn})");
        }

        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Ok(Self {
            database_url,
            db_min_conn,
            db_max_conn,
            is_dev: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite://shop.db")])).unwrap();

        assert_eq!(config.database_url, "sqlite://shop.db");
        assert_eq!(config.db_min_conn, 1);
        assert_eq!(config.db_max_conn, 5);
        assert!(!config.is_dev);
        assert!(!config.enable_file_log);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_bad_pool_sizes() {
        assert!(
            Config::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("DB_MAX_CONN", "many"),
            ]))
            .is_err()
        );
        assert!(
            Config::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("DB_MIN_CONN", "8"),
                ("DB_MAX_CONN", "2"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn flags_accept_true_and_one() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DEV_MODE", "1"),
            ("ENABLE_FILE_LOG", "true"),
        ]))
        .unwrap();

        assert!(config.is_dev);
        assert!(config.enable_file_log);
    }
}
