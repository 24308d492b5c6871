//! Data store and table configuration

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::{DataStore, PostgresDataStore, SqliteDataStore};

static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").expect("GENERIC_DATA_STORE_TYPE must be set")
});

static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").expect("GENERIC_DATA_STORE_URL must be set")
});

pub(crate) static GENERIC_DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = GENERIC_DATA_STORE_TYPE.as_str();
    let store_url = GENERIC_DATA_STORE_URL.as_str();

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!(
            "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
            t
        ),
    };

    Mutex::new(store)
});

/// Table prefix from environment variable
static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "sl_".to_string()));

/// Users table name
pub(crate) static DB_TABLE_USERS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_USERS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "users"))
});

/// Account links table name
pub(crate) static DB_TABLE_ACCOUNT_LINKS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_ACCOUNT_LINKS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "account_links"))
});

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_db_table_prefix_default() {
        let prefix = env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "sl_".to_string());
        // CI never sets a prefix, so the default applies
        assert!(prefix == "sl_" || !prefix.is_empty());
    }

    #[test]
    fn test_unsupported_store_type_message() {
        let store_type = "mysql";
        let supported = matches!(store_type, "sqlite" | "postgres");
        assert!(!supported);
    }
}
