use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::linking::errors::LinkError;
use crate::linking::types::{AccountLink, FreshIds, ResolveRequest};
use crate::linking::synthetic_account_key;
use crate::storage::{DB_TABLE_ACCOUNT_LINKS, DB_TABLE_USERS};
use crate::userdb::{User, create_user_tables_postgres};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), LinkError> {
    let table_name = DB_TABLE_ACCOUNT_LINKS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            provider TEXT NOT NULL,
            provider_account_id TEXT NOT NULL,
            link_type TEXT NOT NULL,
            payload TEXT,
            display_name TEXT NOT NULL,
            avatar_url TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            UNIQUE(provider, provider_account_id)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{table_name}_user_id ON {table_name}(user_id)
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_link_postgres(
    pool: &Pool<Postgres>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<AccountLink>, LinkError> {
    let table_name = DB_TABLE_ACCOUNT_LINKS.as_str();

    sqlx::query_as::<_, AccountLink>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE provider = $1 AND provider_account_id = $2
        "#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))
}

pub(super) async fn get_links_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<AccountLink>, LinkError> {
    let table_name = DB_TABLE_ACCOUNT_LINKS.as_str();

    sqlx::query_as::<_, AccountLink>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE user_id = $1 ORDER BY created_at
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))
}

pub(super) async fn delete_link_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    provider: &str,
) -> Result<u64, LinkError> {
    let table_name = DB_TABLE_ACCOUNT_LINKS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = $1 AND provider = $2
        "#
    ))
    .bind(user_id)
    .bind(provider)
    .execute(pool)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))?;

    Ok(result.rows_affected())
}

pub(super) async fn resolve_link_postgres(
    pool: &Pool<Postgres>,
    request: &ResolveRequest,
    fresh: &FreshIds,
) -> Result<User, LinkError> {
    let links_table = DB_TABLE_ACCOUNT_LINKS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    create_tables_postgres(pool).await?;
    create_user_tables_postgres(pool).await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| LinkError::Storage(e.to_string()))?;

    let existing = sqlx::query_as::<_, AccountLink>(&format!(
        r#"
        SELECT * FROM {links_table} WHERE provider = $1 AND provider_account_id = $2
        "#
    ))
    .bind(&request.identity.provider)
    .bind(&request.identity.provider_account_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| LinkError::Storage(e.to_string()))?;

    if let Some(link) = existing {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT * FROM {users_table} WHERE id = $1
            "#
        ))
        .bind(&link.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| LinkError::Storage(e.to_string()))?;
        return Ok(user);
    }

    let user = match &request.caller_user_id {
        Some(caller_id) => {
            let user = sqlx::query_as::<_, User>(&format!(
                r#"
                SELECT * FROM {users_table} WHERE id = $1
                "#
            ))
            .bind(caller_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| LinkError::Storage(e.to_string()))?;

            user.ok_or_else(|| LinkError::LinkTargetNotFound(caller_id.clone()))?
        }
        None => {
            let account = synthetic_account_key(
                &request.identity.provider,
                &request.identity.provider_account_id,
            );
            let now = Utc::now();

            sqlx::query(&format!(
                r#"
                INSERT INTO {users_table} (id, account, label, picture, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (account) DO UPDATE SET
                    label = EXCLUDED.label,
                    picture = EXCLUDED.picture,
                    updated_at = EXCLUDED.updated_at
                "#
            ))
            .bind(&fresh.user_id)
            .bind(&account)
            .bind(&request.identity.display_name)
            .bind(&request.identity.avatar_url)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| LinkError::Storage(e.to_string()))?;

            sqlx::query_as::<_, User>(&format!(
                r#"
                SELECT * FROM {users_table} WHERE account = $1
                "#
            ))
            .bind(&account)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| LinkError::Storage(e.to_string()))?
        }
    };

    let now = Utc::now();
    let insert = sqlx::query(&format!(
        r#"
        INSERT INTO {links_table}
            (id, user_id, provider, provider_account_id, link_type, payload,
             display_name, avatar_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#
    ))
    .bind(&fresh.link_id)
    .bind(&user.id)
    .bind(&request.identity.provider)
    .bind(&request.identity.provider_account_id)
    .bind(request.link_type.as_str())
    .bind(&request.payload)
    .bind(&request.identity.display_name)
    .bind(&request.identity.avatar_url)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await;

    match insert {
        Ok(_) => {
            tx.commit()
                .await
                .map_err(|e| LinkError::Storage(e.to_string()))?;
            Ok(user)
        }
        Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
            // The transaction is poisoned after a constraint violation;
            // fall back to a fresh lookup of the winning owner.
            drop(tx);
            let link = get_link_postgres(
                pool,
                &request.identity.provider,
                &request.identity.provider_account_id,
            )
            .await?
            .ok_or_else(|| LinkError::Storage("Link vanished after unique conflict".to_string()))?;

            sqlx::query_as::<_, User>(&format!(
                r#"
                SELECT * FROM {users_table} WHERE id = $1
                "#
            ))
            .bind(&link.user_id)
            .fetch_one(pool)
            .await
            .map_err(|e| LinkError::Storage(e.to_string()))
        }
        Err(e) => Err(LinkError::Storage(e.to_string())),
    }
}
