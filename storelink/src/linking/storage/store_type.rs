use crate::linking::errors::LinkError;
use crate::linking::types::{AccountLink, FreshIds, ResolveRequest};
use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::User;

use super::postgres::*;
use super::sqlite::*;

pub struct AccountLinkStore;

impl AccountLinkStore {
    /// Initialize the account link tables
    pub(crate) async fn init() -> Result<(), LinkError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            create_tables_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            create_tables_postgres(pool).await
        } else {
            Err(LinkError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Look up the link for an external account, if one exists
    pub async fn get_link(
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<AccountLink>, LinkError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_link_sqlite(pool, provider, provider_account_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_link_postgres(pool, provider, provider_account_id).await
        } else {
            Err(LinkError::Storage("Unsupported database type".to_string()))
        }
    }

    /// All links owned by a user, oldest first
    pub async fn get_links_for_user(user_id: &str) -> Result<Vec<AccountLink>, LinkError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_links_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_links_for_user_postgres(pool, user_id).await
        } else {
            Err(LinkError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Delete a user's link for one provider; returns affected row count
    pub async fn delete_link(user_id: &str, provider: &str) -> Result<u64, LinkError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_link_sqlite(pool, user_id, provider).await
        } else if let Some(pool) = store.as_postgres() {
            delete_link_postgres(pool, user_id, provider).await
        } else {
            Err(LinkError::Storage("Unsupported database type".to_string()))
        }
    }

    pub(crate) async fn resolve_link(
        request: &ResolveRequest,
        fresh: &FreshIds,
    ) -> Result<User, LinkError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            resolve_link_sqlite(pool, request, fresh).await
        } else if let Some(pool) = store.as_postgres() {
            resolve_link_postgres(pool, request, fresh).await
        } else {
            Err(LinkError::Storage("Unsupported database type".to_string()))
        }
    }
}
