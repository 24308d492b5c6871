mod errors;
mod types;
mod user;

pub use errors::UserError;
pub use types::User;
pub use user::UserStore;

pub(crate) use user::{create_user_tables_postgres, create_user_tables_sqlite};

pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
