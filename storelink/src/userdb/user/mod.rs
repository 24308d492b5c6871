mod postgres;
mod sqlite;
mod store_type;

// Re-export only the specific items needed for the public API
pub use store_type::UserStore;

// The account linker creates users inside its own transactions and needs
// the schema helpers for the in-memory-database case
pub(crate) use postgres::create_tables_postgres as create_user_tables_postgres;
pub(crate) use sqlite::create_tables_sqlite as create_user_tables_sqlite;
