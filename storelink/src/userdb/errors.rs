use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UserError {
    #[error("Storage error: {0}")]
    Storage(String),
}
