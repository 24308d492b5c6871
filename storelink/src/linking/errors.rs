use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum LinkError {
    /// The caller referenced a user that does not exist
    #[error("Link target not found: {0}")]
    LinkTargetNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<crate::userdb::UserError> for LinkError {
    fn from(err: crate::userdb::UserError) -> Self {
        match err {
            crate::userdb::UserError::Storage(msg) => Self::Storage(msg),
        }
    }
}
