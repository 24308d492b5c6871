use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Invalid session token: {0}")]
    Token(String),

    #[error("Session expired")]
    Expired,

    #[error("No session")]
    NoSession,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

impl From<crate::userdb::UserError> for SessionError {
    fn from(err: crate::userdb::UserError) -> Self {
        match err {
            crate::userdb::UserError::Storage(msg) => Self::Storage(msg),
        }
    }
}

impl From<crate::linking::LinkError> for SessionError {
    fn from(err: crate::linking::LinkError) -> Self {
        Self::Storage(err.to_string())
    }
}
