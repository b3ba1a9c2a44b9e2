use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl ServiceError {
    /// Whether the caller, rather than storage, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDate(_))
    }
}
