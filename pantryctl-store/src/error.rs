//! Error types for pantryctl-store

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database row is invalid: {0}")]
    InvalidRow(#[from] pantryctl_core::ValidationError),

    #[error("not found: item '{id}'")]
    NotFound { id: i32 },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound { id: 99 };
        assert_eq!(err.to_string(), "not found: item '99'");
        assert!(err.is_not_found());
        assert!(!StoreError::Database(sqlx::Error::PoolClosed).is_not_found());
    }
}
