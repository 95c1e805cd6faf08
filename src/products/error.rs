use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("persistence failure: {0}")]
    Persistence(#[source] StoreError),
    #[error("malformed product data: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("price must be a finite number, got {0}")]
    InvalidPrice(f64),
    #[error("no product id available after {0}")]
    IdsExhausted(i64),
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        if err.is_constraint_violation() {
            ProductError::ConstraintViolation(err.to_string())
        } else {
            ProductError::Persistence(err)
        }
    }
}

impl From<rusqlite::Error> for ProductError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::from(err).into()
    }
}
