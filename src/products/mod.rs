mod entity;
mod error;
pub mod json_repository;
pub mod repository;
pub mod service;
pub mod sql_repository;

use std::sync::Arc;

pub use entity::Product;
pub use error::ProductError;
pub use json_repository::JsonRepository;
pub use repository::Repository;
pub use service::Service;
pub use sql_repository::SqlRepository;

use crate::store::StoreHandle;

/// Wrap an opened store in the repository that understands it.
pub fn repository(handle: StoreHandle) -> Arc<dyn Repository> {
    match handle {
        StoreHandle::File(store) => Arc::new(JsonRepository::new(store)),
        StoreHandle::Sql(store) => Arc::new(SqlRepository::new(store)),
    }
}
