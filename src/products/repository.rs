use super::{Product, ProductError};

/// Persistence operations for products, implemented once per backend.
///
/// `get_one` reports absence as `Ok(None)`. Mutations of an unknown id fail
/// with [`ProductError::NotFound`] and leave the backing medium untouched.
pub trait Repository: Send + Sync {
    fn get_all(&self) -> Result<Vec<Product>, ProductError>;
    fn get_one(&self, id: i64) -> Result<Option<Product>, ProductError>;
    /// Persist a new product and return it with its assigned id.
    fn store(&self, product: Product) -> Result<Product, ProductError>;
    /// Replace every mutable field of the product with the same id.
    fn update(&self, product: Product) -> Result<Product, ProductError>;
    fn update_name(&self, id: i64, name: &str) -> Result<Product, ProductError>;
    fn delete(&self, id: i64) -> Result<(), ProductError>;
}
