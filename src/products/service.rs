use std::sync::Arc;

use super::{Product, ProductError, Repository};

/// Business layer between the HTTP handlers and a [`Repository`].
#[derive(Clone)]
pub struct Service {
    repository: Arc<dyn Repository>,
}

impl Service {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.get_all()
    }

    pub fn get_one(&self, id: i64) -> Result<Product, ProductError> {
        self.repository
            .get_one(id)?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a product; the repository decides its id.
    pub fn store(
        &self,
        name: &str,
        category: &str,
        count: i64,
        price: f64,
    ) -> Result<Product, ProductError> {
        let product = self
            .repository
            .store(Product::new(name, category, count, price))?;
        log::debug!("stored product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update(
        &self,
        id: i64,
        name: &str,
        category: &str,
        count: i64,
        price: f64,
    ) -> Result<Product, ProductError> {
        let product = Product::new(name, category, count, price).with_id(id);
        self.repository.update(product)
    }

    pub fn update_name(&self, id: i64, name: &str) -> Result<Product, ProductError> {
        self.repository.update_name(id, name)
    }

    pub fn delete(&self, id: i64) -> Result<(), ProductError> {
        self.repository.delete(id)?;
        log::debug!("deleted product {}", id);
        Ok(())
    }
}
