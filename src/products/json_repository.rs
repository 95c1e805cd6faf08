use std::sync::Mutex;

use crate::store::Store;

use super::{Product, ProductError, Repository};

/// Products kept as one JSON array inside a byte [`Store`].
///
/// Every mutation rewrites the whole collection while holding `write_lock`,
/// so concurrent writers in this process cannot lose each other's updates.
pub struct JsonRepository<S: Store> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: Store> JsonRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Product>, ProductError> {
        let bytes = self.store.read()?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, products: &[Product]) -> Result<(), ProductError> {
        let bytes = serde_json::to_vec_pretty(products)?;
        self.store.write(&bytes)?;
        Ok(())
    }

    fn mutate<F, T>(&self, f: F) -> Result<T, ProductError>
    where
        F: FnOnce(&mut Vec<Product>) -> Result<T, ProductError>,
    {
        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut products = self.load()?;
        let out = f(&mut products)?;
        self.save(&products)?;
        Ok(out)
    }
}

fn next_id(products: &[Product]) -> Result<i64, ProductError> {
    let max = products.iter().map(|p| p.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(ProductError::IdsExhausted(max))
}

impl<S: Store> Repository for JsonRepository<S> {
    fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        self.load()
    }

    fn get_one(&self, id: i64) -> Result<Option<Product>, ProductError> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    fn store(&self, mut product: Product) -> Result<Product, ProductError> {
        product.ensure_storable()?;
        self.mutate(|products| {
            product.id = next_id(products)?;
            products.push(product.clone());
            Ok(product)
        })
    }

    fn update(&self, product: Product) -> Result<Product, ProductError> {
        product.ensure_storable()?;
        self.mutate(|products| {
            let existing = products
                .iter_mut()
                .find(|p| p.id == product.id)
                .ok_or(ProductError::NotFound(product.id))?;
            existing.name = product.name;
            existing.category = product.category;
            existing.count = product.count;
            existing.price = product.price;
            Ok(existing.clone())
        })
    }

    fn update_name(&self, id: i64, name: &str) -> Result<Product, ProductError> {
        self.mutate(|products| {
            let existing = products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(ProductError::NotFound(id))?;
            existing.name = name.to_string();
            Ok(existing.clone())
        })
    }

    fn delete(&self, id: i64) -> Result<(), ProductError> {
        self.mutate(|products| {
            let before = products.len();
            products.retain(|p| p.id != id);
            if products.len() == before {
                return Err(ProductError::NotFound(id));
            }
            Ok(())
        })
    }
}
