use rusqlite::{params, Connection, OptionalExtension};

use crate::store::SqlStore;

use super::{Product, ProductError, Repository};

const GET_ALL: &str = "SELECT id, name, type, count, price FROM products ORDER BY id";
const GET_ONE: &str = "SELECT id, name, type, count, price FROM products WHERE id = ?1";
const STORE: &str = "INSERT INTO products (name, type, count, price) VALUES (?1, ?2, ?3, ?4)";
const UPDATE: &str =
    "UPDATE products SET name = ?1, type = ?2, count = ?3, price = ?4 WHERE id = ?5";
const UPDATE_NAME: &str = "UPDATE products SET name = ?1 WHERE id = ?2";
const DELETE: &str = "DELETE FROM products WHERE id = ?1";

/// Products stored as rows of the `products` table.
pub struct SqlRepository {
    store: SqlStore,
}

impl SqlRepository {
    pub fn new(store: SqlStore) -> Self {
        Self { store }
    }
}

fn map_product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        count: row.get(3)?,
        price: row.get(4)?,
    })
}

fn db_get_one(conn: &Connection, id: i64) -> rusqlite::Result<Option<Product>> {
    conn.prepare_cached(GET_ONE)?
        .query_row(params![id], map_product_row)
        .optional()
}

impl Repository for SqlRepository {
    fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = self.store.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(GET_ALL)?;
            let mapped = stmt
                .query_map([], map_product_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(mapped)
        })?;
        Ok(rows)
    }

    fn get_one(&self, id: i64) -> Result<Option<Product>, ProductError> {
        Ok(self.store.with_conn(|conn| db_get_one(conn, id))?)
    }

    fn store(&self, mut product: Product) -> Result<Product, ProductError> {
        product.ensure_storable()?;
        product.id = self.store.with_conn(|conn| {
            conn.prepare_cached(STORE)?.execute(params![
                product.name,
                product.category,
                product.count,
                product.price
            ])?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(product)
    }

    fn update(&self, product: Product) -> Result<Product, ProductError> {
        product.ensure_storable()?;
        let changed = self.store.with_conn(|conn| {
            conn.prepare_cached(UPDATE)?.execute(params![
                product.name,
                product.category,
                product.count,
                product.price,
                product.id
            ])
        })?;
        if changed == 0 {
            return Err(ProductError::NotFound(product.id));
        }
        Ok(product)
    }

    fn update_name(&self, id: i64, name: &str) -> Result<Product, ProductError> {
        let updated = self.store.with_conn(|conn| {
            let changed = conn.prepare_cached(UPDATE_NAME)?.execute(params![name, id])?;
            if changed == 0 {
                return Ok(None);
            }
            db_get_one(conn, id)
        })?;
        updated.ok_or(ProductError::NotFound(id))
    }

    fn delete(&self, id: i64) -> Result<(), ProductError> {
        let changed = self
            .store
            .with_conn(|conn| conn.prepare_cached(DELETE)?.execute(params![id]))?;
        if changed == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> SqlRepository {
        SqlRepository::new(SqlStore::open(":memory:").unwrap())
    }

    fn sorted(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| p.id);
        products
    }

    #[test]
    fn widget_gadget_scenario() {
        let repo = repo();

        let widget = repo.store(Product::new("Widget", "tools", 10, 9.99)).unwrap();
        let gadget = repo.store(Product::new("Gadget", "tools", 5, 4.50)).unwrap();
        assert_eq!(widget, Product::new("Widget", "tools", 10, 9.99).with_id(1));
        assert_eq!(gadget, Product::new("Gadget", "tools", 5, 4.50).with_id(2));

        assert_eq!(sorted(repo.get_all().unwrap()), vec![widget.clone(), gadget.clone()]);

        repo.delete(widget.id).unwrap();
        assert_eq!(repo.get_all().unwrap(), vec![gadget]);
        assert_eq!(repo.get_one(widget.id).unwrap(), None);
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let repo = repo();
        let first = repo.store(Product::new("a", "c", 1, 1.0)).unwrap();
        let second = repo.store(Product::new("b", "c", 1, 1.0)).unwrap();
        assert!(second.id > first.id);

        repo.delete(second.id).unwrap();
        let third = repo.store(Product::new("c", "c", 1, 1.0)).unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn get_one_missing_is_none() {
        let repo = repo();
        assert_eq!(repo.get_one(999).unwrap(), None);
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let repo = repo();
        let stored = repo.store(Product::new("Lamp", "home", 3, 19.5)).unwrap();
        let updated = repo
            .update(Product::new("Desk Lamp", "office", 7, 24.0).with_id(stored.id))
            .unwrap();
        assert_eq!(repo.get_one(stored.id).unwrap(), Some(updated));
    }

    #[test]
    fn update_name_returns_full_record() {
        let repo = repo();
        let stored = repo.store(Product::new("Lamp", "home", 3, 19.5)).unwrap();
        let renamed = repo.update_name(stored.id, "Floor Lamp").unwrap();
        assert_eq!(renamed, Product { name: "Floor Lamp".into(), ..stored });
        assert_eq!(repo.get_one(renamed.id).unwrap(), Some(renamed));
    }

    #[test]
    fn mutations_of_missing_id_are_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.update(Product::new("x", "y", 1, 1.0).with_id(5)),
            Err(ProductError::NotFound(5))
        ));
        assert!(matches!(repo.update_name(5, "x"), Err(ProductError::NotFound(5))));
        assert!(matches!(repo.delete(5), Err(ProductError::NotFound(5))));
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.sqlite");
        let path = path.to_str().unwrap();

        let stored = SqlRepository::new(SqlStore::open(path).unwrap())
            .store(Product::new("Lamp", "home", 3, 19.5))
            .unwrap();

        let reopened = SqlRepository::new(SqlStore::open(path).unwrap());
        assert_eq!(reopened.get_all().unwrap(), vec![stored]);
    }

    #[test]
    fn broken_schema_surfaces_as_error_not_panic() {
        let store = SqlStore::open(":memory:").unwrap();
        store
            .with_conn(|conn| conn.execute_batch("DROP TABLE products"))
            .unwrap();
        let repo = SqlRepository::new(store);
        assert!(matches!(repo.get_all(), Err(ProductError::Persistence(_))));
        assert!(repo.store(Product::new("a", "b", 1, 1.0)).is_err());
    }

    #[test]
    fn non_finite_price_is_rejected_like_the_file_backend() {
        let repo = repo();
        let kept = repo.store(Product::new("Widget", "tools", 1, 2.0)).unwrap();

        for price in [f64::NAN, f64::INFINITY] {
            let err = repo.store(Product::new("Bad", "tools", 1, price)).unwrap_err();
            assert!(matches!(err, ProductError::InvalidPrice(_)));
            let err = repo
                .update(Product::new("Bad", "tools", 1, price).with_id(kept.id))
                .unwrap_err();
            assert!(matches!(err, ProductError::InvalidPrice(_)));
        }

        assert_eq!(repo.get_all().unwrap(), vec![kept]);
    }
}
