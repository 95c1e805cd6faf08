use serde::{Deserialize, Serialize};

use super::ProductError;

/// A catalog entry. `id` is zero until the repository assigns one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub count: i64,
    pub price: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        count: i64,
        price: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: category.into(),
            count,
            price,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// JSON has no representation for NaN or infinities, so neither backend accepts them.
    pub(crate) fn ensure_storable(&self) -> Result<(), ProductError> {
        if self.price.is_finite() {
            Ok(())
        } else {
            Err(ProductError::InvalidPrice(self.price))
        }
    }
}
