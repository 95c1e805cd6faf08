use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint: `data` on success, `error` otherwise.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(code: u16, data: T) -> Self {
        Self {
            code,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_secs: u64,
}

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub count: Option<i64>,
    pub price: Option<f64>,
}

/// Body of `PATCH /products/:id`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RenameRequest {
    pub name: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub count: i64,
    pub price: f64,
}

impl ProductRequest {
    pub fn validate(self) -> Result<ProductFields, String> {
        let name = required_name(self.name)?;
        let category = self.category.ok_or("type is required")?;
        let count = self.count.ok_or("count is required")?;
        let price = self.price.ok_or("price is required")?;
        if count < 0 {
            return Err("count must not be negative".to_string());
        }
        if !price.is_finite() || price < 0.0 {
            return Err("price must not be negative".to_string());
        }
        Ok(ProductFields {
            name,
            category,
            count,
            price,
        })
    }
}

impl RenameRequest {
    pub fn validate(self) -> Result<String, String> {
        required_name(self.name)
    }
}

fn required_name(name: Option<String>) -> Result<String, String> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err("name is required".to_string()),
    }
}
