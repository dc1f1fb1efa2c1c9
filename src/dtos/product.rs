// src/dtos/product.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ProductQueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductQueryParams {
    /// Search term with empty values treated as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    pub id: i64,
    pub data_category: String,
    pub record_count: i64,
    pub fields: Vec<String>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            data_category: product.data_category,
            record_count: product.record_count,
            fields: product.fields.split(',').map(str::to_string).collect(),
        }
    }
}
