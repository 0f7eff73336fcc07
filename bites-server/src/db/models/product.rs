//! Product Model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type ProductId = RecordId;

/// Product catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub image: Vec<String>,
    /// Record links to category
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub category: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub sub_category: Vec<RecordId>,
    /// Units on hand; the stock adjuster keeps this >= 0
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price: f64,
    /// Discount in percent (e.g. 10 = 10%)
    #[serde(default)]
    pub discount: i32,
    #[serde(default)]
    pub description: String,
    /// Free-form extra details
    #[serde(default)]
    pub more_details: HashMap<String, serde_json::Value>,
    #[serde(default = "default_true")]
    pub publish: bool,
    pub created_at: String,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Selling price after the percent discount, matching the storefront
    /// calculation (discount amount rounded up)
    pub fn price_with_discount(&self) -> f64 {
        let discount_amount = ((self.price * self.discount as f64) / 100.0).ceil();
        self.price - discount_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub image: Option<Vec<String>>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub category: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub sub_category: Vec<RecordId>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
    pub discount: Option<i32>,
    pub description: Option<String>,
    pub more_details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub image: Option<Vec<String>>,
    #[serde(default, with = "serde_helpers::option_vec_record_id")]
    pub category: Option<Vec<RecordId>>,
    #[serde(default, with = "serde_helpers::option_vec_record_id")]
    pub sub_category: Option<Vec<RecordId>>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
    pub discount: Option<i32>,
    pub description: Option<String>,
    pub more_details: Option<HashMap<String, serde_json::Value>>,
    pub publish: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, discount: i32) -> Product {
        Product {
            id: None,
            name: "Veg Roll".into(),
            image: vec![],
            category: vec![],
            sub_category: vec![],
            stock: 10,
            price,
            discount,
            description: String::new(),
            more_details: HashMap::new(),
            publish: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn discount_rounds_the_rebate_up() {
        // 10% of 99 = 9.9, rounded up to 10
        assert_eq!(product(99.0, 10).price_with_discount(), 89.0);
        assert_eq!(product(100.0, 0).price_with_discount(), 100.0);
    }
}
