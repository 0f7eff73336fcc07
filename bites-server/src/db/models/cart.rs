//! Cart Line Item Model
//!
//! One row per (user, product). Rows for a user are deleted wholesale
//! after a successful checkout.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Cart line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemCreate {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: u32,
}

/// Cart line joined with its product (list view for the storefront)
#[derive(Debug, Clone, Serialize)]
pub struct CartItemFull {
    pub item: CartItem,
    pub product: Option<super::Product>,
}
