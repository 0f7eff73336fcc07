//! Order Model
//!
//! One order row per cart line item: a multi-item checkout produces N
//! rows sharing the same address and totals. The product snapshot is
//! captured at creation time and never re-fetched for historical views.
//!
//! Lifecycle: created pending, then flipped by admin action to delivered
//! or cancelled. `delivered` and `cancelled` are never both true; rows
//! are never deleted.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub const PAYMENT_STATUS_COD: &str = "CASH ON DELIVERY";

/// Immutable product snapshot embedded in each order row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    #[serde(default)]
    pub image: Vec<String>,
}

/// Derived lifecycle state, used for admin console grouping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Admin console group rank: pending first, cancelled last
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Delivered => 1,
            OrderStatus::Cancelled => 2,
        }
    }
}

/// Order row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Human-readable order identifier (`ORD-<uuid>`)
    pub order_id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub product_details: ProductSnapshot,
    pub quantity: u32,
    pub payment_status: String,
    #[serde(with = "serde_helpers::record_id")]
    pub delivery_address: RecordId,
    pub subtotal: f64,
    pub total: f64,
    #[serde(default)]
    pub delivered: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    pub created_at: String,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        if self.cancelled {
            OrderStatus::Cancelled
        } else if self.delivered {
            OrderStatus::Delivered
        } else {
            OrderStatus::Pending
        }
    }
}

/// Write-side row for batch order creation
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub order_id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub product_details: ProductSnapshot,
    pub quantity: u32,
    pub payment_status: String,
    #[serde(with = "serde_helpers::record_id")]
    pub delivery_address: RecordId,
    pub subtotal: f64,
    pub total: f64,
    pub delivered: bool,
    pub cancelled: bool,
    pub created_at: String,
}

impl NewOrder {
    pub fn cash_on_delivery(
        user: RecordId,
        product: RecordId,
        snapshot: ProductSnapshot,
        quantity: u32,
        delivery_address: RecordId,
        subtotal: f64,
        total: f64,
    ) -> Self {
        Self {
            order_id: format!("ORD-{}", uuid::Uuid::new_v4()),
            user,
            product,
            product_details: snapshot,
            quantity,
            payment_status: PAYMENT_STATUS_COD.to_string(),
            delivery_address,
            subtotal,
            total,
            delivered: false,
            cancelled: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Sort for the admin console: pending before delivered before cancelled,
/// newest first within each group
pub fn sort_for_admin(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        a.status()
            .rank()
            .cmp(&b.status().rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(delivered: bool, cancelled: bool, created_at: &str) -> Order {
        Order {
            id: None,
            order_id: format!("ORD-{}", uuid::Uuid::new_v4()),
            user: RecordId::from_table_key("user", "u1"),
            product: RecordId::from_table_key("product", "p1"),
            product_details: ProductSnapshot {
                name: "Samosa".into(),
                image: vec![],
            },
            quantity: 1,
            payment_status: PAYMENT_STATUS_COD.into(),
            delivery_address: RecordId::from_table_key("address", "a1"),
            subtotal: 50.0,
            total: 50.0,
            delivered,
            cancelled,
            cancel_reason: None,
            created_at: created_at.into(),
        }
    }

    #[test]
    fn status_is_derived_from_flags() {
        assert_eq!(order(false, false, "t").status(), OrderStatus::Pending);
        assert_eq!(order(true, false, "t").status(), OrderStatus::Delivered);
        assert_eq!(order(false, true, "t").status(), OrderStatus::Cancelled);
    }

    #[test]
    fn admin_sort_groups_by_status_then_newest_first() {
        let mut orders = vec![
            order(true, false, "2026-01-03T10:00:00+00:00"),
            order(false, true, "2026-01-05T10:00:00+00:00"),
            order(false, false, "2026-01-01T10:00:00+00:00"),
            order(false, false, "2026-01-04T10:00:00+00:00"),
            order(true, false, "2026-01-02T10:00:00+00:00"),
        ];

        sort_for_admin(&mut orders);

        let statuses: Vec<OrderStatus> = orders.iter().map(|o| o.status()).collect();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Pending,
                OrderStatus::Pending,
                OrderStatus::Delivered,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ]
        );

        // Pending group: newest first
        assert_eq!(orders[0].created_at, "2026-01-04T10:00:00+00:00");
        assert_eq!(orders[1].created_at, "2026-01-01T10:00:00+00:00");
        // Delivered group: newest first
        assert_eq!(orders[2].created_at, "2026-01-03T10:00:00+00:00");
        assert_eq!(orders[3].created_at, "2026-01-02T10:00:00+00:00");
    }

    #[test]
    fn new_cod_order_has_generated_id_and_pending_flags() {
        let row = NewOrder::cash_on_delivery(
            RecordId::from_table_key("user", "u1"),
            RecordId::from_table_key("product", "p1"),
            ProductSnapshot {
                name: "Samosa".into(),
                image: vec![],
            },
            2,
            RecordId::from_table_key("address", "a1"),
            100.0,
            100.0,
        );

        assert!(row.order_id.starts_with("ORD-"));
        assert_eq!(row.payment_status, PAYMENT_STATUS_COD);
        assert!(!row.delivered);
        assert!(!row.cancelled);
    }
}
