//! Order Repository
//!
//! Order rows are append-only; fulfillment flips the `delivered` and
//! `cancelled` flags. The delivered flip and its stock side effect run in
//! a single transaction so the two can never diverge.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{NewOrder, Order, sort_for_admin};

const ORDER_TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist one row per cart line in a single batch insert
    pub async fn create_many(&self, rows: Vec<NewOrder>) -> RepoResult<Vec<Order>> {
        if rows.is_empty() {
            return Err(RepoError::Validation("No order rows to create".into()));
        }
        let created: Vec<Order> = self.base.db().insert(ORDER_TABLE).content(rows).await?;
        Ok(created)
    }

    /// One user's orders, newest first
    pub async fn find_for_user(&self, user: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders for the admin console: pending first, then delivered,
    /// then cancelled, newest first within each group
    pub async fn find_all_for_admin(&self) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders")
            .await?
            .take(0)?;
        sort_for_admin(&mut orders);
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id).to_string();
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// Flip the delivered flag and adjust the product's stock in one
    /// transaction.
    ///
    /// delivering: stock -= quantity (floored at 0)
    /// un-delivering (manual correction): stock += quantity
    ///
    /// The caller must have verified the order is not cancelled and that
    /// the flag actually changes.
    pub async fn set_delivered(&self, order: &Order, delivered: bool) -> RepoResult<Order> {
        let order_rid = order
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| RepoError::Database("Order row missing id".into()))?;
        let product_rid = order.product.to_string();
        let delta: i64 = if delivered {
            -(order.quantity as i64)
        } else {
            order.quantity as i64
        };

        let mut result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 UPDATE type::record($order) SET delivered = $delivered RETURN AFTER;
                 UPDATE type::record($product) SET stock = math::max([stock + $delta, 0]);
                 COMMIT TRANSACTION;",
            )
            .bind(("order", order_rid.clone()))
            .bind(("delivered", delivered))
            .bind(("product", product_rid))
            .bind(("delta", delta))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order_rid)))
    }

    /// Mark an order cancelled with an optional free-text reason.
    ///
    /// The caller must have verified the order is neither delivered nor
    /// already cancelled.
    pub async fn cancel(&self, id: &str, reason: Option<String>) -> RepoResult<Order> {
        let rid = format!("{}:{}", ORDER_TABLE, record_key(ORDER_TABLE, id));
        let mut result = self
            .base
            .db()
            .query("UPDATE type::record($rid) SET cancelled = true, cancel_reason = $reason RETURN AFTER")
            .bind(("rid", rid))
            .bind(("reason", reason))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
