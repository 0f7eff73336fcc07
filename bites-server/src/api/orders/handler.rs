//! Order handlers
//!
//! Checkout turns the submitted cart lines into one order row per line.
//! Totals are recomputed server-side from the current product price and
//! discount, and every row carries the cart-level subtotal and total
//! (one receipt, N rows). Fulfillment flips flags; rows are never
//! deleted.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{NewOrder, Order, ProductSnapshot, UserInfo};
use crate::db::repository::{
    AddressRepository, CartRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::services::{NotifierEvent, OrderLine, OrderPlaced};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CashOnDeliveryRequest {
    pub items: Vec<CheckoutItem>,
    pub address_id: String,
}

/// Order joined with the user who placed it (admin console view)
#[derive(Debug, Serialize)]
pub struct OrderWithUser {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_details: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeliveredRequest {
    pub order_id: String,
    pub delivered: bool,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub order_id: String,
    pub reason: Option<String>,
}

/// POST /api/order/cash-on-delivery
///
/// Places one order row per submitted line, clears the cart and
/// enqueues the admin notification. The notification is fire-and-forget;
/// a full queue never fails the order.
pub async fn cash_on_delivery(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<CashOnDeliveryRequest>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("No items to order"));
    }

    let user_id = user.record_id()?;
    let addresses = AddressRepository::new(state.get_db());
    let products = ProductRepository::new(state.get_db());

    let address = addresses
        .find_by_id(&payload.address_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Address {} not found", payload.address_id)))?;
    if address.user != user_id {
        return Err(AppError::forbidden("Address belongs to another user"));
    }
    if !address.status {
        return Err(AppError::validation("Address has been removed"));
    }
    let address_id = address
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Address row missing id"))?;

    // Validate every line and price the cart before anything is written
    let mut picked: Vec<(surrealdb::RecordId, ProductSnapshot, u32)> =
        Vec::with_capacity(payload.items.len());
    let mut lines: Vec<OrderLine> = Vec::with_capacity(payload.items.len());
    let mut subtotal = 0.0_f64;

    for item in &payload.items {
        if item.quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let product = products.find_by_id(&item.product_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Product {} not found", item.product_id))
        })?;
        let product_id = product
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Product row missing id"))?;

        subtotal += product.price_with_discount() * item.quantity as f64;

        lines.push(OrderLine {
            name: product.name.clone(),
            quantity: item.quantity,
        });
        picked.push((
            product_id,
            ProductSnapshot {
                name: product.name,
                image: product.image,
            },
            item.quantity,
        ));
    }

    // COD adds no fees; the order total is the cart subtotal
    let total = subtotal;

    // Every row repeats the cart-level totals, matching the receipt
    let rows: Vec<NewOrder> = picked
        .into_iter()
        .map(|(product_id, snapshot, quantity)| {
            NewOrder::cash_on_delivery(
                user_id.clone(),
                product_id,
                snapshot,
                quantity,
                address_id.clone(),
                subtotal,
                total,
            )
        })
        .collect();

    let orders = OrderRepository::new(state.get_db());
    let created = orders.create_many(rows).await?;

    let cart = CartRepository::new(state.get_db());
    if let Err(e) = cart.clear_user(&user_id).await {
        tracing::warn!("Failed to clear cart after checkout: {}", e);
    }

    let customer = UserRepository::new(state.get_db())
        .find_by_id(&user.id)
        .await?;
    state
        .notifier
        .notifier()
        .notify(NotifierEvent::OrderPlaced(OrderPlaced {
            order_ids: created.iter().map(|o| o.order_id.clone()).collect(),
            customer_name: user.name.clone(),
            customer_email: customer.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            customer_mobile: customer.and_then(|u| u.mobile),
            hostel_name: address.hostel_name,
            room_number: address.room_number,
            items: lines,
            subtotal,
            total,
        }));

    tracing::info!(
        user = %user.id,
        rows = created.len(),
        total,
        "Order placed"
    );
    Ok(ok_with_message(created, "Order placed successfully"))
}

/// GET /api/order/order-list
pub async fn order_list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_for_user(&user.record_id()?).await?;
    Ok(ok(orders))
}

/// GET /api/order/admin/all (admin)
///
/// Pending first, then delivered, then cancelled, newest first within
/// each group, each row joined with the customer's details.
pub async fn admin_all(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<OrderWithUser>>>> {
    let repo = OrderRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    let orders = repo.find_all_for_admin().await?;
    let mut joined = Vec::with_capacity(orders.len());
    for order in orders {
        let user_details = users
            .find_by_id(&order.user.to_string())
            .await?
            .map(|u| UserInfo::from(&u));
        joined.push(OrderWithUser {
            order,
            user_details,
        });
    }
    Ok(ok(joined))
}

/// PUT /api/order/admin/update-delivered (admin)
///
/// Flips the delivered flag and adjusts stock atomically. Re-sending the
/// current flag is a no-op; cancelled orders cannot be delivered.
pub async fn update_delivered(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<UpdateDeliveredRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());

    let order = repo
        .find_by_id(&payload.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", payload.order_id)))?;

    if order.cancelled {
        return Err(AppError::business_rule(
            "Cancelled orders cannot be delivered",
        ));
    }
    if order.delivered == payload.delivered {
        return Ok(ok_with_message(order, "Order already in requested state"));
    }

    let updated = repo.set_delivered(&order, payload.delivered).await?;
    tracing::info!(
        order_id = %updated.order_id,
        delivered = payload.delivered,
        "Order delivery state updated"
    );
    Ok(ok_with_message(updated, "Order updated"))
}

/// PUT /api/order/cancel
///
/// The owner or an admin may cancel a pending order. Delivered and
/// already-cancelled orders are immutable.
pub async fn cancel(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());

    let order = repo
        .find_by_id(&payload.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", payload.order_id)))?;

    if !user.is_admin() && order.user != user.record_id()? {
        return Err(AppError::forbidden("Order belongs to another user"));
    }
    if order.delivered {
        return Err(AppError::business_rule(
            "Delivered orders cannot be cancelled",
        ));
    }
    if order.cancelled {
        return Err(AppError::business_rule("Order is already cancelled"));
    }

    let id = order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Order row missing id"))?;
    let cancelled = repo.cancel(&id, payload.reason).await?;
    tracing::info!(order_id = %cancelled.order_id, "Order cancelled");
    Ok(ok_with_message(cancelled, "Order cancelled"))
}
