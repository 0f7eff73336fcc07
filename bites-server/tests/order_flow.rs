//! End-to-end checkout and fulfillment flow against the full router.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use bites_server::db::models::Role;
use common::{app, create_product, create_user, request, test_state};

/// Register an address through the API, returning its record id
async fn create_address(app: &axum::Router, token: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/address",
        Some(token),
        Some(json!({
            "hostel_name": "North Hall",
            "room_number": "214",
            "mobile": "9876543210"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().expect("address id").to_string()
}

#[tokio::test]
async fn checkout_creates_one_row_per_line_and_clears_cart() {
    let state = test_state().await;
    let app = app(&state);

    let (_, token) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let roll = create_product(&state, "Veg Roll", 40.0, 10).await;
    let samosa = create_product(&state, "Samosa", 15.0, 20).await;
    let address = create_address(&app, &token).await;

    // Fill the cart (two lines)
    for (product, qty) in [(&roll, 2), (&samosa, 3)] {
        let (status, _) = request(
            &app,
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"product_id": product, "quantity": qty})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&token),
        Some(json!({
            "items": [
                {"product_id": roll, "quantity": 2},
                {"product_id": samosa, "quantity": 3}
            ],
            "address_id": address
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let orders = body["data"].as_array().expect("order rows");
    assert_eq!(orders.len(), 2);
    for order in orders {
        assert!(order["order_id"].as_str().unwrap().starts_with("ORD-"));
        assert_eq!(order["payment_status"], json!("CASH ON DELIVERY"));
        assert_eq!(order["delivered"], json!(false));
        assert_eq!(order["cancelled"], json!(false));
        // 2 x 40 + 3 x 15, the cart-level receipt repeated on each row
        assert_eq!(order["subtotal"].as_f64().unwrap(), 125.0);
        assert_eq!(order["total"].as_f64().unwrap(), 125.0);
    }

    // Cart is empty afterwards
    let (status, body) = request(&app, Method::GET, "/api/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // And the order shows up in the user's history
    let (status, body) =
        request(&app, Method::GET, "/api/order/order-list", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn checkout_rejects_empty_and_foreign_input() {
    let state = test_state().await;
    let app = app(&state);

    let (_, alice) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, bob) = create_user(&state, "Bob", "bob@example.com", Role::User).await;
    let product = create_product(&state, "Veg Roll", 40.0, 10).await;
    let alice_address = create_address(&app, &alice).await;

    // Empty item list
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&alice),
        Some(json!({"items": [], "address_id": alice_address})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&alice),
        Some(json!({
            "items": [{"product_id": product, "quantity": 0}],
            "address_id": alice_address
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Another user's address
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&bob),
        Some(json!({
            "items": [{"product_id": product, "quantity": 1}],
            "address_id": alice_address
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown product
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&alice),
        Some(json!({
            "items": [{"product_id": "product:does-not-exist", "quantity": 1}],
            "address_id": alice_address
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delivering_adjusts_stock_and_respects_guards() {
    let state = test_state().await;
    let app = app(&state);

    let (_, user) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, admin) = create_user(&state, "Root", "admin@example.com", Role::Admin).await;
    let product = create_product(&state, "Veg Roll", 40.0, 5).await;
    let address = create_address(&app, &user).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&user),
        Some(json!({
            "items": [{"product_id": product, "quantity": 3}],
            "address_id": address
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["data"][0]["id"].as_str().expect("order id").to_string();

    // Deliver: stock 5 - 3 = 2
    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_id, "delivered": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["delivered"], json!(true));

    let uri = format!("/api/product/{}", product);
    let (_, body) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["data"]["stock"], json!(2));

    // Re-sending the same flag is a no-op: stock unchanged
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_id, "delivered": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["data"]["stock"], json!(2));

    // Manual correction: un-deliver restores the stock
    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_id, "delivered": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["delivered"], json!(false));
    let (_, body) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["data"]["stock"], json!(5));
}

#[tokio::test]
async fn stock_never_goes_below_zero() {
    let state = test_state().await;
    let app = app(&state);

    let (_, user) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, admin) = create_user(&state, "Root", "admin@example.com", Role::Admin).await;
    let product = create_product(&state, "Samosa", 15.0, 2).await;
    let address = create_address(&app, &user).await;

    let (_, body) = request(
        &app,
        Method::POST,
        "/api/order/cash-on-delivery",
        Some(&user),
        Some(json!({
            "items": [{"product_id": product, "quantity": 10}],
            "address_id": address
        })),
    )
    .await;
    let order_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_id, "delivered": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/product/{}", product);
    let (_, body) = request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["data"]["stock"], json!(0));
}

#[tokio::test]
async fn cancel_rules_are_enforced() {
    let state = test_state().await;
    let app = app(&state);

    let (_, user) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, stranger) = create_user(&state, "Mallory", "m@example.com", Role::User).await;
    let (_, admin) = create_user(&state, "Root", "admin@example.com", Role::Admin).await;
    let product = create_product(&state, "Veg Roll", 40.0, 10).await;
    let address = create_address(&app, &user).await;

    let place_order = |qty: u32| {
        let app = &app;
        let user = &user;
        let product = product.clone();
        let address = address.clone();
        async move {
            let (_, body) = request(
                app,
                Method::POST,
                "/api/order/cash-on-delivery",
                Some(user),
                Some(json!({
                    "items": [{"product_id": product, "quantity": qty}],
                    "address_id": address
                })),
            )
            .await;
            body["data"][0]["id"].as_str().unwrap().to_string()
        }
    };

    // A stranger cannot cancel someone else's order
    let order_a = place_order(1).await;
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/cancel",
        Some(&stranger),
        Some(json!({"order_id": order_a, "reason": "not mine"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner can, and the reason is stored
    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/order/cancel",
        Some(&user),
        Some(json!({"order_id": order_a, "reason": "changed my mind"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cancelled"], json!(true));
    assert_eq!(body["data"]["cancel_reason"], json!("changed my mind"));

    // Cancelling twice fails
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/cancel",
        Some(&user),
        Some(json!({"order_id": order_a})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // A cancelled order cannot be delivered
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_a, "delivered": true})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // A delivered order cannot be cancelled
    let order_b = place_order(1).await;
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": order_b, "delivered": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(
        &app,
        Method::PUT,
        "/api/order/cancel",
        Some(&admin),
        Some(json!({"order_id": order_b})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_list_groups_pending_delivered_cancelled() {
    let state = test_state().await;
    let app = app(&state);

    let (_, user) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, admin) = create_user(&state, "Root", "admin@example.com", Role::Admin).await;
    let product = create_product(&state, "Veg Roll", 40.0, 50).await;
    let address = create_address(&app, &user).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, body) = request(
            &app,
            Method::POST,
            "/api/order/cash-on-delivery",
            Some(&user),
            Some(json!({
                "items": [{"product_id": product, "quantity": 1}],
                "address_id": address
            })),
        )
        .await;
        ids.push(body["data"][0]["id"].as_str().unwrap().to_string());
    }

    // Deliver the first, cancel the second, leave the third pending
    request(
        &app,
        Method::PUT,
        "/api/order/admin/update-delivered",
        Some(&admin),
        Some(json!({"order_id": ids[0], "delivered": true})),
    )
    .await;
    request(
        &app,
        Method::PUT,
        "/api/order/cancel",
        Some(&admin),
        Some(json!({"order_id": ids[1]})),
    )
    .await;

    let (status, body) =
        request(&app, Method::GET, "/api/order/admin/all", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0]["id"], json!(ids[2].as_str())); // pending
    assert_eq!(orders[1]["id"], json!(ids[0].as_str())); // delivered
    assert_eq!(orders[2]["id"], json!(ids[1].as_str())); // cancelled

    // Each row carries the customer's details
    assert_eq!(orders[0]["user_details"]["email"], json!("alice@example.com"));
}
