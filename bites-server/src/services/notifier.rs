//! Order notification fan-out
//!
//! Checkout enqueues an event on a bounded channel and returns; a
//! background worker delivers the admin email and the web-push
//! broadcast. Channels that are not configured (no API key, no VAPID
//! key) are skipped silently. A failure on one channel never affects
//! the other, and a failed notification never fails the order.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::{Mutex, mpsc};

use super::email::EmailSender;
use super::push::{PushError, PushGateway};
use crate::db::repository::SubscriptionRepository;

const CHANNEL_CAPACITY: usize = 256;

/// One purchased line inside an order notification
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
}

/// Everything the notifier needs to describe a placed order
#[derive(Debug, Clone)]
pub struct OrderPlaced {
    pub order_ids: Vec<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_mobile: Option<String>,
    pub hostel_name: String,
    pub room_number: String,
    pub items: Vec<OrderLine>,
    pub subtotal: f64,
    pub total: f64,
}

impl OrderPlaced {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[derive(Debug)]
pub enum NotifierEvent {
    OrderPlaced(OrderPlaced),
    /// Admin-triggered delivery check
    Test,
}

/// Payload shape pushed to subscribed admin browsers
#[derive(Serialize)]
struct PushPayload<'a> {
    title: &'a str,
    body: String,
    tag: &'a str,
    data: PushData,
}

#[derive(Serialize, Default)]
struct PushData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_count: Option<u32>,
    timestamp: String,
}

/// Cheap cloneable handle used by request handlers to enqueue events
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<NotifierEvent>,
}

impl Notifier {
    /// Enqueue without blocking the request; a full queue drops the
    /// event with a warning
    pub fn notify(&self, event: NotifierEvent) {
        if let Err(e) = self.tx.try_send(event) {
            tracing::warn!("Notification event dropped: {}", e);
        }
    }
}

/// Background worker draining the event channel
pub struct NotifierWorker {
    rx: mpsc::Receiver<NotifierEvent>,
    subscriptions: SubscriptionRepository,
    push: Option<Arc<dyn PushGateway>>,
    email: Option<Arc<dyn EmailSender>>,
    admin_email: Option<String>,
}

impl NotifierWorker {
    pub async fn run(mut self) {
        tracing::info!("Notifier worker started");
        while let Some(event) = self.rx.recv().await {
            self.dispatch(event).await;
        }
        tracing::info!("Notifier worker stopped");
    }

    async fn dispatch(&self, event: NotifierEvent) {
        match event {
            NotifierEvent::OrderPlaced(order) => {
                let payload = match serde_json::to_string(&PushPayload {
                    title: "New Order Received",
                    body: format!(
                        "New order from {} - \u{20b9}{:.2}",
                        order.customer_name, order.total
                    ),
                    tag: "new-order",
                    data: PushData {
                        order_ids: order.order_ids.clone(),
                        total: Some(order.total),
                        customer: Some(order.customer_name.clone()),
                        item_count: Some(order.item_count()),
                        timestamp: chrono::Utc::now().to_rfc3339(),
                    },
                }) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::error!("Failed to encode push payload: {}", e);
                        return;
                    }
                };

                tokio::join!(self.send_order_email(&order), self.broadcast(&payload));
            }
            NotifierEvent::Test => {
                let payload = match serde_json::to_string(&PushPayload {
                    title: "Test Notification",
                    body: "Push notifications are working".to_string(),
                    tag: "test",
                    data: PushData {
                        timestamp: chrono::Utc::now().to_rfc3339(),
                        ..PushData::default()
                    },
                }) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::error!("Failed to encode push payload: {}", e);
                        return;
                    }
                };
                self.broadcast(&payload).await;
            }
        }
    }

    async fn send_order_email(&self, order: &OrderPlaced) {
        let (Some(email), Some(admin_email)) = (&self.email, &self.admin_email) else {
            return;
        };

        let subject = format!("New order from {}", order.customer_name);
        let html = order_email_html(order);
        match email.send(admin_email, &subject, &html).await {
            Ok(()) => tracing::info!("Order email sent to {}", admin_email),
            Err(e) => tracing::error!("Order email failed: {}", e),
        }
    }

    /// Deliver the payload to every stored subscription, dropping
    /// endpoints the push service reports as gone
    async fn broadcast(&self, payload: &str) {
        let Some(push) = &self.push else {
            return;
        };

        let subs = match self.subscriptions.all().await {
            Ok(subs) => subs,
            Err(e) => {
                tracing::error!("Failed to load push subscriptions: {}", e);
                return;
            }
        };
        if subs.is_empty() {
            tracing::debug!("No push subscriptions registered");
            return;
        }

        let deliveries = subs
            .iter()
            .map(|sub| async move { (sub, push.deliver(sub, payload).await) });
        let results = join_all(deliveries).await;

        let mut sent = 0usize;
        let mut expired = 0usize;
        let mut failed = 0usize;
        for (sub, result) in results {
            match result {
                Ok(()) => sent += 1,
                Err(PushError::Expired) => {
                    expired += 1;
                    if let Err(e) = self.subscriptions.remove_by_endpoint(&sub.endpoint).await {
                        tracing::warn!(
                            "Failed to remove expired subscription {}: {}",
                            sub.masked_endpoint(),
                            e
                        );
                    }
                }
                Err(PushError::Delivery(msg)) => {
                    failed += 1;
                    tracing::warn!("Push to {} failed: {}", sub.masked_endpoint(), msg);
                }
            }
        }

        tracing::info!(sent, expired, failed, "Push broadcast complete");
    }
}

fn order_email_html(order: &OrderPlaced) -> String {
    let mut rows = String::new();
    for item in &order.items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            item.name, item.quantity
        ));
    }
    let mobile = order.customer_mobile.as_deref().unwrap_or("-");
    format!(
        "<h2>New Order Received</h2>\
         <p><b>Customer:</b> {} ({})</p>\
         <p><b>Mobile:</b> {}</p>\
         <p><b>Deliver to:</b> {}, room {}</p>\
         <table border=\"1\" cellpadding=\"4\"><tr><th>Item</th><th>Qty</th></tr>{}</table>\
         <p><b>Subtotal:</b> \u{20b9}{:.2}</p>\
         <p><b>Total:</b> \u{20b9}{:.2}</p>",
        order.customer_name,
        order.customer_email,
        mobile,
        order.hostel_name,
        order.room_number,
        rows,
        order.subtotal,
        order.total
    )
}

/// Notifier service
///
/// Built once at startup; `notifier()` hands out cheap clones for
/// request handlers and `start_background_tasks` launches the worker.
#[derive(Clone)]
pub struct NotifierService {
    notifier: Notifier,
    worker: Arc<Mutex<Option<NotifierWorker>>>,
}

impl NotifierService {
    pub fn new(
        db: Surreal<Db>,
        push: Option<Arc<dyn PushGateway>>,
        email: Option<Arc<dyn EmailSender>>,
        admin_email: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let worker = NotifierWorker {
            rx,
            subscriptions: SubscriptionRepository::new(db),
            push,
            email,
            admin_email,
        };
        Self {
            notifier: Notifier { tx },
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Spawn the delivery worker; a second call is a no-op
    pub async fn start_background_tasks(&self) {
        let Some(worker) = self.worker.lock().await.take() else {
            return;
        };
        tokio::spawn(async move {
            worker.run().await;
        });
        tracing::debug!("Notifier worker spawned");
    }
}
