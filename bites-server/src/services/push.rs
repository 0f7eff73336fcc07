//! Web push delivery
//!
//! Thin gateway over the Web Push protocol with VAPID signing. The
//! trait seam exists so the notifier can be exercised in tests without
//! a real push service.

use async_trait::async_trait;
use thiserror::Error;
use web_push::{
    ContentEncoding, HyperWebPushClient, SubscriptionInfo, URL_SAFE_NO_PAD,
    VapidSignatureBuilder, WebPushClient, WebPushError, WebPushMessageBuilder,
};

use crate::db::models::PushSubscription;

#[derive(Error, Debug)]
pub enum PushError {
    /// The push service reported the endpoint gone (410/404); the
    /// subscription should be dropped and never retried
    #[error("Subscription expired")]
    Expired,

    #[error("Push delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn deliver(&self, sub: &PushSubscription, payload: &str) -> Result<(), PushError>;
}

/// VAPID configuration for the push gateway
#[derive(Debug, Clone)]
pub struct VapidConfig {
    /// URL-safe base64 encoded private key
    pub private_key: String,
    /// Contact URI sent to the push service ("mailto:..." or https URL)
    pub subject: String,
}

/// Production gateway backed by the Web Push protocol
pub struct WebPushGateway {
    client: HyperWebPushClient,
    vapid: VapidConfig,
}

impl WebPushGateway {
    pub fn new(vapid: VapidConfig) -> Self {
        Self {
            client: HyperWebPushClient::new(),
            vapid,
        }
    }
}

#[async_trait]
impl PushGateway for WebPushGateway {
    async fn deliver(&self, sub: &PushSubscription, payload: &str) -> Result<(), PushError> {
        let info = SubscriptionInfo::new(
            sub.endpoint.clone(),
            sub.keys.p256dh.clone(),
            sub.keys.auth.clone(),
        );

        let mut sig_builder =
            VapidSignatureBuilder::from_base64(&self.vapid.private_key, URL_SAFE_NO_PAD, &info)
                .map_err(|e| PushError::Delivery(format!("Invalid VAPID key: {}", e)))?;
        sig_builder.add_claim("sub", self.vapid.subject.as_str());
        let signature = sig_builder
            .build()
            .map_err(|e| PushError::Delivery(format!("VAPID signing failed: {}", e)))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload.as_bytes());
        builder.set_vapid_signature(signature);
        let message = builder
            .build()
            .map_err(|e| PushError::Delivery(format!("Message build failed: {}", e)))?;

        match self.client.send(message).await {
            Ok(_) => Ok(()),
            Err(e) => Err(classify(e)),
        }
    }
}

/// Map protocol errors onto the gateway error; gone endpoints (410/404)
/// become `Expired` so the caller drops the subscription
fn classify(err: WebPushError) -> PushError {
    match err {
        WebPushError::EndpointNotValid | WebPushError::EndpointNotFound => PushError::Expired,
        e => PushError::Delivery(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gone_endpoints_map_to_expired() {
        assert!(matches!(
            classify(WebPushError::EndpointNotValid),
            PushError::Expired
        ));
        assert!(matches!(
            classify(WebPushError::EndpointNotFound),
            PushError::Expired
        ));
    }

    #[test]
    fn other_protocol_errors_are_plain_delivery_failures() {
        assert!(matches!(
            classify(WebPushError::Unauthorized),
            PushError::Delivery(_)
        ));
        assert!(matches!(
            classify(WebPushError::PayloadTooLarge),
            PushError::Delivery(_)
        ));
    }
}
