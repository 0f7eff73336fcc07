//! Admin Push Subscription Model
//!
//! Browser-issued web-push endpoints registered by admin devices. The
//! endpoint is the natural key: subscribing again with the same endpoint
//! replaces the stored keys.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Encryption keys issued by the browser push service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Stored admin push subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushSubscription {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub endpoint: String,
    pub keys: SubscriptionKeys,
    pub created_at: String,
}

/// Subscribe payload as sent by the browser's PushManager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreate {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

impl PushSubscription {
    /// Endpoint truncated for logs and the debug endpoint
    pub fn masked_endpoint(&self) -> String {
        const MAX: usize = 50;
        if self.endpoint.len() <= MAX {
            return self.endpoint.clone();
        }
        // The endpoint is client-supplied; the cut must land on a char
        // boundary or the slice panics on multi-byte input
        let mut cut = MAX;
        while !self.endpoint.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &self.endpoint[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(endpoint: &str) -> PushSubscription {
        PushSubscription {
            id: None,
            endpoint: endpoint.to_string(),
            keys: SubscriptionKeys {
                p256dh: "p256dh-key".into(),
                auth: "auth-key".into(),
            },
            created_at: "2026-01-01T10:00:00+00:00".into(),
        }
    }

    #[test]
    fn short_endpoints_are_untouched() {
        let sub = subscription("https://push.example/abc");
        assert_eq!(sub.masked_endpoint(), "https://push.example/abc");
    }

    #[test]
    fn long_endpoints_are_truncated() {
        let sub = subscription(&format!("https://push.example/{}", "a".repeat(80)));
        let masked = sub.masked_endpoint();
        assert_eq!(masked.len(), 53);
        assert!(masked.ends_with("..."));
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        // 21 ASCII bytes + 30 three-byte chars; byte 50 splits a char
        let sub = subscription(&format!("https://push.example/{}", "\u{20b9}".repeat(30)));
        let masked = sub.masked_endpoint();
        assert!(masked.ends_with("..."));
        assert_eq!(masked.len(), 51);
        assert_eq!(masked.chars().filter(|&c| c == '\u{20b9}').count(), 9);
    }
}
