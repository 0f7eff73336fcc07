//! Push Subscription Repository
//!
//! Persisted store for admin web-push subscriptions, keyed by endpoint.
//! Expired endpoints (410/404 from the push service) are removed here by
//! the notifier so they are not retried on the next broadcast.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PushSubscription, SubscriptionCreate};

const SUBSCRIPTION_TABLE: &str = "push_subscription";

#[derive(Clone)]
pub struct SubscriptionRepository {
    base: BaseRepository,
}

impl SubscriptionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn all(&self) -> RepoResult<Vec<PushSubscription>> {
        let subs: Vec<PushSubscription> = self
            .base
            .db()
            .query("SELECT * FROM push_subscription ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(subs)
    }

    /// Register a subscription; a re-subscribe with the same endpoint
    /// replaces the stored keys
    pub async fn upsert(&self, data: SubscriptionCreate) -> RepoResult<PushSubscription> {
        if data.endpoint.is_empty() {
            return Err(RepoError::Validation("Invalid subscription data".into()));
        }

        self.base
            .db()
            .query("DELETE push_subscription WHERE endpoint = $endpoint")
            .bind(("endpoint", data.endpoint.clone()))
            .await?;

        let row = PushSubscription {
            id: None,
            endpoint: data.endpoint,
            keys: data.keys,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let created: Option<PushSubscription> = self
            .base
            .db()
            .create(SUBSCRIPTION_TABLE)
            .content(row)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to store subscription".to_string()))
    }

    pub async fn remove_by_endpoint(&self, endpoint: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE push_subscription WHERE endpoint = $endpoint")
            .bind(("endpoint", endpoint.to_string()))
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> RepoResult<usize> {
        Ok(self.all().await?.len())
    }
}
