//! Cart Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key, record_ref};
use crate::db::models::CartItem;

const CART_TABLE: &str = "cart_item";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_for_user(&self, user: &RecordId) -> RepoResult<Vec<CartItem>> {
        let items: Vec<CartItem> = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CartItem>> {
        let key = record_key(CART_TABLE, id).to_string();
        let item: Option<CartItem> = self.base.db().select((CART_TABLE, key)).await?;
        Ok(item)
    }

    /// Add a product to the cart, bumping quantity if a line already exists
    pub async fn add(
        &self,
        user: RecordId,
        product: RecordId,
        quantity: u32,
    ) -> RepoResult<CartItem> {
        if quantity == 0 {
            return Err(RepoError::Validation("Quantity must be at least 1".into()));
        }

        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user AND product = $product LIMIT 1")
            .bind(("user", user.to_string()))
            .bind(("product", product.to_string()))
            .await?;
        let existing: Vec<CartItem> = result.take(0)?;

        if let Some(line) = existing.into_iter().next() {
            let id = line
                .id
                .as_ref()
                .map(|id| id.to_string())
                .ok_or_else(|| RepoError::Database("Cart line missing id".into()))?;
            return self.set_quantity(&id, line.quantity + quantity).await;
        }

        let item = CartItem {
            id: None,
            user,
            product,
            quantity,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let created: Option<CartItem> = self.base.db().create(CART_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart item".to_string()))
    }

    pub async fn set_quantity(&self, id: &str, quantity: u32) -> RepoResult<CartItem> {
        if quantity == 0 {
            return Err(RepoError::Validation("Quantity must be at least 1".into()));
        }

        let rid = record_ref(CART_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE type::record($rid) SET quantity = $quantity RETURN AFTER")
            .bind(("rid", rid))
            .bind(("quantity", quantity))
            .await?;
        let items: Vec<CartItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", id)))
    }

    pub async fn remove(&self, id: &str) -> RepoResult<()> {
        let key = record_key(CART_TABLE, id).to_string();
        let deleted: Option<CartItem> = self.base.db().delete((CART_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Cart item {} not found", id)));
        }
        Ok(())
    }

    /// Delete every cart line for a user (post-checkout cleanup)
    pub async fn clear_user(&self, user: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE cart_item WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?;
        Ok(())
    }
}
