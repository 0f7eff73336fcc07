//! Product Repository

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key, record_ref};
use crate::db::models::{Product, ProductCreate, ProductUpdate};

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all published products, newest first
    pub async fn find_all_published(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE publish = true ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = record_key(PRODUCT_TABLE, id).to_string();
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, key)).await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Product name is required".into()));
        }

        let product = Product {
            id: None,
            name: data.name,
            image: data.image.unwrap_or_default(),
            category: data.category,
            sub_category: data.sub_category,
            stock: data.stock.unwrap_or(0).max(0),
            price: data.price.unwrap_or(0.0),
            discount: data.discount.unwrap_or(0),
            description: data.description.unwrap_or_default(),
            more_details: data.more_details.unwrap_or_else(HashMap::new),
            publish: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created: Option<Product> = self.base.db().create(PRODUCT_TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product; only the provided fields change
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = record_ref(PRODUCT_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.sub_category.is_some() {
            set_parts.push("sub_category = $sub_category");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.discount.is_some() {
            set_parts.push("discount = $discount");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.more_details.is_some() {
            set_parts.push("more_details = $more_details");
        }
        if data.publish.is_some() {
            set_parts.push("publish = $publish");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::record($rid) SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self.base.db().query(query_str).bind(("rid", rid));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.category {
            let refs: Vec<String> = v.iter().map(|r| r.to_string()).collect();
            query = query.bind(("category", refs));
        }
        if let Some(v) = data.sub_category {
            let refs: Vec<String> = v.iter().map(|r| r.to_string()).collect();
            query = query.bind(("sub_category", refs));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v.max(0)));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.discount {
            query = query.bind(("discount", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.more_details {
            query = query.bind(("more_details", serde_json::to_value(&v).unwrap_or_default()));
        }
        if let Some(v) = data.publish {
            query = query.bind(("publish", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(PRODUCT_TABLE, id).to_string();
        let deleted: Option<Product> = self.base.db().delete((PRODUCT_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Apply a signed stock delta, floored at zero, in one atomic update
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> RepoResult<Product> {
        let rid = record_ref(PRODUCT_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE type::record($rid) SET stock = math::max([stock + $delta, 0]) RETURN AFTER")
            .bind(("rid", rid))
            .bind(("delta", delta))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
