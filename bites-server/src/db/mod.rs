//! Database Module
//!
//! Embedded SurrealDB storage. RocksDb on disk for the server, Mem for
//! tests. Tables are schemaless; the few invariants that matter (unique
//! email, unique push endpoint) are enforced with indexes defined at
//! startup.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "campusbites";
const DATABASE: &str = "app";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at the given path
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        Self::prepare(db).await
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);

        Ok(Self { db })
    }
}

async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;
         DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
         DEFINE TABLE IF NOT EXISTS address SCHEMALESS;
         DEFINE TABLE IF NOT EXISTS cart_item SCHEMALESS;
         DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS orders_user ON orders FIELDS user;
         DEFINE TABLE IF NOT EXISTS push_subscription SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS push_endpoint ON push_subscription FIELDS endpoint UNIQUE;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;
    Ok(())
}
