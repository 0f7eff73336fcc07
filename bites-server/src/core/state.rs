use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    EmailClient, EmailSender, NotifierService, PushGateway, VapidConfig, WebPushGateway,
};

/// Shared application state
///
/// Holds the configuration, the embedded database handle and the
/// long-lived services. Cloning is cheap; everything heavyweight sits
/// behind an Arc.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Order notification fan-out
    pub notifier: NotifierService,
}

impl ServerState {
    /// Initialize the state for production use
    ///
    /// Creates the work directory, opens the on-disk database under
    /// `work_dir/database/` and wires the notification channels that
    /// are configured.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be created;
    /// the server cannot run without them.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = PathBuf::from(&config.work_dir).join("database");
        std::fs::create_dir_all(&db_dir).expect("Failed to create work directory structure");

        let db_path = db_dir.join("campusbites.db");
        let db_service = DbService::new(&db_path)
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db_service.db)
    }

    /// State backed by an in-memory database (tests)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::with_db(config.clone(), db_service.db)
    }

    fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let push: Option<Arc<dyn PushGateway>> = match &config.vapid_private_key {
            Some(private_key) => Some(Arc::new(WebPushGateway::new(VapidConfig {
                private_key: private_key.clone(),
                subject: config.vapid_subject.clone(),
            }))),
            None => {
                tracing::info!("VAPID_PRIVATE_KEY not set, push channel disabled");
                None
            }
        };

        let email: Option<Arc<dyn EmailSender>> = match &config.resend_api_key {
            Some(key) => Some(Arc::new(EmailClient::new(
                key.clone(),
                config.email_from.clone(),
            ))),
            None => {
                tracing::info!("RESEND_API_KEY not set, email channel disabled");
                None
            }
        };

        let notifier = NotifierService::new(db.clone(), push, email, config.admin_email.clone());

        Self {
            config,
            db,
            jwt_service,
            notifier,
        }
    }

    /// Launch background tasks; call before serving requests
    pub async fn start_background_tasks(&self) {
        self.notifier.start_background_tasks().await;
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
