//! CampusBites Server - campus food ordering backend
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB storage with a repository
//!   layer per table
//! - **Auth** (`auth`): JWT + Argon2 authentication with a USER/ADMIN
//!   role split
//! - **Services** (`services`): background notification fan-out
//!   (email + web push)
//! - **HTTP API** (`api`): RESTful endpoints for the storefront and the
//!   admin console
//!
//! # Module structure
//!
//! ```text
//! bites-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, extractors
//! ├── services/      # notifier, email, push
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, response envelope, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{ApiResponse, AppError, AppResult};

pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load .env and set up logging (file logging in production)
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
    if environment == "production" {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/campusbites".into());
        let log_dir = format!("{}/logs", work_dir);
        let _ = std::fs::create_dir_all(&log_dir);
        init_logger_with_file(Some("info"), Some(&log_dir));
    } else {
        init_logger();
    }
}
