use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | /var/lib/campusbites | database and log files |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_EMAIL | (unset) | recipient of order emails |
/// | RESEND_API_KEY | (unset) | email channel disabled when unset |
/// | EMAIL_FROM | CampusBites <orders@campusbites.app> | sender address |
/// | VAPID_PUBLIC_KEY | (unset) | push channel disabled when unset |
/// | VAPID_PRIVATE_KEY | (unset) | URL-safe base64 |
/// | VAPID_SUBJECT | mailto:admin@campusbites.app | VAPID contact |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Notification channels ===
    /// Recipient of order notification emails
    pub admin_email: Option<String>,
    /// Resend API key; the email channel is disabled when unset
    pub resend_api_key: Option<String>,
    /// Sender address for outgoing email
    pub email_from: String,
    /// VAPID public key handed to browsers
    pub vapid_public_key: Option<String>,
    /// VAPID private key; the push channel is disabled when unset
    pub vapid_private_key: Option<String>,
    /// VAPID contact claim
    pub vapid_subject: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/campusbites".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "CampusBites <orders@campusbites.app>".into()),
            vapid_public_key: std::env::var("VAPID_PUBLIC_KEY").ok(),
            vapid_private_key: std::env::var("VAPID_PRIVATE_KEY").ok(),
            vapid_subject: std::env::var("VAPID_SUBJECT")
                .unwrap_or_else(|_| "mailto:admin@campusbites.app".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
