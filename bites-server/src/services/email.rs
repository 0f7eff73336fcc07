//! Transactional email
//!
//! Sends order confirmations through the Resend HTTP API. When no API
//! key is configured the client is simply not constructed and the email
//! channel stays silent.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email request failed: {0}")]
    Request(String),

    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
}

/// Outgoing email seam; the notifier tests swap in a mock here
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl EmailClient {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let body = SendRequest {
            from: &self.from,
            to: vec![to],
            subject,
            html,
        };

        let response = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected(format!("{}: {}", status, text)));
        }

        Ok(())
    }
}
