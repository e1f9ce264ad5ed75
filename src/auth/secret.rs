//! Secret store client.
//!
//! The expected API key is not kept in the environment; it lives in an
//! external secret store and is fetched once per process. This module
//! defines the store contract (`SecretSource`) and the HTTP-backed
//! implementation used in production.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Failure talking to the secret store.
///
/// The gate never retries these; it converts every failure into a denial.
/// Retry and timeout policy belong to the client implementation.
#[derive(Debug, thiserror::Error)]
pub enum SecretSourceError {
    /// Network or protocol failure reaching the store.
    #[error("secret store transport failure: {0}")]
    Transport(String),
}

/// Contract for fetching a secret payload by identifier.
///
/// # Return values
///
/// - `Ok(Some(payload))` - the store returned a payload string
/// - `Ok(None)` - the store has no entry for this identifier
/// - `Err(_)` - transport failure (timeout, connection refused, 5xx, ...)
///
/// Implementations must be shareable across request handlers, so the trait
/// requires `Send + Sync` and is used behind an `Arc<dyn SecretSource>`.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn get_secret(&self, secret_id: &str) -> Result<Option<String>, SecretSourceError>;
}

/// Envelope returned by the secret store endpoint.
#[derive(Debug, Deserialize)]
struct SecretEnvelope {
    payload: String,
}

/// HTTP-backed secret store client.
///
/// Issues `GET {base_url}/v1/secrets/{id}` and expects a JSON body of the
/// form `{"payload": "..."}`. A 404 means the secret does not exist; every
/// other non-success status is a transport failure.
pub struct HttpSecretSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSecretSource {
    /// Build a client for the store at `base_url`.
    ///
    /// Requests time out after 5 seconds so a hung secret store cannot
    /// stall request handling indefinitely; the gate treats the timeout as
    /// any other failure and denies.
    pub fn new(base_url: Url) -> Result<Self, SecretSourceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| SecretSourceError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl SecretSource for HttpSecretSource {
    async fn get_secret(&self, secret_id: &str) -> Result<Option<String>, SecretSourceError> {
        let url = self
            .base_url
            .join(&format!("v1/secrets/{secret_id}"))
            .map_err(|e| SecretSourceError::Transport(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SecretSourceError::Transport(e.to_string()))?;

        // Missing secret is a distinct outcome, not a transport failure
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(SecretSourceError::Transport(format!(
                "secret store returned status {}",
                response.status()
            )));
        }

        let envelope: SecretEnvelope = response
            .json()
            .await
            .map_err(|e| SecretSourceError::Transport(e.to_string()))?;

        Ok(Some(envelope.payload))
    }
}
