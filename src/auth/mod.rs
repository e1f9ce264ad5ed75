//! API key authorization.
//!
//! Every protected request carries an `x-api-key` header that must match a
//! single shared key held in the external secret store. The gate resolves
//! that key at most once per process (the credential cache) and compares it
//! against the presented header value.
//!
//! # Fail-closed
//!
//! No failure on the resolution path ever escapes [`AuthGate::is_authorized`].
//! Missing configuration, a missing secret, a malformed payload, and a
//! transport failure all fold into a plain `false`. Callers can never tell
//! a broken secret store apart from a wrong key, and an infrastructure
//! failure can never be read as "allow".

pub mod secret;

use std::sync::{Arc, RwLock};

use axum::http::HeaderMap;
use serde::Deserialize;

use secret::{SecretSource, SecretSourceError};

/// Header carrying the API key. `HeaderMap` lookups are case-insensitive.
const API_KEY_HEADER: &str = "x-api-key";

/// Failure resolving the expected API key.
///
/// These are internal to the gate: [`AuthGate::is_authorized`] maps every
/// variant to a denial. Keeping them as distinct variants lets tests pin
/// down which step of resolution failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No secret identifier configured (`API_KEY_SECRET_NAME` unset).
    #[error("API_KEY_SECRET_NAME is not configured")]
    Configuration,

    /// The store has no payload for the configured identifier.
    #[error("secret store returned no payload for the configured secret")]
    SecretUnavailable,

    /// The payload exists but is not JSON with a non-empty `apiKey` field.
    #[error("secret payload is missing the apiKey field")]
    MalformedSecret,

    /// The store could not be reached at all.
    #[error(transparent)]
    Transport(#[from] SecretSourceError),
}

/// Shape of the secret payload. Only the `apiKey` field matters.
#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

/// Process-lifetime cache for the resolved API key.
///
/// The slot moves from unresolved to resolved exactly once; there is no
/// invalidation or expiry, so rotating the secret requires a restart.
/// Concurrent first resolutions may each hit the store; they all write the
/// same value, so no coordination around the fetch is needed. The lock is
/// never held across an await.
#[derive(Debug, Default)]
struct CredentialCache {
    slot: RwLock<Option<String>>,
}

impl CredentialCache {
    fn get(&self) -> Option<String> {
        self.slot.read().expect("credential cache lock poisoned").clone()
    }

    /// Store a resolved key, first successful write wins. Returns the value
    /// the cache settled on so races still compare against one key.
    fn store(&self, key: String) -> String {
        let mut slot = self.slot.write().expect("credential cache lock poisoned");
        slot.get_or_insert(key).clone()
    }
}

/// Decides, per request, whether the caller may proceed.
///
/// One gate is built at startup and shared through the application state.
/// The cache lives inside the gate, so tests get deterministic behavior by
/// constructing a fresh gate per test instead of sharing process globals.
pub struct AuthGate {
    secret_name: Option<String>,
    source: Arc<dyn SecretSource>,
    cache: CredentialCache,
}

impl AuthGate {
    /// Build a gate over `source`.
    ///
    /// `secret_name` is optional on purpose: its absence is not a startup
    /// error but a per-request denial, surfaced as
    /// [`AuthError::Configuration`] when resolution is first attempted.
    pub fn new(secret_name: Option<String>, source: Arc<dyn SecretSource>) -> Self {
        Self {
            secret_name,
            source,
            cache: CredentialCache::default(),
        }
    }

    /// Resolve the expected API key, consulting the cache first.
    ///
    /// # Resolution steps
    ///
    /// 1. Cache hit: return it, no I/O.
    /// 2. No configured secret identifier: `Configuration`.
    /// 3. Fetch from the store; transport failures propagate as `Transport`.
    /// 4. Missing or empty payload: `SecretUnavailable`.
    /// 5. Payload not JSON, or `apiKey` absent/empty: `MalformedSecret`.
    /// 6. Success: cache the key for the remainder of the process.
    ///
    /// A failed attempt leaves the cache untouched, so a later request
    /// retries once the store recovers.
    async fn resolve_expected_key(&self) -> Result<String, AuthError> {
        if let Some(key) = self.cache.get() {
            return Ok(key);
        }

        let secret_name = self.secret_name.as_deref().ok_or(AuthError::Configuration)?;

        let payload = self
            .source
            .get_secret(secret_name)
            .await?
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::SecretUnavailable)?;

        let parsed: SecretPayload =
            serde_json::from_str(&payload).map_err(|_| AuthError::MalformedSecret)?;

        let key = parsed
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(AuthError::MalformedSecret)?;

        Ok(self.cache.store(key))
    }

    /// Decide whether the request presenting `headers` may proceed.
    ///
    /// Requests without an `x-api-key` header are rejected before touching
    /// the cache or the store, so anonymous traffic never triggers a
    /// secret-store call. Comparison is exact string equality; it is not
    /// constant-time (see DESIGN.md).
    pub async fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let presented = match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
            Some(value) => value,
            None => return false,
        };

        match self.resolve_expected_key().await {
            Ok(expected) => presented == expected,
            Err(err) => {
                // The cause is logged but never reaches the response
                tracing::warn!("API key resolution failed, denying request: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// What the stub store should do on the next call.
    enum Behavior {
        Payload(Option<String>),
        Fail,
    }

    /// Scripted secret store recording how often it was called.
    struct StubSource {
        behavior: Mutex<Behavior>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn with_payload(payload: &str) -> Arc<Self> {
            Arc::new(Self {
                behavior: Mutex::new(Behavior::Payload(Some(payload.to_string()))),
                calls: AtomicUsize::new(0),
            })
        }

        fn missing() -> Arc<Self> {
            Arc::new(Self {
                behavior: Mutex::new(Behavior::Payload(None)),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                behavior: Mutex::new(Behavior::Fail),
                calls: AtomicUsize::new(0),
            })
        }

        fn set_payload(&self, payload: &str) {
            *self.behavior.lock().unwrap() = Behavior::Payload(Some(payload.to_string()));
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SecretSource for StubSource {
        async fn get_secret(&self, _id: &str) -> Result<Option<String>, SecretSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &*self.behavior.lock().unwrap() {
                Behavior::Payload(payload) => Ok(payload.clone()),
                Behavior::Fail => Err(SecretSourceError::Transport("connection refused".into())),
            }
        }
    }

    fn gate(source: Arc<StubSource>) -> AuthGate {
        AuthGate::new(Some("classifieds/api-key".to_string()), source)
    }

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(key).unwrap());
        headers
    }

    #[tokio::test]
    async fn missing_header_denies_without_calling_store() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = gate(source.clone());

        assert!(!gate.is_authorized(&HeaderMap::new()).await);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn matching_key_is_authorized() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = gate(source.clone());

        assert!(gate.is_authorized(&headers_with_key("secret123")).await);
    }

    #[tokio::test]
    async fn wrong_key_is_denied() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = gate(source.clone());

        assert!(!gate.is_authorized(&headers_with_key("wrong")).await);
        // Near-miss keys are denied too, equality is byte-for-byte
        assert!(!gate.is_authorized(&headers_with_key("secret123 ")).await);
        assert!(!gate.is_authorized(&headers_with_key("Secret123")).await);
    }

    #[tokio::test]
    async fn header_lookup_is_case_insensitive() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = gate(source.clone());

        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", HeaderValue::from_static("secret123"));
        assert!(gate.is_authorized(&headers).await);
    }

    #[tokio::test]
    async fn resolution_result_is_cached_for_the_process() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = gate(source.clone());

        assert!(gate.is_authorized(&headers_with_key("secret123")).await);
        assert!(gate.is_authorized(&headers_with_key("secret123")).await);
        assert!(!gate.is_authorized(&headers_with_key("wrong")).await);

        // Three authorization checks, one underlying fetch
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn unconfigured_secret_name_denies_without_calling_store() {
        let source = StubSource::with_payload(r#"{"apiKey":"secret123"}"#);
        let gate = AuthGate::new(None, source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::Configuration));

        assert!(!gate.is_authorized(&headers_with_key("abc")).await);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn missing_payload_denies() {
        let source = StubSource::missing();
        let gate = gate(source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::SecretUnavailable));
        assert!(!gate.is_authorized(&headers_with_key("secret123")).await);
    }

    #[tokio::test]
    async fn empty_payload_denies() {
        let source = StubSource::with_payload("");
        let gate = gate(source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::SecretUnavailable));
    }

    #[tokio::test]
    async fn payload_without_api_key_field_denies() {
        let source = StubSource::with_payload("{}");
        let gate = gate(source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedSecret));
        assert!(!gate.is_authorized(&headers_with_key("anything")).await);
    }

    #[tokio::test]
    async fn non_json_payload_denies() {
        let source = StubSource::with_payload("not json");
        let gate = gate(source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedSecret));
    }

    #[tokio::test]
    async fn empty_api_key_field_denies() {
        let source = StubSource::with_payload(r#"{"apiKey":""}"#);
        let gate = gate(source.clone());

        let err = gate.resolve_expected_key().await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedSecret));
        assert!(!gate.is_authorized(&headers_with_key("")).await);
    }

    #[tokio::test]
    async fn transport_failure_denies_without_panicking() {
        let source = StubSource::failing();
        let gate = gate(source.clone());

        assert!(!gate.is_authorized(&headers_with_key("secret123")).await);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn failed_resolution_does_not_poison_the_cache() {
        let source = StubSource::failing();
        let gate = gate(source.clone());

        // First attempt fails and is denied
        assert!(!gate.is_authorized(&headers_with_key("secret123")).await);

        // Store recovers; the next request resolves and is allowed
        source.set_payload(r#"{"apiKey":"secret123"}"#);
        assert!(gate.is_authorized(&headers_with_key("secret123")).await);
        assert_eq!(source.calls(), 2);

        // And the successful resolution is now cached
        assert!(gate.is_authorized(&headers_with_key("secret123")).await);
        assert_eq!(source.calls(), 2);
    }
}
