//! Password-grant token acquisition with token reuse.

use async_trait::async_trait;
use booking_config::GraphConfig;
use booking_core::{BookingError, BookingResult};
use booking_service::CredentialProvider;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// A token is refreshed this long before the identity provider says it
/// expires.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Resource-owner password grant against the configured tenant.
///
/// Missing credentials are reported at token time, never at startup.
pub struct PasswordCredentialProvider {
    client: Client,
    config: GraphConfig,
    cached_token: RwLock<Option<CachedToken>>,
}

impl PasswordCredentialProvider {
    /// Creates a provider for the configured identity provider.
    pub fn new(config: GraphConfig) -> BookingResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                BookingError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a provider with a preconfigured `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, config: GraphConfig) -> Self {
        Self {
            client,
            config,
            cached_token: RwLock::new(None),
        }
    }

    fn credentials(&self) -> BookingResult<(&str, &str)> {
        let username = self.config.username.as_deref().filter(|s| !s.is_empty());
        let password = self.config.password.as_deref().filter(|s| !s.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(BookingError::unauthorized(
                "authentication not configured: set graph.username and graph.password",
            )),
        }
    }

    async fn request_token(&self, username: &str, password: &str) -> BookingResult<TokenResponse> {
        let token_url = self.config.token_url();
        debug!("Requesting access token from {}", token_url);

        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("scope", self.config.scope.as_str()),
            ("username", username),
            ("password", password),
        ];

        let response = self
            .client
            .post(&token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| BookingError::unauthorized(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Identity provider rejected token request with {}", status);
            return Err(BookingError::unauthorized(format!(
                "identity provider rejected credentials ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BookingError::unauthorized(format!("invalid token response: {}", e)))
    }
}

#[async_trait]
impl CredentialProvider for PasswordCredentialProvider {
    async fn access_token(&self) -> BookingResult<String> {
        let (username, password) = self.credentials()?;

        {
            let cache = self.cached_token.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Instant::now() {
                    debug!("Using cached access token");
                    return Ok(cached.token.clone());
                }
            }
        }

        let response = self.request_token(username, password).await?;
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_MARGIN);

        let expires_at = Some(lifetime)
            .filter(|lifetime| !lifetime.is_zero())
            .and_then(|lifetime| Instant::now().checked_add(lifetime));

        match expires_at {
            Some(expires_at) => {
                *self.cached_token.write().await = Some(CachedToken {
                    token: response.access_token.clone(),
                    expires_at,
                });
            }
            None => debug!("Access token lifetime not reusable, skipping cache"),
        }

        info!("Obtained access token (expires in {}s)", response.expires_in);
        Ok(response.access_token)
    }
}
