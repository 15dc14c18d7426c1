//! Google OAuth2 identity adapter.
//!
//! Implements the `IdentityProvider` port: builds the authorization URL and
//! exchanges a redirected code for tokens plus an OpenID profile. Nothing
//! else — account creation and session minting live in the application layer.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::GoogleConfig;
use crate::domain::user::IdentityProfile;
use crate::ports::{IdentityError, IdentityExchange, IdentityProvider};

use super::types::{TokenResponse, UserInfo};

/// Scopes requested for sign-in and mailbox access.
const SCOPES: &str = "https://www.googleapis.com/auth/userinfo.profile \
                      https://www.googleapis.com/auth/userinfo.email \
                      https://www.googleapis.com/auth/gmail.readonly \
                      https://www.googleapis.com/auth/gmail.modify";

const DEFAULT_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth2 implementation of `IdentityProvider`.
pub struct GoogleIdentityProvider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    auth_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    http_client: reqwest::Client,
}

impl GoogleIdentityProvider {
    /// Create a provider from configuration with a bounded request timeout.
    pub fn new(config: &GoogleConfig, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: DEFAULT_USERINFO_ENDPOINT.to_string(),
            http_client,
        }
    }

    /// Override endpoints (for testing against a stub server).
    pub fn with_endpoints(
        mut self,
        auth: impl Into<String>,
        token: impl Into<String>,
        userinfo: impl Into<String>,
    ) -> Self {
        self.auth_endpoint = auth.into();
        self.token_endpoint = token.into();
        self.userinfo_endpoint = userinfo.into();
        self
    }

    fn map_request_error(err: reqwest::Error, what: &str) -> IdentityError {
        if err.is_timeout() {
            IdentityError::timeout(format!("{} timed out", what))
        } else {
            IdentityError::exchange_failed(format!("{} failed: {}", what, err))
        }
    }

    async fn fetch_tokens(&self, code: &str) -> Result<TokenResponse, IdentityError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, "Token exchange"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, error = %body, "Google token exchange rejected");
            return Err(IdentityError::exchange_failed(format!(
                "Token endpoint returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::exchange_failed(format!("Invalid token response: {}", e)))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserInfo, IdentityError> {
        let response = self
            .http_client
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, "Userinfo fetch"))?;

        if !response.status().is_success() {
            return Err(IdentityError::exchange_failed(format!(
                "Userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::invalid_profile(format!("Invalid userinfo: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorize_url(&self) -> String {
        let url = reqwest::Url::parse_with_params(
            &self.auth_endpoint,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                // Offline access with forced consent so a refresh token is
                // issued on first grant.
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .expect("Auth endpoint is a valid URL");

        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<IdentityExchange, IdentityError> {
        if code.is_empty() {
            return Err(IdentityError::exchange_failed("Empty authorization code"));
        }

        let tokens = self.fetch_tokens(code).await?;
        let userinfo = self.fetch_profile(&tokens.access_token).await?;

        let email = userinfo
            .email
            .ok_or_else(|| IdentityError::invalid_profile("Profile has no email"))?;

        let profile = IdentityProfile {
            provider_id: userinfo.sub,
            display_name: userinfo.name.unwrap_or_else(|| email.clone()),
            email,
            profile_image: userinfo.picture,
        };

        tracing::debug!(provider_id = %profile.provider_id, "Identity exchange succeeded");

        Ok(IdentityExchange {
            profile,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}

impl std::fmt::Debug for GoogleIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleIdentityProvider")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}
