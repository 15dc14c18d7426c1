//! Gmail mail adapter.
//!
//! Implements the `MailProvider` port against the Gmail REST API. Each search
//! refreshes an access token from the stored refresh credential, lists up to
//! a page of matching message ids, then fans the per-message metadata fetches
//! out as unordered concurrent requests joined all-or-nothing: the first
//! failing sibling fails the whole search.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use secrecy::{ExposeSecret, SecretString};

use crate::config::GoogleConfig;
use crate::domain::mail::{EmailSummary, MailQuery};
use crate::ports::{MailError, MailProvider};

use super::types::{Message, MessageListResponse, TokenResponse};

const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_API_BASE_URL: &str = "https://gmail.googleapis.com";

/// Gmail implementation of `MailProvider`.
pub struct GmailMailAdapter {
    client_id: String,
    client_secret: SecretString,
    token_endpoint: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl GmailMailAdapter {
    /// Create an adapter from configuration with a bounded request timeout.
    pub fn new(config: &GoogleConfig, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_client,
        }
    }

    /// Override endpoints (for testing against a stub server).
    pub fn with_endpoints(mut self, token: impl Into<String>, api: impl Into<String>) -> Self {
        self.token_endpoint = token.into();
        self.api_base_url = api.into();
        self
    }

    fn map_request_error(err: reqwest::Error, what: &str) -> MailError {
        if err.is_timeout() {
            MailError::timeout(format!("{} timed out", what))
        } else {
            MailError::provider(format!("{} failed: {}", what, err))
        }
    }

    /// Exchange the stored refresh credential for a fresh access token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, MailError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, "Token refresh"))?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(MailError::credential_rejected(
                "Stored refresh credential was rejected",
            ));
        }
        if !status.is_success() {
            return Err(MailError::provider(format!(
                "Token endpoint returned {}",
                status
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| MailError::provider(format!("Invalid token response: {}", e)))?;

        Ok(tokens.access_token)
    }

    /// List matching message ids, up to `max_results`.
    async fn list_message_ids(
        &self,
        access_token: &str,
        query: &MailQuery,
        max_results: u32,
    ) -> Result<Vec<String>, MailError> {
        let url = format!("{}/gmail/v1/users/me/messages", self.api_base_url);
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("q", query.as_str()), ("maxResults", max_results.as_str())])
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, "Message list"))?;

        if !response.status().is_success() {
            return Err(MailError::provider(format!(
                "Message list returned {}",
                response.status()
            )));
        }

        let list: MessageListResponse = response
            .json()
            .await
            .map_err(|e| MailError::provider(format!("Invalid list response: {}", e)))?;

        Ok(list
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.id)
            .collect())
    }

    /// Fetch one message's headers and snippet.
    async fn fetch_message(
        &self,
        access_token: &str,
        id: &str,
    ) -> Result<EmailSummary, MailError> {
        let url = format!("{}/gmail/v1/users/me/messages/{}", self.api_base_url, id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("format", "metadata"),
                ("metadataHeaders", "Subject"),
                ("metadataHeaders", "From"),
            ])
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, "Message fetch"))?;

        if !response.status().is_success() {
            return Err(MailError::provider(format!(
                "Message {} fetch returned {}",
                id,
                response.status()
            )));
        }

        let message: Message = response
            .json()
            .await
            .map_err(|e| MailError::provider(format!("Invalid message response: {}", e)))?;

        Ok(EmailSummary::from_parts(
            message.id.clone(),
            message.header("Subject").map(str::to_string),
            message.header("From").map(str::to_string),
            message.snippet.clone(),
        ))
    }
}

#[async_trait]
impl MailProvider for GmailMailAdapter {
    async fn search(
        &self,
        refresh_token: &str,
        query: &MailQuery,
        max_results: u32,
    ) -> Result<Vec<EmailSummary>, MailError> {
        let access_token = self.refresh_access_token(refresh_token).await?;
        let ids = self
            .list_message_ids(&access_token, query, max_results)
            .await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(count = ids.len(), query = query.as_str(), "Fetching message details");

        // Scatter/gather: unordered sibling fetches, all-or-nothing join.
        let fetches = ids.iter().map(|id| self.fetch_message(&access_token, id));
        try_join_all(fetches).await
    }
}

impl std::fmt::Debug for GmailMailAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailMailAdapter")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_adapter() -> GmailMailAdapter {
        let config = GoogleConfig {
            client_id: "client-id".to_string(),
            client_secret: SecretString::new("client-secret".to_string()),
            redirect_uri: "http://localhost:8080/auth/callback".to_string(),
            allowed_domain: "gmail.com".to_string(),
            admin_email: "admin@gmail.com".to_string(),
        };
        GmailMailAdapter::new(&config, Duration::from_secs(5))
    }

    #[test]
    fn endpoints_default_to_google() {
        let adapter = test_adapter();
        assert_eq!(adapter.token_endpoint, DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(adapter.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn endpoints_can_be_overridden() {
        let adapter =
            test_adapter().with_endpoints("http://localhost:9999/token", "http://localhost:9999");
        assert_eq!(adapter.token_endpoint, "http://localhost:9999/token");
        assert_eq!(adapter.api_base_url, "http://localhost:9999");
    }

    #[test]
    fn adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GmailMailAdapter>();
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let output = format!("{:?}", test_adapter());
        assert!(!output.contains("client-secret"));
    }
}
