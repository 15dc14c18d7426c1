//! Google API wire types.
//!
//! These mirror the OAuth2 token endpoint, the OpenID userinfo endpoint, and
//! the Gmail REST resource shapes as they arrive on the wire.

use serde::Deserialize;

/// Response from the OAuth2 token endpoint, for both the authorization-code
/// and refresh-token grants.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Short-lived access token.
    pub access_token: String,

    /// Refresh token; only present on code exchanges with offline consent.
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: i64,
}

/// Profile from the OpenID userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    /// Stable subject identifier.
    pub sub: String,

    pub email: Option<String>,

    pub name: Option<String>,

    /// Profile photo URL.
    pub picture: Option<String>,
}

/// Response of `users.messages.list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListResponse {
    /// Absent entirely when nothing matched.
    pub messages: Option<Vec<MessageRef>>,

    #[serde(default)]
    pub result_size_estimate: Option<u32>,
}

/// One entry in a message list.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRef {
    pub id: String,
}

/// Response of `users.messages.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,

    /// Short plain-text preview of the body.
    pub snippet: Option<String>,

    pub payload: Option<MessagePayload>,
}

/// Message payload carrying the headers.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
}

/// A single RFC 822 header.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

impl Message {
    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref().and_then(|p| {
            p.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        })
    }
}
