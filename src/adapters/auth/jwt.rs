//! Stateless JWT session adapter.
//!
//! Issues and validates HS256 tokens embedding `{sub, email, admin}` with a
//! fixed short expiry. Tokens are self-issued, so validation uses the same
//! shared secret rather than a key-set fetch.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::user::User;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Claims carried in a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject - the internal user ID.
    sub: String,

    /// User's email address.
    email: String,

    /// Admin flag.
    admin: bool,

    /// Expiry timestamp (Unix epoch seconds).
    exp: i64,

    /// Issued at timestamp.
    iat: i64,
}

/// HS256 session token issuer and validator.
pub struct JwtSessions {
    secret: SecretString,
    token_ttl_secs: u64,
}

impl JwtSessions {
    /// Create from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            token_ttl_secs: config.token_ttl().as_secs(),
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }
}

impl TokenIssuer for JwtSessions {
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            admin: user.is_admin,
            exp: now + self.token_ttl_secs as i64,
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key())
            .map_err(|e| AuthError::ServiceUnavailable(format!("Token signing failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.token_ttl_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessions {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key(), &validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Session token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!(error = %e, "Session token validation failed");
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        let claims = data.claims;
        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Invalid user id in session token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email, claims.admin))
    }
}

impl std::fmt::Debug for JwtSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessions")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::IdentityProfile;

    fn sessions() -> JwtSessions {
        JwtSessions::new(&AuthConfig {
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".to_string()),
            token_ttl_secs: 3600,
        })
    }

    fn test_user(is_admin: bool) -> User {
        let admin_email = if is_admin { "alice@gmail.com" } else { "other@gmail.com" };
        User::from_exchange(
            IdentityProfile {
                provider_id: "google-123".to_string(),
                email: "alice@gmail.com".to_string(),
                display_name: "Alice".to_string(),
                profile_image: None,
            },
            "at",
            "rt",
            admin_email,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn issued_token_validates_back_to_same_user() {
        let sessions = sessions();
        let user = test_user(false);

        let issued = sessions.issue(&user).unwrap();
        assert_eq!(issued.expires_in_secs, 3600);

        let validated = sessions.validate(&issued.token).await.unwrap();
        assert_eq!(validated.id, user.id);
        assert_eq!(validated.email, user.email);
        assert!(!validated.is_admin);
    }

    #[tokio::test]
    async fn admin_flag_round_trips() {
        let sessions = sessions();
        let user = test_user(true);

        let issued = sessions.issue(&user).unwrap();
        let validated = sessions.validate(&issued.token).await.unwrap();
        assert!(validated.is_admin);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = sessions().validate("not.a.token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let other = JwtSessions::new(&AuthConfig {
            jwt_secret: SecretString::new("ffffffffffffffffffffffffffffffff".to_string()),
            token_ttl_secs: 3600,
        });
        let issued = other.issue(&test_user(false)).unwrap();

        let result = sessions().validate(&issued.token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected_as_expired() {
        // jsonwebtoken applies default leeway; back-date well past it.
        let short = JwtSessions {
            secret: SecretString::new("0123456789abcdef0123456789abcdef".to_string()),
            token_ttl_secs: 0,
        };
        let user = test_user(false);

        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            admin: false,
            exp: now - 600,
            iat: now - 4200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &short.encoding_key(),
        )
        .unwrap();

        let result = short.validate(&token).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }
}
