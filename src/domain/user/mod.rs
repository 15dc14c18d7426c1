//! User aggregate.
//!
//! A user is created on the first successful identity exchange and owns its
//! workspaces and transaction history exclusively. Credential material is
//! refreshed on later exchanges only when something actually changed, so a
//! repeated sign-in with identical profile data is a no-op write-wise.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Profile returned by the identity provider after a code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProfile {
    /// Provider-issued subject identifier.
    pub provider_id: String,

    /// Verified email address.
    pub email: String,

    /// Display name.
    pub display_name: String,

    /// Profile image URL, if the provider supplied one.
    pub profile_image: Option<String>,
}

impl IdentityProfile {
    /// Returns the domain part of the profile email, if well-formed.
    pub fn email_domain(&self) -> Option<&str> {
        self.email.rsplit_once('@').map(|(_, domain)| domain)
    }

    /// Whether this profile's email belongs to the given domain.
    pub fn is_from_domain(&self, domain: &str) -> bool {
        self.email_domain()
            .map(|d| d.eq_ignore_ascii_case(domain))
            .unwrap_or(false)
    }
}

/// User account with stored provider credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub google_id: String,
    pub email: String,
    pub display_name: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a user from a first-time identity exchange.
    ///
    /// The admin flag is decided here, once, by exact comparison against the
    /// configured admin address; no exposed operation revokes it later.
    pub fn from_exchange(
        profile: IdentityProfile,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        admin_email: &str,
    ) -> Result<Self, ValidationError> {
        if profile.provider_id.is_empty() {
            return Err(ValidationError::empty_field("provider_id"));
        }
        if profile.email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            is_admin: profile.email == admin_email,
            google_id: profile.provider_id,
            email: profile.email,
            display_name: profile.display_name,
            profile_image: profile.profile_image,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a repeat exchange to an existing account.
    ///
    /// Compares profile image, access credential, and refresh credential field
    /// by field; returns `true` when at least one changed and the record needs
    /// persisting. An absent refresh token never clears a stored one (the
    /// provider only re-issues it when consent is re-prompted).
    pub fn refresh_from_exchange(
        &mut self,
        profile: &IdentityProfile,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> bool {
        let mut changed = false;

        if self.profile_image != profile.profile_image {
            self.profile_image = profile.profile_image.clone();
            changed = true;
        }
        if self.access_token != access_token {
            self.access_token = access_token.to_string();
            changed = true;
        }
        if let Some(refresh) = refresh_token {
            if self.refresh_token != refresh {
                self.refresh_token = refresh.to_string();
                changed = true;
            }
        }

        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }
}
