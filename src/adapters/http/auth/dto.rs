//! Request/response DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Query string of the provider callback.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code issued by the provider.
    pub code: String,
}

/// Successful sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// Seconds until the token expires.
    pub expires_in_secs: u64,

    /// Whether this exchange created the account.
    pub created: bool,

    pub user: UserResponse,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            profile_image: user.profile_image.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Profile summary for the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,

    /// Whether the account has a recorded payment.
    pub has_paid: bool,
}
