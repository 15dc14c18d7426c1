//! HTTP adapter: application state, routers, and middleware.

pub mod auth;
pub mod billing;
pub mod error;
pub mod mail;
pub mod middleware;
pub mod workspace;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::application::handlers::auth::CompleteSignInHandler;
use crate::application::handlers::billing::{
    CreateCheckoutHandler, HandlePaymentWebhookHandler, PlanPrices,
};
use crate::application::handlers::mail::{GetInboxHandler, GetWorkspaceEmailsHandler};
use crate::application::handlers::workspace::{
    CreateListHandler, CreateWorkspaceHandler, DeleteWorkspaceHandler, GetWorkspaceHandler,
    ListWorkspacesHandler, RemoveListHandler,
};
use crate::ports::{
    IdentityProvider, MailProvider, PaymentProvider, SessionValidator, TokenIssuer,
    TransactionRepository, UserRepository, WorkspaceRepository,
};

/// Shared application state: Arc-wrapped ports plus the few config values
/// the use cases need. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub mail_provider: Arc<dyn MailProvider>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub user_repository: Arc<dyn UserRepository>,
    pub workspace_repository: Arc<dyn WorkspaceRepository>,
    pub transaction_repository: Arc<dyn TransactionRepository>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub allowed_domain: String,
    pub admin_email: String,
    pub prices: PlanPrices,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn complete_sign_in_handler(&self) -> CompleteSignInHandler {
        CompleteSignInHandler::new(
            self.identity_provider.clone(),
            self.user_repository.clone(),
            self.token_issuer.clone(),
            self.allowed_domain.clone(),
            self.admin_email.clone(),
        )
    }

    pub fn create_workspace_handler(&self) -> CreateWorkspaceHandler {
        CreateWorkspaceHandler::new(self.workspace_repository.clone())
    }

    pub fn list_workspaces_handler(&self) -> ListWorkspacesHandler {
        ListWorkspacesHandler::new(self.workspace_repository.clone())
    }

    pub fn get_workspace_handler(&self) -> GetWorkspaceHandler {
        GetWorkspaceHandler::new(self.workspace_repository.clone())
    }

    pub fn delete_workspace_handler(&self) -> DeleteWorkspaceHandler {
        DeleteWorkspaceHandler::new(self.workspace_repository.clone())
    }

    pub fn create_list_handler(&self) -> CreateListHandler {
        CreateListHandler::new(
            self.user_repository.clone(),
            self.workspace_repository.clone(),
            self.mail_provider.clone(),
        )
    }

    pub fn remove_list_handler(&self) -> RemoveListHandler {
        RemoveListHandler::new(self.workspace_repository.clone())
    }

    pub fn get_inbox_handler(&self) -> GetInboxHandler {
        GetInboxHandler::new(self.user_repository.clone(), self.mail_provider.clone())
    }

    pub fn get_workspace_emails_handler(&self) -> GetWorkspaceEmailsHandler {
        GetWorkspaceEmailsHandler::new(
            self.user_repository.clone(),
            self.workspace_repository.clone(),
            self.mail_provider.clone(),
        )
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.user_repository.clone(),
            self.transaction_repository.clone(),
            self.payment_provider.clone(),
            self.prices.clone(),
        )
    }

    pub fn handle_payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.user_repository.clone(),
            self.transaction_repository.clone(),
            self.payment_provider.clone(),
        )
    }
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

/// Assemble the complete application router.
///
/// The auth middleware runs on every route; it injects the caller when a
/// valid Bearer token is present and otherwise passes through, leaving
/// enforcement to the `RequireAuth` extractor so the public routes
/// (login/callback/webhook/healthz) stay open.
pub fn app_router(state: AppState) -> Router {
    let validator = state.session_validator.clone();

    Router::new()
        .merge(auth::auth_routes())
        .merge(mail::mail_routes())
        .merge(workspace::workspace_routes())
        .merge(billing::billing_routes())
        .route("/healthz", get(healthz))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::application::handlers::test_support::{
        MockMailProvider, MockTransactionRepository, MockUserRepository,
        MockWorkspaceRepository,
    };
    use crate::domain::foundation::AuthenticatedUser;
    use crate::domain::user::{IdentityProfile, User};
    use crate::ports::{
        CheckoutSession, CreateCheckoutRequest, IdentityError, IdentityExchange, PaymentError,
        WebhookEvent,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct StubIdentityProvider;

    #[async_trait]
    impl IdentityProvider for StubIdentityProvider {
        fn authorize_url(&self) -> String {
            "https://accounts.example/auth".to_string()
        }

        async fn exchange_code(&self, _code: &str) -> Result<IdentityExchange, IdentityError> {
            Err(IdentityError::exchange_failed("stub"))
        }
    }

    struct StubPaymentProvider;

    #[async_trait]
    impl PaymentProvider for StubPaymentProvider {
        async fn create_checkout_session(
            &self,
            _request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Err(PaymentError::provider("stub"))
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            Err(PaymentError::invalid_webhook("stub"))
        }
    }

    struct StubTokenIssuer;

    impl TokenIssuer for StubTokenIssuer {
        fn issue(
            &self,
            _user: &crate::domain::user::User,
        ) -> Result<crate::ports::IssuedToken, crate::domain::foundation::AuthError> {
            Ok(crate::ports::IssuedToken {
                token: "stub".to_string(),
                expires_in_secs: 3600,
            })
        }
    }

    fn test_state() -> AppState {
        // "valid-token" resolves to a user that exists in the repository.
        let user = User::from_exchange(
            IdentityProfile {
                provider_id: "google-123".to_string(),
                email: "alice@gmail.com".to_string(),
                display_name: "Alice".to_string(),
                profile_image: None,
            },
            "at",
            "rt",
            "admin@gmail.com",
        )
        .unwrap();
        let caller = AuthenticatedUser::new(user.id, user.email.clone(), user.is_admin);

        AppState {
            identity_provider: Arc::new(StubIdentityProvider),
            mail_provider: Arc::new(MockMailProvider::with_emails(vec![])),
            payment_provider: Arc::new(StubPaymentProvider),
            user_repository: Arc::new(MockUserRepository::with_user(user)),
            workspace_repository: Arc::new(MockWorkspaceRepository::default()),
            transaction_repository: Arc::new(MockTransactionRepository::default()),
            token_issuer: Arc::new(StubTokenIssuer),
            session_validator: Arc::new(
                MockSessionValidator::new().with_user("valid-token", caller),
            ),
            allowed_domain: "gmail.com".to_string(),
            admin_email: "admin@gmail.com".to_string(),
            prices: PlanPrices {
                monthly_price_id: "price_monthly".to_string(),
                yearly_price_id: "price_yearly".to_string(),
                success_url: "http://localhost:3000/success".to_string(),
                cancel_url: "http://localhost:3000/".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn router_mounts_healthz() {
        let app = app_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn workspace_routes_require_a_bearer_token() {
        let app = app_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/workspaces")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_workspace_listing() {
        let app = app_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/workspaces")
                    .header("Authorization", "Bearer valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn list_creation_route_is_mounted() {
        let app = app_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/workspaces/Friends/lists/Alice")
                    .header("Authorization", "Bearer valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_by_middleware() {
        let app = app_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/workspaces")
                    .header("Authorization", "Bearer forged-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn state_builds_every_handler() {
        let state = test_state();
        let _ = state.complete_sign_in_handler();
        let _ = state.create_workspace_handler();
        let _ = state.list_workspaces_handler();
        let _ = state.get_workspace_handler();
        let _ = state.delete_workspace_handler();
        let _ = state.create_list_handler();
        let _ = state.remove_list_handler();
        let _ = state.get_inbox_handler();
        let _ = state.get_workspace_emails_handler();
        let _ = state.create_checkout_handler();
        let _ = state.handle_payment_webhook_handler();
    }
}
