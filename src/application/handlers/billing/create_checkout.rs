//! CreateCheckoutHandler - start the hosted checkout flow.

use std::sync::Arc;

use crate::domain::billing::PlanType;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentProvider, TransactionRepository,
    UserRepository,
};

/// Command to create a checkout session for the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,

    /// Caller-chosen price identifier; must match a configured plan price.
    pub price_id: String,
}

/// Price identifiers the product sells, resolved from configuration.
#[derive(Debug, Clone)]
pub struct PlanPrices {
    pub monthly_price_id: String,
    pub yearly_price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl PlanPrices {
    /// Resolve a caller-supplied price identifier to a plan.
    fn resolve(&self, price_id: &str) -> Option<PlanType> {
        if price_id == self.monthly_price_id {
            Some(PlanType::Monthly)
        } else if price_id == self.yearly_price_id {
            Some(PlanType::Yearly)
        } else {
            None
        }
    }
}

/// Handler creating a hosted checkout session.
///
/// The user id and resolved plan ride along as opaque metadata so the
/// completion webhook can attribute the payment. Users with an existing
/// transaction are rejected up front: payment is a one-time gate.
pub struct CreateCheckoutHandler {
    user_repository: Arc<dyn UserRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    prices: PlanPrices,
}

impl CreateCheckoutHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        prices: PlanPrices,
    ) -> Self {
        Self {
            user_repository,
            transaction_repository,
            payment_provider,
            prices,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CheckoutSession, DomainError> {
        let plan = self
            .prices
            .resolve(&cmd.price_id)
            .ok_or_else(|| DomainError::validation("Unknown price identifier"))?;

        if self.transaction_repository.has_any(&cmd.user_id).await? {
            return Err(DomainError::new(
                ErrorCode::AlreadyPaid,
                "A payment is already recorded for this account",
            ));
        }

        let user = self
            .user_repository
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.user_id,
                email: user.email,
                price_id: cmd.price_id,
                plan,
                success_url: self.prices.success_url.clone(),
                cancel_url: self.prices.cancel_url.clone(),
            })
            .await?;

        tracing::info!(user_id = %cmd.user_id, session_id = %session.id, %plan, "Checkout session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::billing::Transaction;
    use crate::domain::user::{IdentityProfile, User};
    use crate::ports::{PaymentError, WebhookEvent};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPaymentProvider {
        requests: Mutex<Vec<CreateCheckoutRequest>>,
    }

    impl MockPaymentProvider {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CreateCheckoutRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            self.requests.lock().unwrap().push(request);
            Ok(CheckoutSession {
                id: "cs_test123".to_string(),
                url: "https://checkout.stripe.com/c/pay/cs_test123".to_string(),
            })
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            Err(PaymentError::invalid_webhook("not used"))
        }
    }

    fn test_user() -> User {
        User::from_exchange(
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
        .unwrap()
    }

    fn prices() -> PlanPrices {
        PlanPrices {
            monthly_price_id: "price_monthly".to_string(),
            yearly_price_id: "price_yearly".to_string(),
            success_url: "http://localhost:3000/success".to_string(),
            cancel_url: "http://localhost:3000/".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_session_with_user_metadata() {
        let user = test_user();
        let user_id = user.id;
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            Arc::new(MockTransactionRepository::default()),
            provider.clone(),
            prices(),
        );

        let session = handler
            .handle(CreateCheckoutCommand {
                user_id,
                price_id: "price_monthly".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.id, "cs_test123");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_id, user_id);
        assert_eq!(requests[0].plan, PlanType::Monthly);
        assert_eq!(requests[0].email, "alice@gmail.com");
    }

    #[tokio::test]
    async fn yearly_price_resolves_to_yearly_plan() {
        let user = test_user();
        let user_id = user.id;
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            Arc::new(MockTransactionRepository::default()),
            provider.clone(),
            prices(),
        );

        handler
            .handle(CreateCheckoutCommand {
                user_id,
                price_id: "price_yearly".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(provider.requests()[0].plan, PlanType::Yearly);
    }

    #[tokio::test]
    async fn unknown_price_is_rejected() {
        let user = test_user();
        let user_id = user.id;
        let handler = CreateCheckoutHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            Arc::new(MockTransactionRepository::default()),
            Arc::new(MockPaymentProvider::new()),
            prices(),
        );

        let err = handler
            .handle(CreateCheckoutCommand {
                user_id,
                price_id: "price_bogus".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn already_paid_user_cannot_start_checkout() {
        let user = test_user();
        let user_id = user.id;
        let existing =
            Transaction::from_completed_checkout(user_id, 2900, "paid", PlanType::Monthly);

        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            Arc::new(MockTransactionRepository::with_transaction(existing)),
            provider.clone(),
            prices(),
        );

        let err = handler
            .handle(CreateCheckoutCommand {
                user_id,
                price_id: "price_monthly".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AlreadyPaid);
        assert!(provider.requests().is_empty());
    }
}
