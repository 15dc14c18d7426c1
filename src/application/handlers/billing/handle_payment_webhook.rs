//! HandlePaymentWebhookHandler - process payment-completion notifications.

use std::sync::Arc;

use crate::domain::billing::{PlanType, Transaction};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{
    PaymentProvider, TransactionRepository, UserRepository, WebhookEvent, WebhookEventData,
    WebhookEventType,
};

/// Command carrying the raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as signed by the provider.
    pub payload: Vec<u8>,

    /// Signature header value.
    pub signature: String,
}

/// Outcome of webhook processing.
///
/// Everything except a signature/parse failure acknowledges the delivery:
/// the provider must not redeliver business-level no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Checkout completed and a transaction was appended.
    PaymentRecorded { user_id: UserId, amount_cents: i64 },

    /// The user already had a transaction; nothing was appended.
    AlreadyPaid,

    /// The embedded user reference did not resolve; nothing was appended.
    UserUnknown,

    /// The payload could not be attributed; nothing was appended.
    Unattributable,

    /// Any event kind other than checkout completion.
    Ignored,
}

/// Handler for payment provider webhooks.
///
/// Signature verification is the trust boundary: an invalid or missing
/// signature short-circuits with an error before the store is touched. Only
/// the checkout-completion kind is acted upon, and the one-time-payment gate
/// rejects a second completion for a user that already paid.
pub struct HandlePaymentWebhookHandler {
    user_repository: Arc<dyn UserRepository>,
    transaction_repository: Arc<dyn TransactionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            user_repository,
            transaction_repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, DomainError> {
        // 1. Authenticate the delivery before trusting a byte of it.
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await?;

        // 2. Only checkout completion drives state.
        match &event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                self.handle_checkout_completed(&event).await
            }
            WebhookEventType::Other(kind) => {
                tracing::debug!(event_id = %event.id, %kind, "Webhook event ignored");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }

    async fn handle_checkout_completed(
        &self,
        event: &WebhookEvent,
    ) -> Result<WebhookOutcome, DomainError> {
        let WebhookEventData::Checkout {
            session_id,
            user_id,
            plan,
            amount_total,
            payment_status,
        } = &event.data
        else {
            tracing::warn!(event_id = %event.id, "Checkout event carried no checkout data");
            return Ok(WebhookOutcome::Unattributable);
        };

        // Resolve the user reference embedded at session creation.
        let Some(user_id) = user_id.as_deref().and_then(|s| s.parse::<UserId>().ok()) else {
            tracing::warn!(event_id = %event.id, session_id = %session_id, "Checkout metadata has no usable user id");
            return Ok(WebhookOutcome::Unattributable);
        };

        let Some(plan) = plan.as_deref().and_then(PlanType::parse) else {
            tracing::warn!(event_id = %event.id, session_id = %session_id, "Checkout metadata has no usable plan");
            return Ok(WebhookOutcome::Unattributable);
        };

        let user = self.user_repository.find_by_id(&user_id).await?;
        if user.is_none() {
            tracing::warn!(%user_id, session_id = %session_id, "Checkout completed for unknown user");
            return Ok(WebhookOutcome::UserUnknown);
        }

        // One-time-payment gate: a second completion appends nothing.
        if self.transaction_repository.has_any(&user_id).await? {
            tracing::warn!(%user_id, session_id = %session_id, "Duplicate checkout completion ignored");
            return Ok(WebhookOutcome::AlreadyPaid);
        }

        let transaction = Transaction::from_completed_checkout(
            user_id,
            amount_total.unwrap_or(0),
            payment_status.as_deref().unwrap_or("unknown"),
            plan,
        );
        self.transaction_repository.append(&transaction).await?;

        tracing::info!(
            %user_id,
            amount_cents = transaction.amount_cents,
            plan = %transaction.plan,
            "Payment recorded"
        );

        Ok(WebhookOutcome::PaymentRecorded {
            user_id,
            amount_cents: transaction.amount_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockTransactionRepository, MockUserRepository,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::user::{IdentityProfile, User};
    use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError};
    use async_trait::async_trait;

    struct MockPaymentProvider {
        result: Result<WebhookEvent, PaymentError>,
    }

    impl MockPaymentProvider {
        fn with_event(event: WebhookEvent) -> Self {
            Self { result: Ok(event) }
        }

        fn rejecting_signature() -> Self {
            Self {
                result: Err(PaymentError::invalid_webhook("Invalid signature")),
            }
        }
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            _request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Err(PaymentError::provider("not used"))
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            self.result.clone()
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

    fn checkout_completed(user_id: &UserId, amount: i64) -> WebhookEvent {
        WebhookEvent {
            id: "evt_123".to_string(),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: "cs_123".to_string(),
                user_id: Some(user_id.to_string()),
                plan: Some("monthly".to_string()),
                amount_total: Some(amount),
                payment_status: Some("paid".to_string()),
            },
            created_at: 1_704_067_200,
        }
    }

    fn cmd() -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            payload: b"{}".to_vec(),
            signature: "t=0,v1=00".to_string(),
        }
    }

    #[tokio::test]
    async fn valid_completion_appends_exactly_one_transaction() {
        let user = test_user();
        let user_id = user.id;
        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(checkout_completed(
                &user_id, 2900,
            ))),
        );

        let outcome = handler.handle(cmd()).await.unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::PaymentRecorded {
                user_id,
                amount_cents: 2900
            }
        );

        let recorded = transactions.transactions();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount(), 29.00);
        assert_eq!(recorded[0].status, "paid");
        assert_eq!(recorded[0].plan, PlanType::Monthly);
    }

    #[tokio::test]
    async fn invalid_signature_touches_nothing_and_errors() {
        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::default()),
            transactions.clone(),
            Arc::new(MockPaymentProvider::rejecting_signature()),
        );

        let err = handler.handle(cmd()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SignatureInvalid);
        assert!(transactions.transactions().is_empty());
    }

    #[tokio::test]
    async fn second_completion_for_paid_user_appends_nothing() {
        let user = test_user();
        let user_id = user.id;
        let existing =
            Transaction::from_completed_checkout(user_id, 2900, "paid", PlanType::Monthly);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(existing));
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(checkout_completed(
                &user_id, 2900,
            ))),
        );

        let outcome = handler.handle(cmd()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::AlreadyPaid);
        assert_eq!(transactions.transactions().len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_is_acknowledged_without_append() {
        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::default()),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(checkout_completed(
                &UserId::new(),
                2900,
            ))),
        );

        let outcome = handler.handle(cmd()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::UserUnknown);
        assert!(transactions.transactions().is_empty());
    }

    #[tokio::test]
    async fn missing_user_metadata_is_unattributable() {
        let mut event = checkout_completed(&UserId::new(), 2900);
        if let WebhookEventData::Checkout { user_id, .. } = &mut event.data {
            *user_id = None;
        }

        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::default()),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(event)),
        );

        let outcome = handler.handle(cmd()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Unattributable);
        assert!(transactions.transactions().is_empty());
    }

    #[tokio::test]
    async fn other_event_kinds_are_ignored() {
        let event = WebhookEvent {
            id: "evt_other".to_string(),
            event_type: WebhookEventType::Other("invoice.paid".to_string()),
            data: WebhookEventData::Raw {
                json: "{}".to_string(),
            },
            created_at: 1_704_067_200,
        };

        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::default()),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(event)),
        );

        let outcome = handler.handle(cmd()).await.unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert!(transactions.transactions().is_empty());
    }

    #[tokio::test]
    async fn yearly_plan_metadata_sets_yearly_period() {
        let user = test_user();
        let user_id = user.id;
        let mut event = checkout_completed(&user_id, 9900);
        if let WebhookEventData::Checkout { plan, .. } = &mut event.data {
            *plan = Some("yearly".to_string());
        }

        let transactions = Arc::new(MockTransactionRepository::default());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockUserRepository::with_user(user)),
            transactions.clone(),
            Arc::new(MockPaymentProvider::with_event(event)),
        );

        handler.handle(cmd()).await.unwrap();
        assert_eq!(transactions.transactions()[0].plan, PlanType::Yearly);
    }
}
