//! Ports: interfaces between the application core and the outside world.

mod identity_provider;
mod mail_provider;
mod payment_provider;
mod session;
mod transaction_repository;
mod user_repository;
mod workspace_repository;

pub use identity_provider::{
    IdentityError, IdentityErrorCode, IdentityExchange, IdentityProvider,
};
pub use mail_provider::{MailError, MailErrorCode, MailProvider};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use session::{IssuedToken, SessionValidator, TokenIssuer};
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;
pub use workspace_repository::WorkspaceRepository;
