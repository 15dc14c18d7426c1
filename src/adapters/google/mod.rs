//! Google adapters: OAuth2 identity exchange and Gmail mailbox access.

mod gmail;
mod oauth;
mod types;

pub use gmail::GmailMailAdapter;
pub use oauth::GoogleIdentityProvider;
