//! Stripe adapters: hosted checkout and webhook verification.

mod checkout;
mod webhook_types;

pub use checkout::StripePaymentAdapter;
pub use webhook_types::{hex_encode, SignatureHeader, SignatureParseError};
