//! Authentication use cases.

mod complete_sign_in;

pub use complete_sign_in::{CompleteSignInCommand, CompleteSignInHandler, CompleteSignInResult};
