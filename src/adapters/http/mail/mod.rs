//! Mailbox HTTP module.

mod handlers;
mod routes;

pub use routes::mail_routes;
