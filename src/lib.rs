//! Maildeck - workspace-based Gmail organizer backend.
//!
//! Users sign in with a Google account, file incoming mail into workspaces
//! and lists, and pay for a subscription tier through Stripe hosted checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
