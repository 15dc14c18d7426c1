//! Billing records.
//!
//! Payment history is append-only; the product treats "has any transaction"
//! as "already paid" (a one-time purchase gate). The plan type and
//! subscription end date are recorded for each transaction but renewal is
//! not modeled.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, TransactionId, UserId};

/// Subscription plan purchased at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Monthly,
    Yearly,
}

impl PlanType {
    /// Subscription period length in days.
    pub fn period_days(&self) -> i64 {
        match self {
            PlanType::Monthly => 30,
            PlanType::Yearly => 365,
        }
    }

    /// Parse a stored plan string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(PlanType::Monthly),
            "yearly" => Some(PlanType::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Monthly => write!(f, "monthly"),
            PlanType::Yearly => write!(f, "yearly"),
        }
    }
}

/// A completed payment, appended when the provider confirms checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,

    /// Amount in minor currency units as reported by the provider.
    pub amount_cents: i64,

    /// Provider-reported payment status string (e.g. "paid").
    pub status: String,

    pub plan: PlanType,
    pub occurred_at: Timestamp,
    pub subscription_end: Timestamp,
}

impl Transaction {
    /// Creates a transaction from a completed-checkout notification.
    ///
    /// `amount_cents` arrives in minor currency units; the subscription end is
    /// derived from the plan's period length starting now.
    pub fn from_completed_checkout(
        user_id: UserId,
        amount_cents: i64,
        status: impl Into<String>,
        plan: PlanType,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: TransactionId::new(),
            user_id,
            amount_cents,
            status: status.into(),
            plan,
            occurred_at: now,
            subscription_end: now.add_days(plan.period_days()),
        }
    }

    /// Amount in major currency units (e.g. 2900 -> 29.00).
    pub fn amount(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }
}
