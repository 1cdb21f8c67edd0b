//! Subscription plan options.
//!
//! A plan option is an immutable snapshot of one purchasable subscription
//! duration and its price. Options are compared by their effective monthly
//! price so a list of them sorts cheapest-per-month first.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One purchasable subscription option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOption {
    months: i32,
    currency: String,
    amount: i64,
}

impl PlanOption {
    /// Creates a plan option.
    ///
    /// Rejects non-positive durations and amounts — a zero-month plan has
    /// no meaningful monthly price.
    pub fn new(months: i32, currency: impl Into<String>, amount: i64) -> crate::Result<Self> {
        if months < 1 {
            return Err(Error::InvalidPlanOption(format!(
                "duration must be at least one month, got {months}"
            )));
        }
        if amount <= 0 {
            return Err(Error::InvalidPlanOption(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            months,
            currency: currency.into(),
            amount,
        })
    }

    /// Duration in months.
    #[must_use]
    pub fn months(&self) -> i32 {
        self.months
    }

    /// ISO currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Total price in the currency's minor units.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Effective price per month — the comparison key.
    #[must_use]
    pub fn monthly_price(&self) -> f64 {
        self.amount as f64 / f64::from(self.months)
    }
}

impl PartialOrd for PlanOption {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlanOption {
    /// Orders by monthly price; options sharing a monthly price fall back
    /// to the full field tuple so the order stays consistent with `Eq`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.monthly_price()
            .total_cmp(&other.monthly_price())
            .then_with(|| self.months.cmp(&other.months))
            .then_with(|| self.amount.cmp(&other.amount))
            .then_with(|| self.currency.cmp(&other.currency))
    }
}
