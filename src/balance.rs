//! Balance aggregation and per-friend balance wording.
//!
//! Everything here is derived from the current friend list on demand;
//! nothing is cached.

use crate::models::Friend;

/// Sum of every friend's balance
pub fn total_balance<'a>(friends: impl IntoIterator<Item = &'a Friend>) -> f64 {
    friends.into_iter().map(|f| f.balance).sum()
}

/// Where the user stands with a single friend
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BalanceStatus {
    /// The user owes the friend this (positive) amount
    YouOwe(f64),
    /// The friend owes the user this (positive) amount
    OwesYou(f64),
    Even,
}

impl BalanceStatus {
    pub fn of(balance: f64) -> Self {
        if balance < 0.0 {
            BalanceStatus::YouOwe(balance.abs())
        } else if balance > 0.0 {
            BalanceStatus::OwesYou(balance)
        } else {
            BalanceStatus::Even
        }
    }

    pub fn describe(&self, name: &str) -> String {
        match self {
            BalanceStatus::YouOwe(amount) => format!("You owe {} ${}", name, format_amount(*amount)),
            BalanceStatus::OwesYou(amount) => format!("{} owes you ${}", name, format_amount(*amount)),
            BalanceStatus::Even => format!("You and {} are even", name),
        }
    }
}

/// Whole amounts print without decimals, everything else with two
pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        String::from("0")
    } else if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}
