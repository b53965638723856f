use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a named store of money tracked by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance: f64,
}

impl Account {
    /// Creates a new account with the provided kind and opening balance.
    pub fn new(name: impl Into<String>, kind: AccountKind, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance,
        }
    }
}

/// Enumerates the supported account classifications.
///
/// The kind is informational only; ledger math never depends on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Bank,
    Wallet,
    Cash,
    Portfolio,
    StockPortfolio,
}

impl AccountKind {
    pub const ALL: [AccountKind; 5] = [
        AccountKind::Bank,
        AccountKind::Wallet,
        AccountKind::Cash,
        AccountKind::Portfolio,
        AccountKind::StockPortfolio,
    ];
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Bank => "Bank",
            AccountKind::Wallet => "Wallet",
            AccountKind::Cash => "Cash",
            AccountKind::Portfolio => "Portfolio",
            AccountKind::StockPortfolio => "Stock Portfolio",
        };
        f.write_str(label)
    }
}
