//! Immutable transaction records.
//!
//! The transaction kind is a closed tagged enum: every variant structurally
//! carries exactly the account references it needs, so a transfer without a
//! destination or a stock sale without an order cannot be constructed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryRef;

/// An immutable historical record of one financial event.
///
/// For stock transactions `amount` is computed once at construction as
/// `quantity * price_per_share` and is the single source of truth for how
/// much cash moved; the ledger core never recomputes it from the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub kind: TransactionKind,
}

/// The five supported transaction shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income {
        destination_account: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<CategoryRef>,
    },
    Expense {
        source_account: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<CategoryRef>,
    },
    Transfer {
        source_account: Uuid,
        destination_account: Uuid,
    },
    StockBuy {
        source_account: Uuid,
        order: StockOrder,
    },
    StockSell {
        destination_account: Uuid,
        order: StockOrder,
    },
}

/// Share movement details for stock transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockOrder {
    pub symbol: String,
    pub quantity: f64,
    pub price_per_share: f64,
}

impl StockOrder {
    pub fn new(symbol: impl Into<String>, quantity: f64, price_per_share: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            quantity,
            price_per_share,
        }
    }

    /// Cash moved by this order, booked as the transaction amount.
    pub fn cash_amount(&self) -> f64 {
        self.quantity * self.price_per_share
    }
}

impl Transaction {
    fn with_kind(amount: f64, kind: TransactionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            amount,
            notes: None,
            kind,
        }
    }

    pub fn income(amount: f64, destination_account: Uuid, category: Option<CategoryRef>) -> Self {
        Self::with_kind(
            amount,
            TransactionKind::Income {
                destination_account,
                category,
            },
        )
    }

    pub fn expense(amount: f64, source_account: Uuid, category: Option<CategoryRef>) -> Self {
        Self::with_kind(
            amount,
            TransactionKind::Expense {
                source_account,
                category,
            },
        )
    }

    pub fn transfer(amount: f64, source_account: Uuid, destination_account: Uuid) -> Self {
        Self::with_kind(
            amount,
            TransactionKind::Transfer {
                source_account,
                destination_account,
            },
        )
    }

    pub fn stock_buy(source_account: Uuid, order: StockOrder) -> Self {
        let amount = order.cash_amount();
        Self::with_kind(
            amount,
            TransactionKind::StockBuy {
                source_account,
                order,
            },
        )
    }

    pub fn stock_sell(destination_account: Uuid, order: StockOrder) -> Self {
        let amount = order.cash_amount();
        Self::with_kind(
            amount,
            TransactionKind::StockSell {
                destination_account,
                order,
            },
        )
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Account debited by this transaction, when the variant has one.
    pub fn source_account(&self) -> Option<Uuid> {
        match &self.kind {
            TransactionKind::Expense { source_account, .. }
            | TransactionKind::Transfer { source_account, .. }
            | TransactionKind::StockBuy { source_account, .. } => Some(*source_account),
            _ => None,
        }
    }

    /// Account credited by this transaction, when the variant has one.
    pub fn destination_account(&self) -> Option<Uuid> {
        match &self.kind {
            TransactionKind::Income {
                destination_account,
                ..
            }
            | TransactionKind::Transfer {
                destination_account,
                ..
            }
            | TransactionKind::StockSell {
                destination_account,
                ..
            } => Some(*destination_account),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<&CategoryRef> {
        match &self.kind {
            TransactionKind::Income { category, .. }
            | TransactionKind::Expense { category, .. } => category.as_ref(),
            _ => None,
        }
    }

    pub fn stock_order(&self) -> Option<&StockOrder> {
        match &self.kind {
            TransactionKind::StockBuy { order, .. } | TransactionKind::StockSell { order, .. } => {
                Some(order)
            }
            _ => None,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    /// Short label for lists and logs.
    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            TransactionKind::Income { .. } => "Income",
            TransactionKind::Expense { .. } => "Expense",
            TransactionKind::Transfer { .. } => "Transfer",
            TransactionKind::StockBuy { .. } => "Stock Buy",
            TransactionKind::StockSell { .. } => "Stock Sell",
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.2} on {}",
            self.kind_label(),
            self.amount,
            self.date.format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_buy_books_quantity_times_price_as_amount() {
        let txn = Transaction::stock_buy(Uuid::new_v4(), StockOrder::new("nvda", 10.0, 50.0));
        assert_eq!(txn.amount, 500.0);
        assert_eq!(txn.stock_order().unwrap().symbol, "NVDA");
    }

    #[test]
    fn transfer_exposes_both_account_references() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let txn = Transaction::transfer(25.0, from, to);
        assert_eq!(txn.source_account(), Some(from));
        assert_eq!(txn.destination_account(), Some(to));
    }

    #[test]
    fn income_has_no_source_reference() {
        let txn = Transaction::income(10.0, Uuid::new_v4(), None);
        assert!(txn.source_account().is_none());
        assert!(txn.destination_account().is_some());
    }

    #[test]
    fn kind_serializes_with_original_wire_tags() {
        let txn = Transaction::stock_sell(Uuid::new_v4(), StockOrder::new("X", 1.0, 2.0));
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"STOCK_SELL\""), "json: {json}");
    }
}
