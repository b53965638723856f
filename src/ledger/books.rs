//! The in-memory application state: three collections updated together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, StockHolding, Transaction};
use crate::errors::{FinanceError, Result};

use super::apply;

/// Owns the accounts, transaction history, and stock holdings as one state
/// object. Recording a transaction updates all three in a single in-process
/// step; durable atomicity across files is still the storage layer's
/// documented gap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Books {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub holdings: Vec<StockHolding>,
}

impl Books {
    pub fn new(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        holdings: Vec<StockHolding>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            holdings,
        }
    }

    /// Applies the transaction to accounts and holdings and appends it to the
    /// history. Input validation happens before this point; the core itself
    /// accepts any well-formed transaction.
    pub fn record(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        let (accounts, holdings) = apply(&self.accounts, &self.holdings, &transaction);
        self.accounts = accounts;
        self.holdings = holdings;
        self.transactions.push(transaction);
        id
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_name(&self, id: Uuid) -> String {
        self.account(id)
            .map(|account| account.name.clone())
            .unwrap_or_else(|| "Unknown account".to_string())
    }

    /// Replaces the account with the same id.
    pub fn update_account(&mut self, updated: Account) -> Result<()> {
        let slot = self
            .accounts
            .iter_mut()
            .find(|account| account.id == updated.id)
            .ok_or_else(|| FinanceError::AccountNotFound(updated.id.to_string()))?;
        *slot = updated;
        Ok(())
    }

    /// Removes the account. Historical transactions keep their references;
    /// downstream rendering falls back to "Unknown account".
    pub fn delete_account(&mut self, id: Uuid) -> Result<Account> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| FinanceError::AccountNotFound(id.to_string()))?;
        Ok(self.accounts.remove(index))
    }

    /// Count of historical transactions still referencing the account.
    pub fn references_to(&self, id: Uuid) -> usize {
        self.transactions
            .iter()
            .filter(|txn| {
                txn.source_account() == Some(id) || txn.destination_account() == Some(id)
            })
            .count()
    }

    pub fn holding(&self, symbol: &str) -> Option<&StockHolding> {
        let symbol = symbol.to_uppercase();
        self.holdings.iter().find(|holding| holding.symbol == symbol)
    }

    /// Overwrites the manually tracked market price of one holding.
    pub fn set_holding_price(&mut self, symbol: &str, price: f64) -> Result<()> {
        let symbol = symbol.to_uppercase();
        let holding = self
            .holdings
            .iter_mut()
            .find(|holding| holding.symbol == symbol)
            .ok_or(FinanceError::HoldingNotFound(symbol))?;
        holding.current_price = price;
        Ok(())
    }

    /// Empties the transaction history. Balances and holdings are untouched.
    pub fn clear_history(&mut self) -> usize {
        let cleared = self.transactions.len();
        self.transactions.clear();
        cleared
    }

    /// Transactions dated at or after the given instant, oldest first.
    pub fn transactions_since(&self, start: DateTime<Utc>) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |txn| txn.date >= start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, StockOrder};

    fn seeded_books() -> (Books, Uuid) {
        let account = Account::new("Main Bank", AccountKind::Bank, 1000.0);
        let id = account.id;
        (Books::new(vec![account], Vec::new(), Vec::new()), id)
    }

    #[test]
    fn record_updates_balances_and_appends_history() {
        let (mut books, account_id) = seeded_books();
        books.record(Transaction::expense(50.0, account_id, None));

        assert_eq!(books.accounts[0].balance, 950.0);
        assert_eq!(books.transactions.len(), 1);
    }

    #[test]
    fn clear_history_leaves_balances_and_holdings_alone() {
        let (mut books, account_id) = seeded_books();
        books.record(Transaction::stock_buy(
            account_id,
            StockOrder::new("X", 2.0, 100.0),
        ));

        let cleared = books.clear_history();
        assert_eq!(cleared, 1);
        assert!(books.transactions.is_empty());
        assert_eq!(books.accounts[0].balance, 800.0);
        assert_eq!(books.holdings.len(), 1);
    }

    #[test]
    fn delete_account_keeps_dangling_history() {
        let (mut books, account_id) = seeded_books();
        books.record(Transaction::expense(10.0, account_id, None));

        books.delete_account(account_id).unwrap();
        assert_eq!(books.references_to(account_id), 1);
        assert_eq!(books.account_name(account_id), "Unknown account");
    }

    #[test]
    fn set_holding_price_rejects_unknown_symbol() {
        let (mut books, _) = seeded_books();
        let err = books.set_holding_price("ZZZ", 10.0).unwrap_err();
        assert!(matches!(err, FinanceError::HoldingNotFound(_)));
    }
}
