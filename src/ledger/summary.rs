//! Read-side dashboard aggregation.
//!
//! Everything here is recomputed in full from the current books on each
//! request; there is no cached state to invalidate.

use chrono::{DateTime, Utc};

use crate::domain::{resolve_category_label, AccountKind};

use super::Books;

/// Aggregated dashboard figures for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub window_start: DateTime<Utc>,
    /// Sum of income amounts dated at or after the window start.
    pub total_income: f64,
    /// Sum of expense amounts dated at or after the window start.
    pub total_expense: f64,
    /// All account balances plus the stock portfolio value. Not windowed.
    pub net_worth: f64,
    pub stock_value: f64,
    /// Expense totals per resolved category label, largest first.
    pub expense_by_category: Vec<(String, f64)>,
    /// Balance totals per asset class, zero slices omitted.
    pub asset_distribution: Vec<AssetSlice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetSlice {
    pub label: String,
    pub value: f64,
}

/// Computes the dashboard summary for transactions dated at or after
/// `window_start`. Resetting the window never alters the underlying data.
pub fn summarize(books: &Books, window_start: DateTime<Utc>) -> DashboardSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut expense_by_category: Vec<(String, f64)> = Vec::new();

    for txn in books.transactions_since(window_start) {
        if txn.is_income() {
            total_income += txn.amount;
        } else if txn.is_expense() {
            total_expense += txn.amount;
            let label = resolve_category_label(txn.category());
            match expense_by_category.iter_mut().find(|(name, _)| *name == label) {
                Some((_, value)) => *value += txn.amount,
                None => expense_by_category.push((label, txn.amount)),
            }
        }
    }
    expense_by_category.sort_by(|a, b| b.1.total_cmp(&a.1));

    let stock_value: f64 = books.holdings.iter().map(|h| h.market_value()).sum();
    let account_total: f64 = books.accounts.iter().map(|a| a.balance).sum();

    let balance_of = |kind: AccountKind| -> f64 {
        books
            .accounts
            .iter()
            .filter(|account| account.kind == kind)
            .map(|account| account.balance)
            .sum()
    };
    let mut asset_distribution: Vec<AssetSlice> = vec![
        AssetSlice {
            label: "Bank".into(),
            value: balance_of(AccountKind::Bank),
        },
        AssetSlice {
            label: "Cash".into(),
            value: balance_of(AccountKind::Cash),
        },
        AssetSlice {
            label: "Wallet".into(),
            value: balance_of(AccountKind::Wallet),
        },
        AssetSlice {
            label: "Stocks".into(),
            value: stock_value,
        },
    ];
    asset_distribution.retain(|slice| slice.value > 0.0);

    DashboardSummary {
        window_start,
        total_income,
        total_expense,
        net_worth: account_total + stock_value,
        stock_value,
        expense_by_category,
        asset_distribution,
    }
}
