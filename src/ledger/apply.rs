//! Pure application of a single transaction to the current ledger state.

use crate::domain::{Account, StockHolding, Transaction, TransactionKind};

/// Applies one transaction to the current accounts and holdings, returning
/// the next state of both collections. Inputs are never mutated.
///
/// Debit and credit are evaluated as two independent conditions per account
/// rather than an exclusive branch, so an account referenced as both source
/// and destination would be handled correctly, and stock buys can never
/// credit nor stock sells debit by construction.
///
/// Dangling account references are a balance no-op; referential consistency
/// is the entry layer's concern.
pub fn apply(
    accounts: &[Account],
    holdings: &[StockHolding],
    transaction: &Transaction,
) -> (Vec<Account>, Vec<StockHolding>) {
    let next_accounts = accounts
        .iter()
        .map(|account| {
            let mut account = account.clone();
            if transaction.source_account() == Some(account.id) {
                account.balance -= transaction.amount;
            }
            if transaction.destination_account() == Some(account.id) {
                account.balance += transaction.amount;
            }
            account
        })
        .collect();

    let next_holdings = match &transaction.kind {
        TransactionKind::StockBuy { order, .. } => {
            let mut next: Vec<StockHolding> = holdings.to_vec();
            match next.iter_mut().find(|h| h.symbol == order.symbol) {
                Some(holding) => {
                    // Weighted-average cost: blend the booked cash amount into
                    // the existing basis. The amount field is trusted as-is.
                    let total_cost = holding.cost_basis() + transaction.amount;
                    let total_quantity = holding.quantity + order.quantity;
                    holding.average_buy_price = total_cost / total_quantity;
                    holding.quantity = total_quantity;
                    holding.current_price = order.price_per_share;
                }
                None => {
                    next.push(StockHolding::opened(
                        &order.symbol,
                        order.quantity,
                        order.price_per_share,
                    ));
                }
            }
            next
        }
        TransactionKind::StockSell { order, .. } => holdings
            .iter()
            .filter_map(|holding| {
                if holding.symbol != order.symbol {
                    return Some(holding.clone());
                }
                let remaining = holding.quantity - order.quantity;
                if remaining > 0.0 {
                    // Selling leaves the cost basis of the rest untouched.
                    let mut kept = holding.clone();
                    kept.quantity = remaining;
                    Some(kept)
                } else {
                    None
                }
            })
            .collect(),
        _ => holdings.to_vec(),
    };

    (next_accounts, next_holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, StockOrder};
    use uuid::Uuid;

    fn account(balance: f64) -> Account {
        Account::new("Checking", AccountKind::Bank, balance)
    }

    #[test]
    fn expense_debits_only_the_source_account() {
        let source = account(1000.0);
        let other = account(300.0);
        let txn = Transaction::expense(50.0, source.id, None);

        let (accounts, _) = apply(&[source.clone(), other.clone()], &[], &txn);
        assert_eq!(accounts[0].balance, 950.0);
        assert_eq!(accounts[1].balance, 300.0);
    }

    #[test]
    fn income_credits_only_the_destination_account() {
        let destination = account(100.0);
        let other = account(0.0);
        let txn = Transaction::income(40.0, destination.id, None);

        let (accounts, _) = apply(&[other.clone(), destination.clone()], &[], &txn);
        assert_eq!(accounts[0].balance, 0.0);
        assert_eq!(accounts[1].balance, 140.0);
    }

    #[test]
    fn transfer_conserves_the_total_balance() {
        let from = account(500.0);
        let to = account(200.0);
        let txn = Transaction::transfer(120.0, from.id, to.id);

        let (accounts, _) = apply(&[from, to], &[], &txn);
        assert_eq!(accounts[0].balance, 380.0);
        assert_eq!(accounts[1].balance, 320.0);
        let total: f64 = accounts.iter().map(|a| a.balance).sum();
        assert_eq!(total, 700.0);
    }

    #[test]
    fn dangling_reference_leaves_balances_untouched() {
        let bystander = account(75.0);
        let txn = Transaction::expense(10.0, Uuid::new_v4(), None);

        let (accounts, _) = apply(&[bystander.clone()], &[], &txn);
        assert_eq!(accounts[0].balance, 75.0);
    }

    #[test]
    fn first_buy_opens_a_holding_at_the_purchase_price() {
        let funding = account(1000.0);
        let txn = Transaction::stock_buy(funding.id, StockOrder::new("X", 10.0, 50.0));

        let (accounts, holdings) = apply(&[funding], &[], &txn);
        assert_eq!(accounts[0].balance, 500.0);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].quantity, 10.0);
        assert_eq!(holdings[0].average_buy_price, 50.0);
        assert_eq!(holdings[0].current_price, 50.0);
    }

    #[test]
    fn repeat_buy_blends_the_weighted_average() {
        let funding = account(1000.0);
        let existing = StockHolding::opened("X", 10.0, 50.0);
        let txn = Transaction::stock_buy(funding.id, StockOrder::new("X", 5.0, 60.0));

        let (_, holdings) = apply(&[funding], &[existing], &txn);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].quantity, 15.0);
        assert!((holdings[0].average_buy_price - 800.0 / 15.0).abs() < 1e-9);
        assert_eq!(holdings[0].current_price, 60.0);
    }

    #[test]
    fn partial_sell_keeps_the_average_buy_price() {
        let proceeds = account(0.0);
        let existing = StockHolding::opened("X", 15.0, 53.0);
        let txn = Transaction::stock_sell(proceeds.id, StockOrder::new("X", 5.0, 70.0));

        let (accounts, holdings) = apply(&[proceeds], &[existing], &txn);
        assert_eq!(accounts[0].balance, 350.0);
        assert_eq!(holdings[0].quantity, 10.0);
        assert_eq!(holdings[0].average_buy_price, 53.0);
    }

    #[test]
    fn selling_everything_removes_the_holding() {
        let proceeds = account(0.0);
        let existing = StockHolding::opened("X", 15.0, 53.0);
        let txn = Transaction::stock_sell(proceeds.id, StockOrder::new("X", 15.0, 30.0));

        let (_, holdings) = apply(&[proceeds], &[existing], &txn);
        assert!(holdings.is_empty());
    }

    #[test]
    fn selling_an_unknown_symbol_is_a_holdings_no_op() {
        let proceeds = account(0.0);
        let existing = StockHolding::opened("Y", 2.0, 10.0);
        let txn = Transaction::stock_sell(proceeds.id, StockOrder::new("X", 1.0, 5.0));

        let (_, holdings) = apply(&[proceeds], &[existing.clone()], &txn);
        assert_eq!(holdings, vec![existing]);
    }

    #[test]
    fn stock_buy_never_credits_even_with_matching_destination_id() {
        // StockBuy has no destination by construction; the funding account is
        // only ever debited.
        let funding = account(100.0);
        let txn = Transaction::stock_buy(funding.id, StockOrder::new("X", 1.0, 10.0));
        assert!(txn.destination_account().is_none());

        let (accounts, _) = apply(&[funding], &[], &txn);
        assert_eq!(accounts[0].balance, 90.0);
    }
}
