use finance_core::domain::{Account, AccountKind, StockOrder, Transaction};
use finance_core::ledger::{apply, Books};

fn bank(balance: f64) -> Account {
    Account::new("Main Bank", AccountKind::Bank, balance)
}

#[test]
fn full_scenario_expense_buy_average_up_then_close_position() {
    let account = bank(1000.0);
    let id = account.id;
    let mut books = Books::new(vec![account], Vec::new(), Vec::new());

    books.record(Transaction::expense(50.0, id, None));
    assert_eq!(books.accounts[0].balance, 950.0);

    books.record(Transaction::stock_buy(id, StockOrder::new("X", 10.0, 50.0)));
    assert_eq!(books.accounts[0].balance, 450.0);
    let holding = books.holding("X").expect("holding opened");
    assert_eq!(holding.quantity, 10.0);
    assert_eq!(holding.average_buy_price, 50.0);
    assert_eq!(holding.current_price, 50.0);

    books.record(Transaction::stock_buy(id, StockOrder::new("X", 5.0, 60.0)));
    let holding = books.holding("X").expect("holding kept");
    assert_eq!(holding.quantity, 15.0);
    assert!((holding.average_buy_price - 800.0 / 15.0).abs() < 1e-9);
    assert_eq!(holding.current_price, 60.0);

    books.record(Transaction::stock_sell(id, StockOrder::new("X", 15.0, 30.0)));
    assert!(books.holding("X").is_none());
    assert_eq!(books.accounts[0].balance, 900.0);
    assert_eq!(books.transactions.len(), 4);
}

#[test]
fn stepwise_application_matches_folding_the_sequence() {
    let account = bank(1000.0);
    let id = account.id;
    let transactions = vec![
        Transaction::income(200.0, id, None),
        Transaction::expense(75.0, id, None),
        Transaction::stock_buy(id, StockOrder::new("A", 4.0, 25.0)),
        Transaction::stock_sell(id, StockOrder::new("A", 1.0, 30.0)),
    ];

    // One at a time through apply.
    let mut accounts = vec![account.clone()];
    let mut holdings = Vec::new();
    for txn in &transactions {
        let (next_accounts, next_holdings) = apply(&accounts, &holdings, txn);
        accounts = next_accounts;
        holdings = next_holdings;
    }

    // Folded through the books.
    let mut books = Books::new(vec![account], Vec::new(), Vec::new());
    for txn in transactions {
        books.record(txn);
    }

    assert_eq!(books.accounts, accounts);
    assert_eq!(books.holdings, holdings);
}

#[test]
fn transfer_moves_value_without_changing_the_total() {
    let from = bank(800.0);
    let to = Account::new("Cash Wallet", AccountKind::Cash, 100.0);
    let txn = Transaction::transfer(250.0, from.id, to.id);

    let before: f64 = [&from, &to].iter().map(|a| a.balance).sum();
    let (accounts, _) = apply(&[from, to], &[], &txn);
    let after: f64 = accounts.iter().map(|a| a.balance).sum();

    assert_eq!(accounts[0].balance, 550.0);
    assert_eq!(accounts[1].balance, 350.0);
    assert_eq!(before, after);
}

#[test]
fn apply_leaves_its_inputs_untouched() {
    let account = bank(500.0);
    let id = account.id;
    let accounts = vec![account];
    let txn = Transaction::expense(100.0, id, None);

    let (next, _) = apply(&accounts, &[], &txn);
    assert_eq!(accounts[0].balance, 500.0);
    assert_eq!(next[0].balance, 400.0);
}

#[test]
fn unrelated_transaction_types_leave_holdings_alone() {
    let account = bank(500.0);
    let id = account.id;
    let mut books = Books::new(vec![account], Vec::new(), Vec::new());
    books.record(Transaction::stock_buy(id, StockOrder::new("Z", 1.0, 10.0)));

    books.record(Transaction::income(100.0, id, None));
    books.record(Transaction::expense(20.0, id, None));

    let holding = books.holding("Z").expect("holding untouched");
    assert_eq!(holding.quantity, 1.0);
}
