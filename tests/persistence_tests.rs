mod common;

use chrono::Utc;
use finance_core::domain::{StockOrder, Transaction};
use finance_core::storage::StorageBackend;

#[test]
fn commit_then_load_roundtrips_all_three_collections() {
    let store = common::setup_store();
    store.seed().expect("seed accounts");

    let mut books = store.load_books().expect("load books");
    let account_id = books.accounts[0].id;
    books.record(Transaction::expense(50.0, account_id, None));
    books.record(Transaction::stock_buy(
        account_id,
        StockOrder::new("X", 2.0, 100.0),
    ));
    store.commit(&books).expect("commit books");

    let reloaded = store.load_books().expect("reload books");
    assert_eq!(reloaded.accounts[0].balance, 2250.0);
    assert_eq!(reloaded.transactions.len(), 2);
    assert_eq!(reloaded.holdings.len(), 1);
    assert_eq!(reloaded.holdings[0].symbol, "X");
}

#[test]
fn cleared_history_stays_cleared_after_reload() {
    let store = common::setup_store();
    store.seed().expect("seed accounts");

    let mut books = store.load_books().expect("load books");
    let account_id = books.accounts[0].id;
    books.record(Transaction::income(10.0, account_id, None));
    books.clear_history();
    store.commit(&books).expect("commit books");

    let reloaded = store.load_books().expect("reload books");
    assert!(reloaded.transactions.is_empty());
    assert_eq!(reloaded.accounts[0].balance, 2510.0);
}

#[test]
fn dashboard_window_survives_a_reset_and_reload() {
    let store = common::setup_store();
    let reset_at = Utc::now();
    store.save_dashboard_start(reset_at).expect("save start");
    assert_eq!(store.dashboard_start().expect("read start"), reset_at);
}

#[test]
fn transaction_wire_format_uses_original_tags() {
    let store = common::setup_store();
    store.seed().expect("seed accounts");

    let mut books = store.load_books().expect("load books");
    let account_id = books.accounts[0].id;
    books.record(Transaction::stock_buy(
        account_id,
        StockOrder::new("NVDA", 1.0, 100.0),
    ));
    store.commit(&books).expect("commit books");

    let raw = std::fs::read_to_string(store.root().join("transactions.json")).expect("read file");
    assert!(raw.contains("\"type\": \"STOCK_BUY\""), "raw: {raw}");
}
