//! Domain models: accounts, stock holdings, transactions, and the category
//! catalog.

pub mod account;
pub mod category;
pub mod holding;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::{catalog, resolve_category_label, Category, CategoryKind, CategoryRef};
pub use holding::StockHolding;
pub use transaction::{StockOrder, Transaction, TransactionKind};
