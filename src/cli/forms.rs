//! Dialoguer wizards for data entry, plus the input validation that gates
//! the ledger core.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::assistant::TransactionDraft;
use crate::domain::{
    catalog, Account, AccountKind, CategoryKind, CategoryRef, StockOrder, Transaction,
    TransactionKind,
};
use crate::errors::CliError;
use crate::ledger::Books;

const KIND_CHOICES: [&str; 5] = ["Expense", "Income", "Transfer", "Stock Buy", "Stock Sell"];

/// Rejects a transaction before the ledger core ever sees it.
///
/// The core itself is permissive about referential inconsistency; this is
/// the strict gate the entry form applies to fresh input.
pub fn validate(books: &Books, transaction: &Transaction) -> Result<(), CliError> {
    if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
        return Err(CliError::Input("amount must be positive".into()));
    }

    let require_account = |id: Uuid, role: &str| -> Result<(), CliError> {
        if books.account(id).is_none() {
            return Err(CliError::Input(format!("{role} account does not exist")));
        }
        Ok(())
    };

    match &transaction.kind {
        TransactionKind::Income {
            destination_account,
            ..
        } => require_account(*destination_account, "destination")?,
        TransactionKind::Expense { source_account, .. } => {
            require_account(*source_account, "source")?
        }
        TransactionKind::Transfer {
            source_account,
            destination_account,
        } => {
            require_account(*source_account, "source")?;
            require_account(*destination_account, "destination")?;
            if source_account == destination_account {
                return Err(CliError::Input(
                    "source and destination accounts cannot be the same".into(),
                ));
            }
        }
        TransactionKind::StockBuy {
            source_account,
            order,
        } => {
            require_account(*source_account, "funding")?;
            validate_order(order)?;
        }
        TransactionKind::StockSell {
            destination_account,
            order,
        } => {
            require_account(*destination_account, "proceeds")?;
            validate_order(order)?;
            let held = books
                .holding(&order.symbol)
                .ok_or_else(|| {
                    CliError::Input(format!("no holding for symbol {}", order.symbol))
                })?
                .quantity;
            if order.quantity > held {
                return Err(CliError::Input(format!(
                    "cannot sell {} shares of {}, only {} held",
                    order.quantity, order.symbol, held
                )));
            }
        }
    }
    Ok(())
}

fn validate_order(order: &StockOrder) -> Result<(), CliError> {
    if order.symbol.trim().is_empty() {
        return Err(CliError::Input("stock symbol is required".into()));
    }
    if order.quantity <= 0.0 {
        return Err(CliError::Input("stock quantity must be positive".into()));
    }
    if order.price_per_share <= 0.0 {
        return Err(CliError::Input("price per share must be positive".into()));
    }
    Ok(())
}

/// Interactive account creation/editing wizard.
pub fn account_wizard(initial: Option<&Account>) -> Result<(String, AccountKind, f64), CliError> {
    let theme = ColorfulTheme::default();
    let name: String = Input::with_theme(&theme)
        .with_prompt("Account name")
        .with_initial_text(initial.map(|a| a.name.clone()).unwrap_or_default())
        .interact_text()?;

    let kind_labels: Vec<String> = AccountKind::ALL.iter().map(|k| k.to_string()).collect();
    let default_kind = initial
        .and_then(|a| AccountKind::ALL.iter().position(|k| *k == a.kind))
        .unwrap_or(0);
    let kind_index = Select::with_theme(&theme)
        .with_prompt("Account type")
        .items(&kind_labels)
        .default(default_kind)
        .interact()?;

    let balance: f64 = Input::with_theme(&theme)
        .with_prompt("Balance")
        .with_initial_text(
            initial
                .map(|a| format!("{:.2}", a.balance))
                .unwrap_or_default(),
        )
        .interact_text()?;

    Ok((name, AccountKind::ALL[kind_index], balance))
}

/// Interactive transaction wizard, optionally pre-filled from an assistant
/// draft. Returns a validated transaction ready for `Books::record`.
pub fn transaction_wizard(
    books: &Books,
    draft: Option<&TransactionDraft>,
) -> Result<Transaction, CliError> {
    if books.accounts.is_empty() {
        return Err(CliError::Input("create an account first".into()));
    }
    let theme = ColorfulTheme::default();

    let default_kind = draft
        .and_then(|d| d.kind.as_deref())
        .and_then(|tag| match tag {
            "EXPENSE" => Some(0),
            "INCOME" => Some(1),
            "TRANSFER" => Some(2),
            "STOCK_BUY" => Some(3),
            "STOCK_SELL" => Some(4),
            _ => None,
        })
        .unwrap_or(0);
    let kind_index = Select::with_theme(&theme)
        .with_prompt("Transaction type")
        .items(&KIND_CHOICES)
        .default(default_kind)
        .interact()?;

    let is_stock = kind_index >= 3;
    let kind = if is_stock {
        let symbol: String = Input::with_theme(&theme)
            .with_prompt("Stock symbol")
            .with_initial_text(draft.and_then(|d| d.stock_symbol.clone()).unwrap_or_default())
            .interact_text()?;
        let quantity: f64 = Input::with_theme(&theme)
            .with_prompt("Quantity")
            .with_initial_text(draft_number(draft.and_then(|d| d.stock_quantity)))
            .interact_text()?;
        let price: f64 = Input::with_theme(&theme)
            .with_prompt("Price per share")
            .with_initial_text(draft_number(draft.and_then(|d| d.stock_price)))
            .interact_text()?;
        let order = StockOrder::new(symbol, quantity, price);
        if kind_index == 3 {
            let source = select_account(
                books,
                &theme,
                "Funding account",
                draft.and_then(|d| d.source_account_id.as_deref()),
            )?;
            TransactionKind::StockBuy {
                source_account: source,
                order,
            }
        } else {
            let destination = select_account(
                books,
                &theme,
                "Proceeds account",
                draft.and_then(|d| d.destination_account_id.as_deref()),
            )?;
            TransactionKind::StockSell {
                destination_account: destination,
                order,
            }
        }
    } else {
        match kind_index {
            0 => {
                let source = select_account(
                    books,
                    &theme,
                    "From account",
                    draft.and_then(|d| d.source_account_id.as_deref()),
                )?;
                TransactionKind::Expense {
                    source_account: source,
                    category: category_prompt(&theme, CategoryKind::Expense, draft)?,
                }
            }
            1 => {
                let destination = select_account(
                    books,
                    &theme,
                    "To account",
                    draft.and_then(|d| d.destination_account_id.as_deref()),
                )?;
                TransactionKind::Income {
                    destination_account: destination,
                    category: category_prompt(&theme, CategoryKind::Income, draft)?,
                }
            }
            _ => {
                let source = select_account(
                    books,
                    &theme,
                    "From account",
                    draft.and_then(|d| d.source_account_id.as_deref()),
                )?;
                let destination = select_account(
                    books,
                    &theme,
                    "To account",
                    draft.and_then(|d| d.destination_account_id.as_deref()),
                )?;
                TransactionKind::Transfer {
                    source_account: source,
                    destination_account: destination,
                }
            }
        }
    };

    let amount = if is_stock {
        // Derived from the order inside the constructor; never asked for.
        0.0
    } else {
        Input::with_theme(&theme)
            .with_prompt("Amount")
            .with_initial_text(draft_number(draft.and_then(|d| d.amount)))
            .interact_text()?
    };
    let mut transaction = match kind {
        TransactionKind::Expense {
            source_account,
            category,
        } => Transaction::expense(amount, source_account, category),
        TransactionKind::Income {
            destination_account,
            category,
        } => Transaction::income(amount, destination_account, category),
        TransactionKind::Transfer {
            source_account,
            destination_account,
        } => Transaction::transfer(amount, source_account, destination_account),
        TransactionKind::StockBuy {
            source_account,
            order,
        } => Transaction::stock_buy(source_account, order),
        TransactionKind::StockSell {
            destination_account,
            order,
        } => Transaction::stock_sell(destination_account, order),
    };

    if let Some(date) = date_prompt(&theme, draft)? {
        transaction = transaction.with_date(date);
    }
    let notes: String = Input::with_theme(&theme)
        .with_prompt("Notes (optional)")
        .with_initial_text(draft.and_then(|d| d.notes.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    if !notes.trim().is_empty() {
        transaction = transaction.with_notes(notes.trim());
    }

    validate(books, &transaction)?;
    Ok(transaction)
}

fn draft_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn select_account(
    books: &Books,
    theme: &ColorfulTheme,
    prompt: &str,
    draft_id: Option<&str>,
) -> Result<Uuid, CliError> {
    let labels: Vec<String> = books
        .accounts
        .iter()
        .map(|account| format!("{} ({})", account.name, account.kind))
        .collect();
    let default = draft_id
        .and_then(|raw| raw.parse::<Uuid>().ok())
        .and_then(|id| books.accounts.iter().position(|account| account.id == id))
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(books.accounts[index].id)
}

fn category_prompt(
    theme: &ColorfulTheme,
    kind: CategoryKind,
    draft: Option<&TransactionDraft>,
) -> Result<Option<CategoryRef>, CliError> {
    if let Some(name) = draft.and_then(|d| d.category_name.clone()) {
        return Ok(Some(CategoryRef::Custom(name)));
    }

    let options: Vec<&'static crate::domain::Category> = catalog()
        .iter()
        .filter(|category| category.kind == kind)
        .collect();
    let mut labels: Vec<String> = options.iter().map(|c| c.name.clone()).collect();
    labels.push("Custom...".into());
    labels.push("None".into());

    let default = draft
        .and_then(|d| d.category_id.as_deref())
        .and_then(|id| options.iter().position(|c| c.id == id))
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&labels)
        .default(default)
        .interact()?;

    if index < options.len() {
        return Ok(Some(CategoryRef::Catalog(options[index].id.clone())));
    }
    if index == options.len() {
        let name: String = Input::with_theme(theme)
            .with_prompt("Custom category name")
            .interact_text()?;
        return Ok(Some(CategoryRef::Custom(name)));
    }
    Ok(None)
}

fn date_prompt(
    theme: &ColorfulTheme,
    draft: Option<&TransactionDraft>,
) -> Result<Option<chrono::DateTime<Utc>>, CliError> {
    let initial = draft
        .and_then(|d| d.date.clone())
        .map(|raw| raw.chars().take(10).collect::<String>())
        .unwrap_or_default();
    if initial.is_empty()
        && !Confirm::with_theme(theme)
            .with_prompt("Backdate this transaction?")
            .default(false)
            .interact()?
    {
        return Ok(None);
    }
    let raw: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(initial)
        .interact_text()?;
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input("date must be YYYY-MM-DD".into()))?;
    let midnight = date.and_time(NaiveTime::MIN);
    Ok(Some(Utc.from_utc_datetime(&midnight)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StockHolding;

    fn books() -> (Books, Uuid, Uuid) {
        let a = Account::new("Main Bank", AccountKind::Bank, 1000.0);
        let b = Account::new("Cash Wallet", AccountKind::Cash, 50.0);
        let (a_id, b_id) = (a.id, b.id);
        (Books::new(vec![a, b], Vec::new(), Vec::new()), a_id, b_id)
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let (books, a, _) = books();
        let txn = Transaction::expense(0.0, a, None);
        assert!(validate(&books, &txn).is_err());
    }

    #[test]
    fn rejects_missing_account_references() {
        let (books, _, _) = books();
        let txn = Transaction::income(10.0, Uuid::new_v4(), None);
        assert!(validate(&books, &txn).is_err());
    }

    #[test]
    fn rejects_self_transfer() {
        let (books, a, _) = books();
        let txn = Transaction::transfer(10.0, a, a);
        let err = validate(&books, &txn).unwrap_err();
        assert!(format!("{err}").contains("cannot be the same"));
    }

    #[test]
    fn accepts_a_valid_transfer() {
        let (books, a, b) = books();
        let txn = Transaction::transfer(10.0, a, b);
        assert!(validate(&books, &txn).is_ok());
    }

    #[test]
    fn rejects_selling_an_unheld_symbol() {
        let (books, a, _) = books();
        let txn = Transaction::stock_sell(a, StockOrder::new("X", 1.0, 10.0));
        let err = validate(&books, &txn).unwrap_err();
        assert!(format!("{err}").contains("no holding"));
    }

    #[test]
    fn rejects_overselling_a_position() {
        let (mut books, a, _) = books();
        books.holdings.push(StockHolding::opened("X", 5.0, 10.0));
        let txn = Transaction::stock_sell(a, StockOrder::new("X", 6.0, 10.0));
        let err = validate(&books, &txn).unwrap_err();
        assert!(format!("{err}").contains("only 5 held"));
    }

    #[test]
    fn accepts_selling_the_full_position() {
        let (mut books, a, _) = books();
        books.holdings.push(StockHolding::opened("X", 5.0, 10.0));
        let txn = Transaction::stock_sell(a, StockOrder::new("X", 5.0, 12.0));
        assert!(validate(&books, &txn).is_ok());
    }

    #[test]
    fn rejects_zero_quantity_orders() {
        let (books, a, _) = books();
        let txn = Transaction::stock_buy(a, StockOrder::new("X", 0.0, 10.0));
        assert!(validate(&books, &txn).is_err());
    }
}
