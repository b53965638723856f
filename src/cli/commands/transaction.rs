use super::CommandDefinition;
use crate::cli::context::{CliMode, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::domain::{catalog, resolve_category_label, CategoryRef, StockOrder, Transaction};
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "txn",
        "Record and inspect transactions",
        "txn <add|list|clear>",
        cmd_txn,
    )]
}

fn cmd_txn(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("add") => add(context, &args[1..]),
        Some("list") | None => list(context),
        Some("clear") => clear(context),
        Some(other) => Err(CliError::Input(format!("unknown txn subcommand `{other}`"))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let transaction = if context.mode() == CliMode::Interactive && args.is_empty() {
        let draft = context.pending_draft.take();
        forms::transaction_wizard(&context.books, draft.as_ref())?
    } else {
        let transaction = parse_txn_args(context, args)?;
        forms::validate(&context.books, &transaction)?;
        transaction
    };

    let label = transaction.kind_label();
    let amount = transaction.amount;
    context.books.record(transaction);
    context.commit()?;
    output::success(format!(
        "Recorded {} of {}.",
        label.to_lowercase(),
        output::format_amount(&context.config.currency_symbol, amount)
    ));
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    if context.books.transactions.is_empty() {
        output::info("No transactions yet.");
        return Ok(());
    }
    output::section("Transactions");
    let symbol = context.config.currency_symbol.clone();
    for txn in &context.books.transactions {
        let mut line = format!(
            "  {}  {:<10} {}",
            txn.date.format("%Y-%m-%d %H:%M"),
            txn.kind_label(),
            output::format_amount(&symbol, txn.amount)
        );
        if txn.is_expense() || txn.is_income() {
            line.push_str(&format!("  [{}]", resolve_category_label(txn.category())));
        }
        if let Some(order) = txn.stock_order() {
            line.push_str(&format!(
                "  {} x{} @ {}",
                order.symbol,
                order.quantity,
                output::format_amount(&symbol, order.price_per_share)
            ));
        }
        if let Some(source) = txn.source_account() {
            line.push_str(&format!("  from {}", context.books.account_name(source)));
        }
        if let Some(destination) = txn.destination_account() {
            line.push_str(&format!("  to {}", context.books.account_name(destination)));
        }
        output::info(line);
    }
    Ok(())
}

fn clear(context: &mut ShellContext) -> CommandResult {
    if !context.confirm("Clear the entire transaction history? Balances and holdings stay.")? {
        output::info("Clear cancelled.");
        return Ok(());
    }
    let cleared = context.books.clear_history();
    context.commit()?;
    output::success(format!("Cleared {cleared} transaction(s)."));
    Ok(())
}

fn parse_txn_args(context: &ShellContext, args: &[&str]) -> Result<Transaction, CliError> {
    const USAGE: &str = "usage: txn add <expense|income|transfer|buy|sell> ...";
    let shape = args.first().ok_or_else(|| CliError::Input(USAGE.into()))?;

    match shape.to_lowercase().as_str() {
        "expense" => {
            let [amount, source] = required(&args[1..], "txn add expense <amount> <account> [category]")?;
            Ok(Transaction::expense(
                parse_amount(amount)?,
                context.resolve_account(source)?,
                args.get(3).map(|raw| parse_category(raw)),
            ))
        }
        "income" => {
            let [amount, destination] = required(&args[1..], "txn add income <amount> <account> [category]")?;
            Ok(Transaction::income(
                parse_amount(amount)?,
                context.resolve_account(destination)?,
                args.get(3).map(|raw| parse_category(raw)),
            ))
        }
        "transfer" => {
            let [amount, source, destination] =
                required(&args[1..], "txn add transfer <amount> <from> <to>")?;
            Ok(Transaction::transfer(
                parse_amount(amount)?,
                context.resolve_account(source)?,
                context.resolve_account(destination)?,
            ))
        }
        "buy" => {
            let [symbol, quantity, price, funding] =
                required(&args[1..], "txn add buy <symbol> <qty> <price> <account>")?;
            Ok(Transaction::stock_buy(
                context.resolve_account(funding)?,
                StockOrder::new(&*symbol, parse_amount(quantity)?, parse_amount(price)?),
            ))
        }
        "sell" => {
            let [symbol, quantity, price, proceeds] =
                required(&args[1..], "txn add sell <symbol> <qty> <price> <account>")?;
            Ok(Transaction::stock_sell(
                context.resolve_account(proceeds)?,
                StockOrder::new(&*symbol, parse_amount(quantity)?, parse_amount(price)?),
            ))
        }
        other => Err(CliError::Input(format!(
            "unknown transaction shape `{other}`; {USAGE}"
        ))),
    }
}

fn required<'a, const N: usize>(args: &[&'a str], usage: &str) -> Result<[&'a str; N], CliError> {
    args.get(..N)
        .and_then(|slice| <[&str; N]>::try_from(slice).ok())
        .ok_or_else(|| CliError::Input(format!("usage: {usage}")))
}

fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a number")))
}

fn parse_category(raw: &str) -> CategoryRef {
    if catalog().iter().any(|category| category.id == raw) {
        CategoryRef::Catalog(raw.to_string())
    } else {
        CategoryRef::Custom(raw.to_string())
    }
}
