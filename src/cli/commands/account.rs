use super::CommandDefinition;
use crate::cli::context::{CliMode, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::domain::{Account, AccountKind};
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "account",
        "Manage accounts",
        "account <list|add|edit|delete>",
        cmd_account,
    )]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("list") | None => list(context),
        Some("add") => add(context, &args[1..]),
        Some("edit") => edit(context, &args[1..]),
        Some("delete") => delete(context, &args[1..]),
        Some(other) => Err(CliError::Input(format!(
            "unknown account subcommand `{other}`"
        ))),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    if context.books.accounts.is_empty() {
        output::info("No accounts yet.");
        return Ok(());
    }
    output::section("Accounts");
    let symbol = context.config.currency_symbol.clone();
    for (index, account) in context.books.accounts.iter().enumerate() {
        output::info(format!(
            "  {}. {} [{}] {}",
            index + 1,
            account.name,
            account.kind,
            output::format_amount(&symbol, account.balance)
        ));
    }
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, kind, balance) = if context.mode() == CliMode::Interactive && args.is_empty() {
        forms::account_wizard(None)?
    } else {
        parse_account_args(args)?
    };
    let account = Account::new(name, kind, balance);
    let label = account.name.clone();
    context.books.add_account(account);
    context.commit()?;
    output::success(format!("Added account `{label}`."));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let token = args
        .first()
        .ok_or_else(|| CliError::Input("usage: account edit <index|id|name>".into()))?;
    let id = context.resolve_account(token)?;
    let current = context
        .books
        .account(id)
        .cloned()
        .ok_or_else(|| CliError::Input(format!("unknown account `{token}`")))?;

    let (name, kind, balance) = if context.mode() == CliMode::Interactive && args.len() == 1 {
        forms::account_wizard(Some(&current))?
    } else {
        parse_account_args(&args[1..])?
    };

    let mut updated = current;
    updated.name = name;
    updated.kind = kind;
    updated.balance = balance;
    context.books.update_account(updated).map_err(CliError::Core)?;
    context.commit()?;
    output::success("Account updated.");
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let token = args
        .first()
        .ok_or_else(|| CliError::Input("usage: account delete <index|id|name>".into()))?;
    let id = context.resolve_account(token)?;

    let references = context.books.references_to(id);
    if references > 0 {
        output::warning(format!(
            "{references} historical transaction(s) reference this account and will keep a dangling id."
        ));
    }
    if !context.confirm("Delete this account?")? {
        output::info("Delete cancelled.");
        return Ok(());
    }
    let removed = context.books.delete_account(id).map_err(CliError::Core)?;
    context.commit()?;
    output::success(format!("Deleted account `{}`.", removed.name));
    Ok(())
}

fn parse_account_args(args: &[&str]) -> Result<(String, AccountKind, f64), CliError> {
    if args.len() < 3 {
        return Err(CliError::Input(
            "usage: account add <name> <bank|wallet|cash|portfolio|stock_portfolio> <balance>"
                .into(),
        ));
    }
    let kind = match args[1].to_lowercase().as_str() {
        "bank" => AccountKind::Bank,
        "wallet" => AccountKind::Wallet,
        "cash" => AccountKind::Cash,
        "portfolio" => AccountKind::Portfolio,
        "stock_portfolio" => AccountKind::StockPortfolio,
        other => {
            return Err(CliError::Input(format!("unknown account type `{other}`")));
        }
    };
    let balance: f64 = args[2]
        .parse()
        .map_err(|_| CliError::Input("balance must be numeric".into()))?;
    Ok((args[0].to_string(), kind, balance))
}
