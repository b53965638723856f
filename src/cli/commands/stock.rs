use super::CommandDefinition;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "stock",
        "Inspect holdings and update prices",
        "stock <list|price <symbol> <price>>",
        cmd_stock,
    )]
}

fn cmd_stock(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("list") | None => list(context),
        Some("price") => price(context, &args[1..]),
        Some(other) => Err(CliError::Input(format!(
            "unknown stock subcommand `{other}`"
        ))),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    if context.books.holdings.is_empty() {
        output::info("No stock holdings.");
        return Ok(());
    }
    output::section("Stock holdings");
    let symbol = context.config.currency_symbol.clone();
    for holding in &context.books.holdings {
        let value = holding.market_value();
        let gain = value - holding.cost_basis();
        output::info(format!(
            "  {:<6} x{:<8} avg {}  now {}  value {}  ({}{})",
            holding.symbol,
            holding.quantity,
            output::format_amount(&symbol, holding.average_buy_price),
            output::format_amount(&symbol, holding.current_price),
            output::format_amount(&symbol, value),
            if gain >= 0.0 { "+" } else { "" },
            output::format_amount(&symbol, gain)
        ));
    }
    Ok(())
}

fn price(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (ticker, raw_price) = match args {
        [ticker, raw_price] => (ticker, raw_price),
        _ => {
            return Err(CliError::Input("usage: stock price <symbol> <price>".into()));
        }
    };
    let price: f64 = raw_price
        .parse()
        .map_err(|_| CliError::Input("price must be numeric".into()))?;
    if price <= 0.0 {
        return Err(CliError::Input("price must be positive".into()));
    }
    context
        .books
        .set_holding_price(ticker, price)
        .map_err(CliError::Core)?;
    context.commit()?;
    output::success(format!(
        "Updated {} to {}.",
        ticker.to_uppercase(),
        output::format_amount(&context.config.currency_symbol, price)
    ));
    Ok(())
}
