use chrono::Utc;

use super::CommandDefinition;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::CliError;
use crate::ledger::summarize;
use crate::storage::StorageBackend;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "dashboard",
        "Show the summary since the window start",
        "dashboard [reset]",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None => show(context),
        Some("reset") => reset(context),
        Some(other) => Err(CliError::Input(format!(
            "unknown dashboard subcommand `{other}`"
        ))),
    }
}

fn show(context: &mut ShellContext) -> CommandResult {
    let window_start = context.storage.dashboard_start()?;
    let summary = summarize(&context.books, window_start);
    let symbol = context.config.currency_symbol.clone();

    output::section("Dashboard");
    output::info(format!(
        "Stats since {}",
        summary.window_start.format("%Y-%m-%d %H:%M")
    ));
    output::info(format!(
        "Net worth: {}  (stocks {})",
        output::format_amount(&symbol, summary.net_worth),
        output::format_amount(&symbol, summary.stock_value)
    ));
    output::info(format!(
        "Input: +{}   Output: -{}",
        output::format_amount(&symbol, summary.total_income),
        output::format_amount(&symbol, summary.total_expense)
    ));

    if summary.expense_by_category.is_empty() {
        output::info("No output data since reset.");
    } else {
        output::section("Output breakdown");
        for (label, value) in &summary.expense_by_category {
            output::info(format!(
                "  {:<20} {}",
                label,
                output::format_amount(&symbol, *value)
            ));
        }
    }

    if !summary.asset_distribution.is_empty() {
        output::section("Asset breakdown");
        for slice in &summary.asset_distribution {
            output::info(format!(
                "  {:<8} {}",
                slice.label,
                output::format_amount(&symbol, slice.value)
            ));
        }
    }
    Ok(())
}

fn reset(context: &mut ShellContext) -> CommandResult {
    if !context.confirm("Start a new day? Income and expense stats reset to zero for the view.")? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    let now = Utc::now();
    context.storage.save_dashboard_start(now)?;
    output::success("Dashboard window reset. Underlying data is untouched.");
    Ok(())
}
