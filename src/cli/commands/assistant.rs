use super::CommandDefinition;
use crate::assistant::{self, GeminiClient, TransactionDraft};
use crate::cli::context::{CliMode, CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "assistant",
        "Draft a transaction from natural language",
        "assistant <free text>",
        cmd_assistant,
    )]
}

fn cmd_assistant(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CliError::Input(
            "usage: assistant <free text>, e.g. assistant \"paid 50 for groceries from main bank\""
                .into(),
        ));
    }
    let input = args.join(" ");
    let model = GeminiClient::from_config(&context.config).map_err(CliError::Core)?;

    output::info("Thinking...");
    // One shot, no retry: a failure leaves the books untouched and the user
    // simply re-runs the command.
    let draft = assistant::transcribe(&model, &context.books.accounts, &input)
        .map_err(|err| CliError::Command(format!("{err}. Please try again.")))?;

    describe(&draft);
    if context.mode() == CliMode::Interactive {
        context.pending_draft = Some(draft);
        output::info("Run `txn add` to review and confirm the draft.");
    } else {
        output::info("Draft discarded in script mode; record it with `txn add ...`.");
    }
    Ok(())
}

fn describe(draft: &TransactionDraft) {
    output::section("Assistant draft");
    let mut any = false;
    let mut field = |name: &str, value: Option<String>| {
        if let Some(value) = value {
            output::info(format!("  {name}: {value}"));
            any = true;
        }
    };
    field("type", draft.kind.clone());
    field("amount", draft.amount.map(|v| v.to_string()));
    field("date", draft.date.clone());
    field("source account", draft.source_account_id.clone());
    field("destination account", draft.destination_account_id.clone());
    field("category id", draft.category_id.clone());
    field("category name", draft.category_name.clone());
    field("stock symbol", draft.stock_symbol.clone());
    field("stock quantity", draft.stock_quantity.map(|v| v.to_string()));
    field("stock price", draft.stock_price.map(|v| v.to_string()));
    field("notes", draft.notes.clone());
    if !any {
        output::warning("The assistant returned an empty draft.");
    }
}
