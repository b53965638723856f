use super::CommandDefinition;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help", cmd_help),
        CommandDefinition::new("version", "Show version info", "version", cmd_version),
        CommandDefinition::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Available commands");
    for (name, description, usage) in context.command_overview() {
        output::info(format!("  {name:<12} {description}  ({usage})"));
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!(
        "Finance Core version {}",
        env!("CARGO_PKG_VERSION")
    ));
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}
