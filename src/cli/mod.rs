pub mod commands;
pub mod context;
pub mod forms;
pub mod output;
mod shell;

pub use context::{CliMode, ShellContext};
pub use shell::run_cli;
