//! Shell state and command dispatch.

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use uuid::Uuid;

use crate::assistant::TransactionDraft;
use crate::config::{Config, ConfigManager};
use crate::errors::CliError;
use crate::ledger::Books;
use crate::storage::{JsonStore, StorageBackend};

use super::commands::{self, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CliError>;

/// Holds everything a command handler can touch: the books, the storage
/// backend, configuration, and the draft pending confirmation.
pub struct ShellContext {
    mode: CliMode,
    registry: CommandRegistry,
    pub(crate) storage: JsonStore,
    pub(crate) books: Books,
    pub(crate) config: Config,
    pub(crate) pending_draft: Option<TransactionDraft>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let registry = CommandRegistry::new(commands::all_definitions());
        let storage = JsonStore::new_default()?;
        if storage.seed()? {
            output::info("Welcome! Seeded two starter accounts.");
        }
        let books = storage.load_books()?;
        let config = ConfigManager::new()?.load()?;
        Ok(Self {
            mode,
            registry,
            storage,
            books,
            config,
            pending_draft: None,
            running: true,
        })
    }

    /// Test constructor with explicit collaborators.
    pub fn with_parts(
        mode: CliMode,
        storage: JsonStore,
        books: Books,
        config: Config,
    ) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            storage,
            books,
            config,
            pending_draft: None,
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command_overview(&self) -> Vec<(&'static str, &'static str, &'static str)> {
        self.registry
            .iter()
            .map(|def| (def.name, def.description, def.usage))
            .collect()
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        let Some(definition) = self.registry.get(command).cloned() else {
            let mut message = format!("unknown command `{command}`");
            if let Some(suggestion) = self.suggest(command) {
                message.push_str(&format!(", did you mean `{suggestion}`?"));
            }
            return Err(CliError::Input(message));
        };
        (definition.handler)(self, args)
    }

    fn suggest(&self, input: &str) -> Option<&'static str> {
        self.registry
            .names()
            .map(|name| (name, levenshtein(input, name)))
            .filter(|(_, distance)| *distance <= 2)
            .min_by_key(|(_, distance)| *distance)
            .map(|(name, _)| name)
    }

    /// Persists all three collections after a state change.
    pub(crate) fn commit(&self) -> CommandResult {
        self.storage.commit(&self.books)?;
        Ok(())
    }

    /// Asks for confirmation interactively; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CliError> {
        if self.mode != CliMode::Interactive {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// Resolves an account token: a 1-based list index, a full id, or a
    /// case-insensitive name.
    pub(crate) fn resolve_account(&self, token: &str) -> Result<Uuid, CliError> {
        if let Ok(index) = token.parse::<usize>() {
            return self
                .books
                .accounts
                .get(index.wrapping_sub(1))
                .map(|account| account.id)
                .ok_or_else(|| CliError::Input(format!("no account at index {index}")));
        }
        if let Ok(id) = token.parse::<Uuid>() {
            if self.books.account(id).is_some() {
                return Ok(id);
            }
        }
        let lowered = token.to_lowercase();
        self.books
            .accounts
            .iter()
            .find(|account| account.name.to_lowercase() == lowered)
            .map(|account| account.id)
            .ok_or_else(|| CliError::Input(format!("unknown account `{token}`")))
    }
}
