//! AI-assisted natural-language transaction drafting.
//!
//! The assistant turns free text into a best-effort partial transaction that
//! pre-fills the entry form. Every field of the draft is optional and must be
//! validated by the form before the ledger core is ever invoked; the
//! assistant itself never writes state. There is no retry, timeout, or
//! cancellation: a failed call surfaces one error and leaves everything as
//! it was.

pub mod gemini;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{catalog, Account};
use crate::errors::{FinanceError, Result};

pub use gemini::GeminiClient;

/// Text-in, text-out seam over the external model.
pub trait LanguageModel {
    fn generate(&self, system_prompt: &str, input: &str) -> Result<String>;
}

/// Best-effort partial transaction returned by the model. Field names match
/// the wire contract of the original entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub source_account_id: Option<String>,
    pub destination_account_id: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub stock_symbol: Option<String>,
    pub stock_quantity: Option<f64>,
    pub stock_price: Option<f64>,
}

/// Builds the system prompt: current timestamp, an id/name snapshot of the
/// accounts, and the category catalog, plus the output rules.
pub fn build_system_prompt(accounts: &[Account]) -> String {
    let account_snapshot: Vec<serde_json::Value> = accounts
        .iter()
        .map(|account| serde_json::json!({ "id": account.id, "name": account.name }))
        .collect();
    let category_snapshot: Vec<serde_json::Value> = catalog()
        .iter()
        .map(|category| serde_json::json!({ "id": category.id, "name": category.name }))
        .collect();

    format!(
        "You are a financial data entry assistant.\n\
         Your task is to parse the user's natural language input into a JSON object representing a financial transaction.\n\
         \n\
         Current Context:\n\
         - Date: {now}\n\
         - Accounts: {accounts}\n\
         - Categories: {categories}\n\
         \n\
         Output Rules:\n\
         - Return ONLY a JSON object. No Markdown formatting.\n\
         - Fields: type (INCOME, EXPENSE, TRANSFER, STOCK_BUY, STOCK_SELL), amount, date, notes, sourceAccountId, destinationAccountId, categoryId, categoryName, stockSymbol, stockQuantity, stockPrice.\n\
         - Infer 'sourceAccountId' and 'destinationAccountId' based on the transaction type and account names provided.\n\
         - For EXPENSE: Source is Account. For INCOME: Dest is Account. For TRANSFER: both are Accounts.\n\
         - If an account is mentioned by name, try to match it to an ID. If fuzzy match fails, leave ID blank.\n\
         - If a category matches, use categoryId. If not, use categoryName for a custom category.",
        now = Utc::now().to_rfc3339(),
        accounts = serde_json::to_string(&account_snapshot).unwrap_or_else(|_| "[]".into()),
        categories = serde_json::to_string(&category_snapshot).unwrap_or_else(|_| "[]".into()),
    )
}

/// Parses the model reply into a draft, tolerating a fenced code block.
pub fn parse_draft(reply: &str) -> Result<TransactionDraft> {
    let body = strip_code_fence(reply.trim());
    serde_json::from_str(body).map_err(|err| {
        FinanceError::AssistantError(format!("unparseable assistant reply: {err}"))
    })
}

/// Runs one transcription round trip against the given model.
pub fn transcribe(
    model: &dyn LanguageModel,
    accounts: &[Account],
    input: &str,
) -> Result<TransactionDraft> {
    let prompt = build_system_prompt(accounts);
    let reply = model.generate(&prompt, input)?;
    parse_draft(&reply)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
}
