use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeZone, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::{Account, AccountKind, StockHolding, Transaction};
use crate::errors::Result;
use crate::ledger::Books;
use crate::utils::{app_data_dir, ensure_dir, state_file_in};

use super::StorageBackend;

const ACCOUNTS_FILE: &str = "accounts.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const HOLDINGS_FILE: &str = "holdings.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file persistence under the application data directory: one file per
/// logical collection plus a small state file for scalars.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
    state_file: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dashboard_start: Option<DateTime<Utc>>,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let state_file = state_file_in(&root);
        Ok(Self { root, state_file })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accounts_path(&self) -> PathBuf {
        self.root.join(ACCOUNTS_FILE)
    }

    fn transactions_path(&self) -> PathBuf {
        self.root.join(TRANSACTIONS_FILE)
    }

    fn holdings_path(&self) -> PathBuf {
        self.root.join(HOLDINGS_FILE)
    }

    pub fn get_accounts(&self) -> Result<Vec<Account>> {
        read_collection(&self.accounts_path())
    }

    pub fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        write_json(&self.accounts_path(), accounts)
    }

    pub fn get_transactions(&self) -> Result<Vec<Transaction>> {
        read_collection(&self.transactions_path())
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        write_json(&self.transactions_path(), transactions)
    }

    pub fn get_holdings(&self) -> Result<Vec<StockHolding>> {
        read_collection(&self.holdings_path())
    }

    pub fn save_holdings(&self, holdings: &[StockHolding]) -> Result<()> {
        write_json(&self.holdings_path(), holdings)
    }

    fn read_state(&self) -> Result<StoreState> {
        if !self.state_file.exists() {
            return Ok(StoreState::default());
        }
        let data = fs::read_to_string(&self.state_file)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_state(&self, state: &StoreState) -> Result<()> {
        write_json(&self.state_file, state)
    }
}

impl StorageBackend for JsonStore {
    fn load_books(&self) -> Result<Books> {
        Ok(Books::new(
            self.get_accounts()?,
            self.get_transactions()?,
            self.get_holdings()?,
        ))
    }

    fn commit(&self, books: &Books) -> Result<()> {
        self.save_accounts(&books.accounts)?;
        self.save_transactions(&books.transactions)?;
        self.save_holdings(&books.holdings)?;
        Ok(())
    }

    fn dashboard_start(&self) -> Result<DateTime<Utc>> {
        Ok(self
            .read_state()?
            .dashboard_start
            .unwrap_or_else(month_start))
    }

    fn save_dashboard_start(&self, start: DateTime<Utc>) -> Result<()> {
        let mut state = self.read_state()?;
        state.dashboard_start = Some(start);
        self.write_state(&state)
    }

    fn seed(&self) -> Result<bool> {
        if self.accounts_path().exists() {
            return Ok(false);
        }
        let defaults = vec![
            Account::new("Main Bank", AccountKind::Bank, 2500.0),
            Account::new("Cash Wallet", AccountKind::Cash, 150.0),
        ];
        self.save_accounts(&defaults)?;
        tracing::info!("Seeded default accounts.");
        Ok(true)
    }
}

/// First instant of the current calendar month in local time, as UTC.
fn month_start() -> DateTime<Utc> {
    let today = Local::now().date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let midnight = first.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    match serde_json::from_str(&data) {
        Ok(items) => Ok(items),
        Err(err) => {
            // Unreadable collections degrade to empty instead of blocking
            // startup; the file is left in place for inspection.
            tracing::warn!("Could not parse {}: {err}", path.display());
            Ok(Vec::new())
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (JsonStore, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let store = JsonStore::new(Some(dir.path().to_path_buf())).expect("create store");
        (store, dir)
    }

    #[test]
    fn seed_runs_only_once() {
        let (store, _dir) = store();
        assert!(store.seed().unwrap());
        assert!(!store.seed().unwrap());

        let accounts = store.get_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "Main Bank");
        assert_eq!(accounts[0].balance, 2500.0);
    }

    #[test]
    fn seed_respects_existing_empty_collection() {
        let (store, _dir) = store();
        store.save_accounts(&[]).unwrap();
        assert!(!store.seed().unwrap());
        assert!(store.get_accounts().unwrap().is_empty());
    }

    #[test]
    fn corrupt_collection_loads_empty() {
        let (store, dir) = store();
        fs::write(dir.path().join("accounts.json"), "{not json").unwrap();
        assert!(store.get_accounts().unwrap().is_empty());
    }

    #[test]
    fn dashboard_start_defaults_to_month_start_until_reset() {
        let (store, _dir) = store();
        let default_start = store.dashboard_start().unwrap();
        assert_eq!(default_start.with_timezone(&Local).day(), 1);

        let reset = Utc::now();
        store.save_dashboard_start(reset).unwrap();
        assert_eq!(store.dashboard_start().unwrap(), reset);
    }
}
