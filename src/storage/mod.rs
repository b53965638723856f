pub mod json_store;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::ledger::Books;

/// Abstraction over persistence backends for the tracked collections and the
/// dashboard window scalar.
pub trait StorageBackend: Send + Sync {
    /// Loads all three collections. Missing or unreadable data loads empty.
    fn load_books(&self) -> Result<Books>;

    /// Writes all three collections. The writes are sequential per file with
    /// no cross-file atomicity; an interruption can leave the collections
    /// mutually inconsistent.
    fn commit(&self, books: &Books) -> Result<()>;

    /// The dashboard aggregation window start, defaulting to the first
    /// instant of the current calendar month when never reset.
    fn dashboard_start(&self) -> Result<DateTime<Utc>>;

    fn save_dashboard_start(&self, start: DateTime<Utc>) -> Result<()>;

    /// Populates the default accounts once, only when none were ever saved.
    /// Returns whether seeding happened.
    fn seed(&self) -> Result<bool>;
}

pub use json_store::JsonStore;
