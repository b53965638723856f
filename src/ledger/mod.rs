//! The ledger core: pure transaction application, the in-memory books, and
//! read-side dashboard aggregation.

pub mod apply;
pub mod books;
pub mod summary;

pub use apply::apply;
pub use books::Books;
pub use summary::{summarize, AssetSlice, DashboardSummary};
