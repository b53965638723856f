#![doc(test(attr(deny(warnings))))]

//! Finance Core tracks accounts, transactions, and stock holdings for a
//! single user, persisting everything as JSON and exposing the pure ledger
//! primitives that the CLI builds on.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
