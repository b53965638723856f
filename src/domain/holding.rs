use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An aggregated position in one ticker symbol.
///
/// At most one holding exists per distinct symbol; the symbol is the natural
/// lookup key. Holdings never persist at zero or negative quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockHolding {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub average_buy_price: f64,
    pub current_price: f64,
}

impl StockHolding {
    /// Creates a holding for a first purchase: the cost basis and the market
    /// price both start at the purchase price.
    pub fn opened(symbol: impl Into<String>, quantity: f64, price_per_share: f64) -> Self {
        let symbol = symbol.into().to_uppercase();
        Self {
            id: Uuid::new_v4(),
            name: symbol.clone(),
            symbol,
            quantity,
            average_buy_price: price_per_share,
            current_price: price_per_share,
        }
    }

    /// Market value at the last manually entered price.
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Total cost basis of the position.
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.average_buy_price
    }
}
