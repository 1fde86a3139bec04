use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an active order on this side trades against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether an active order on this side priced at `active_px` can trade
    /// with a resting order priced at `passive_px`.
    ///
    /// - Buy: crosses when willing to pay at least the resting ask
    /// - Sell: crosses when willing to accept at most the resting bid
    pub fn crosses(self, active_px: i64, passive_px: i64) -> bool {
        match self {
            Side::Buy => active_px >= passive_px,
            Side::Sell => active_px <= passive_px,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// Opaque order identifier. Carries no time meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: i64, // integer price
    pub qty: i64,   // remaining quantity
}

impl Order {
    pub fn new(id: OrderId, side: Side, price: i64, qty: i64) -> Self {
        Self {
            id,
            side,
            price,
            qty,
        }
    }
}

/// A single execution between the active (incoming) and a passive (resting) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub active: OrderId,
    pub passive: OrderId,
    pub price: i64, // always the passive order's price
    pub qty: i64,
}
