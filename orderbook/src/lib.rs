//! Single-instrument limit order book with continuous price-time priority matching.
//!
//! Core features:
//! - Price-time priority matching (best price first, then earliest arrival)
//! - Partial fills on both the active and the passive order
//! - Trades always execute at the passive (resting) order's price
//! - All-or-nothing submission: rejected orders leave the book untouched

pub mod error;
pub mod price_levels;
pub mod types;

pub use error::OrderError;
pub use price_levels::{PriceLevels, RestingOrder};
pub use types::{Order, OrderId, Side, Trade};

use std::collections::HashSet;

/// Central limit order book with separate buy/sell sides.
///
/// Not thread-safe - callers sharing a book must serialize `submit` and
/// `orders` behind a single owner or a lock.
pub struct OrderBook {
    /// Buy orders, highest price first
    bids: PriceLevels,
    /// Sell orders, lowest price first
    asks: PriceLevels,
    /// Ids currently resting on either side. The price levels own the orders.
    resting_ids: HashSet<OrderId>,
    /// Arrival sequence handed to the next order that rests
    next_seq: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Creates empty order book.
    pub fn new() -> Self {
        Self {
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
            resting_ids: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Submits a limit order, returns the trades it generated in execution order.
    ///
    /// The order is matched against the opposite side while prices cross.
    /// Any remaining quantity rests on its own side behind every order
    /// already resting at the same price. The book works on its own copy;
    /// the caller's value is never touched.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Trade>, OrderError> {
        self.validate(&order)?;

        let mut active = order;
        let trades = {
            let passive = match active.side.opposite() {
                Side::Buy => &mut self.bids,
                Side::Sell => &mut self.asks,
            };
            Self::match_against(passive, &mut self.resting_ids, &mut active)
        };

        if active.qty > 0 {
            self.rest(active);
        }

        Ok(trades)
    }

    /// Snapshot of the resting orders on one side in priority order.
    pub fn orders(&self, side: Side) -> Vec<Order> {
        self.side(side).iter().map(|resting| resting.order).collect()
    }

    /// Returns current best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<i64> {
        self.bids.best_price()
    }

    /// Returns current best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<i64> {
        self.asks.best_price()
    }

    /// Whether an order with this id is currently resting on either side.
    pub fn contains(&self, id: OrderId) -> bool {
        self.resting_ids.contains(&id)
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    fn validate(&self, order: &Order) -> Result<(), OrderError> {
        if order.qty <= 0 {
            return Err(OrderError::InvalidQuantity { qty: order.qty });
        }
        if order.price <= 0 {
            return Err(OrderError::InvalidPrice { price: order.price });
        }
        if self.resting_ids.contains(&order.id) {
            return Err(OrderError::DuplicateId(order.id));
        }
        Ok(())
    }

    /// Walks the passive side in priority order until the active order is
    /// filled or the next passive price no longer crosses. Every later
    /// passive order has an equal or worse price, so stopping there is exact.
    fn match_against(
        passive: &mut PriceLevels,
        resting_ids: &mut HashSet<OrderId>,
        active: &mut Order,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        while active.qty > 0 {
            let Some(maker) = passive.best_mut() else {
                break; // Opposite side empty
            };

            if !active.side.crosses(active.price, maker.order.price) {
                break;
            }

            let fill = active.qty.min(maker.order.qty);
            active.qty -= fill;
            maker.order.qty -= fill;

            trades.push(Trade {
                active: active.id,
                passive: maker.order.id,
                price: maker.order.price, // Trade at passive price
                qty: fill,
            });

            if maker.order.qty == 0 {
                let filled = maker.order.id;
                passive.pop_best();
                resting_ids.remove(&filled);
            }
        }

        trades
    }

    fn rest(&mut self, order: Order) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.resting_ids.insert(order.id);
        match order.side {
            Side::Buy => self.bids.push(order, seq),
            Side::Sell => self.asks.push(order, seq),
        }
    }

    fn side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }
}
