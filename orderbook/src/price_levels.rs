use crate::types::{Order, Side};
use std::collections::{BTreeMap, VecDeque};

/// An order owned by the book, tagged with its arrival sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestingOrder {
    pub order: Order,
    /// Assigned when the order starts resting, strictly increasing across the book
    pub seq: u64,
}

// Structured price levels, FIFO tracking with BTreeMap
// side determines which end of the map is the best
// - Sell: lowest price is best (front of map)
// - Buy: highest price is best (back of map)
// Each queue is ordered by arrival sequence and never left empty.
pub struct PriceLevels {
    side: Side,
    /// price mapped to the orders resting at that price, earliest first
    levels: BTreeMap<i64, VecDeque<RestingOrder>>,
    /// total resting orders across all levels
    count: usize,
}

impl PriceLevels {
    /// Creates empty price levels for given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            count: 0,
        }
    }

    /// Appends an order behind everything already resting at its price.
    /// Creates the price level if it does not exist yet.
    pub fn push(&mut self, order: Order, seq: u64) {
        debug_assert_eq!(order.side, self.side);
        debug_assert!(order.qty > 0);

        let queue = self.levels.entry(order.price).or_default();
        debug_assert!(queue.back().map_or(true, |last| last.seq < seq));
        queue.push_back(RestingOrder { order, seq });
        self.count += 1;
    }

    /// Returns the best price for the side without removing anything
    /// Returns None if no price levels currently exist
    pub fn best_price(&self) -> Option<i64> {
        match self.side {
            Side::Sell => self.levels.first_key_value().map(|(px, _)| *px),
            Side::Buy => self.levels.last_key_value().map(|(px, _)| *px),
        }
    }

    /// Highest priority order, mutable so a partial fill can be applied in place.
    pub fn best_mut(&mut self) -> Option<&mut RestingOrder> {
        let level = match self.side {
            Side::Sell => self.levels.values_mut().next(),
            Side::Buy => self.levels.values_mut().next_back(),
        }?;
        level.front_mut()
    }

    /// Removes and returns the highest priority order.
    /// Cleans up the level when its queue is emptied.
    pub fn pop_best(&mut self) -> Option<RestingOrder> {
        let px = self.best_price()?;
        let q = self.levels.get_mut(&px)?;
        let order = q.pop_front();
        if q.is_empty() {
            self.levels.remove(&px);
        }
        if order.is_some() {
            self.count -= 1;
        }
        order
    }

    /// Walks every resting order in priority order: best price first,
    /// earliest arrival first within a price.
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> + '_ {
        let levels: Box<dyn Iterator<Item = &VecDeque<RestingOrder>> + '_> = match self.side {
            Side::Sell => Box::new(self.levels.values()),
            Side::Buy => Box::new(self.levels.values().rev()),
        };
        levels.flatten()
    }

    /// Number of resting orders across all prices
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
