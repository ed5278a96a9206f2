//! One side of the book: price levels in execution priority.
//!
//! Both sides share this implementation. The `Side` given at construction
//! only decides which end of the price map is "best":
//!
//! - **Bids**: highest price first (last key of the map)
//! - **Asks**: lowest price first (first key of the map)

use std::collections::BTreeMap;

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::Side;

/// Ordered collection of [`PriceLevel`]s for one side of the book.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
    order_count: usize,
    total_quantity: u64,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            order_count: 0,
            total_quantity: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Best-priority level, O(log n)
    pub fn best(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        }
    }

    /// Best-priority price
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.best().map(|level| level.price)
    }

    /// Level at an exact price
    #[inline]
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels in execution priority (best first)
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Highest resting price regardless of priority
    #[inline]
    pub fn highest_price(&self) -> Option<u64> {
        self.levels.keys().next_back().copied()
    }

    /// Whether `quantity` more can rest here without overflowing the totals
    #[inline]
    pub fn has_room(&self, quantity: u64) -> bool {
        self.total_quantity.checked_add(quantity).is_some()
    }

    /// Append a slab node to the tail of its price level, creating the level if needed.
    pub fn insert(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get(key).expect("inserted key missing from slab");
        debug_assert_eq!(node.side(), self.side, "order inserted on the wrong side");
        debug_assert!(node.remaining() > 0, "resting order must have quantity");
        let (price, quantity) = (node.price(), node.remaining());
        debug_assert!(self.has_room(quantity), "side total would overflow");

        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(key, slab);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink one order from the level at `price`, dropping the level once empty.
    ///
    /// Returns the order's remaining quantity.
    pub fn remove(&mut self, price: u64, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let level = self
            .levels
            .get_mut(&price)
            .expect("price level missing for resting order");
        let quantity = level.remove(key, slab);
        if level.is_empty() {
            self.levels.remove(&price);
        }
        self.order_count -= 1;
        self.total_quantity -= quantity;
        quantity
    }

    /// Account for a partial fill at `price`
    pub fn reduce_quantity(&mut self, price: u64, filled: u64) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.reduce_quantity(filled);
            self.total_quantity -= filled;
        }
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total resting quantity across every level
    #[inline]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }
}
