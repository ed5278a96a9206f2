//! Resting liquidity for one instrument.
//!
//! ## Architecture
//!
//! - **Slab**: owns every resting order node, O(1) insert/remove/lookup
//! - **BookSide** x2: BTreeMap of price levels holding slab keys
//! - **OrderIndex**: order id to (side, price, slab key) for O(1) cancel
//!
//! Every method that changes a price level updates the index in the same
//! call, so the index never points at a removed order.
//!
//! ## Example
//!
//! ```
//! use limit_book::orderbook::OrderBook;
//! use limit_book::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(16);
//! book.add_order(Order::limit(1, Side::Buy, 1_000_000_000, 5, 0)).unwrap();
//! book.add_order(Order::limit(2, Side::Sell, 1_100_000_000, 5, 1)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(1_000_000_000));
//! assert_eq!(book.best_ask(), Some(1_100_000_000));
//! assert_eq!(book.spread(), Some(100_000_000));
//! ```

use slab::Slab;

use crate::orderbook::{BookSide, BookSnapshot, LevelSnapshot, OrderIndex, OrderLocation, OrderNode};
use crate::types::{EngineError, Order, Side};

/// Both sides of the book plus the storage and index they share.
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Slab<OrderNode>,
    bids: BookSide,
    asks: BookSide,
    index: OrderIndex,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` pre-allocated slots
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            index: OrderIndex::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    // ========================================================================
    // Sides
    // ========================================================================

    #[inline]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    #[inline]
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// best_ask - best_bid, or None if either side is empty or the book is crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Rest a limit order at the tail of its price level.
    ///
    /// Returns the slab key. Fails with no state change on `DuplicateOrderId`
    /// if the id is already resting, or `QuantityOverflow` if the side's
    /// resting total cannot absorb the order.
    pub fn add_order(&mut self, order: Order) -> Result<usize, EngineError> {
        debug_assert!(!order.is_market(), "market orders never rest");
        debug_assert!(order.remaining > 0, "resting order must have quantity");

        let order_id = order.id;
        if self.index.contains(order_id) {
            return Err(EngineError::DuplicateOrderId { order_id });
        }
        let side = order.side();
        if !self.side(side).has_room(order.remaining) {
            return Err(EngineError::QuantityOverflow { order_id });
        }

        let price = order.price;
        let key = self.orders.insert(OrderNode::new(order));

        match side {
            Side::Buy => self.bids.insert(key, &mut self.orders),
            Side::Sell => self.asks.insert(key, &mut self.orders),
        }
        self.index.insert(order_id, OrderLocation { side, price, key })?;

        Ok(key)
    }

    /// Remove a resting order by id. Returns None if it is not resting.
    pub fn cancel_order(&mut self, order_id: u64) -> Option<Order> {
        let location = self.index.get(order_id)?;
        Some(self.remove_at(order_id, location))
    }

    fn remove_at(&mut self, order_id: u64, location: OrderLocation) -> Order {
        let OrderLocation { side, price, key } = location;
        match side {
            Side::Buy => self.bids.remove(price, key, &mut self.orders),
            Side::Sell => self.asks.remove(price, key, &mut self.orders),
        };
        self.index.remove(order_id);
        self.orders.remove(key).order
    }

    /// Slab key of the earliest order at the best price of `side`
    #[inline]
    pub fn best_head(&self, side: Side) -> Option<usize> {
        self.side(side).best()?.peek_head()
    }

    /// Fill `quantity` of the resting order at `key`.
    ///
    /// Keeps the level total in step with the fill and, once the order is
    /// exhausted, removes it from its level, the index and the slab.
    /// Returns the maker's state after the fill.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a resting order.
    pub fn fill_resting(&mut self, key: usize, quantity: u64) -> Order {
        let node = self.orders.get_mut(key).expect("filled key missing from slab");
        let filled = node.fill(quantity);
        let (side, price, order_id) = (node.side(), node.price(), node.order_id());
        let exhausted = node.is_filled();

        self.side_mut(side).reduce_quantity(price, filled);
        if exhausted {
            return self.remove_at(order_id, OrderLocation { side, price, key });
        }
        self.orders[key].order.clone()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    pub fn get_order(&self, key: usize) -> Option<&Order> {
        self.orders.get(key).map(|node| &node.order)
    }

    /// Resting order by id
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let location = self.index.get(order_id)?;
        self.get_order(location.key)
    }

    #[inline]
    pub fn location(&self, order_id: u64) -> Option<OrderLocation> {
        self.index.get(order_id)
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    #[inline]
    pub fn index(&self) -> &OrderIndex {
        &self.index
    }

    /// Resting orders of one side in priority order: best price first, then arrival.
    pub fn resting_orders(&self, side: Side) -> impl Iterator<Item = &Order> + '_ {
        self.side(side)
            .levels()
            .flat_map(move |level| level.iter(&self.orders))
    }

    /// Read-only view of both sides in priority order
    pub fn snapshot(&self) -> BookSnapshot {
        let levels = |side: &BookSide| -> Vec<LevelSnapshot> {
            side.levels()
                .map(|level| LevelSnapshot {
                    price: level.price,
                    total_quantity: level.total_quantity,
                    orders: level
                        .iter(&self.orders)
                        .map(|order| (order.id, order.remaining))
                        .collect(),
                })
                .collect()
        };

        BookSnapshot {
            bids: levels(&self.bids),
            asks: levels(&self.asks),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
