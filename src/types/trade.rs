//! Trade type representing an executed match between two orders.

use ssz_rs::prelude::*;

use crate::types::{Order, Side};

/// A trade represents a single match between a maker and a taker order.
///
/// ## Terminology
///
/// - **Maker**: The resting order that was already in the book
/// - **Taker**: The incoming order that triggered the match
///
/// The trade always executes at the maker's price. The buy/sell ids are
/// assigned by side, independently of which order was the taker.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Trade identifier assigned by the engine (starts at 1)
    pub id: u64,

    /// ID of the buying order
    pub buy_order_id: u64,

    /// ID of the selling order
    pub sell_order_id: u64,

    /// ID of the resting order
    pub maker_order_id: u64,

    /// ID of the incoming order
    pub taker_order_id: u64,

    /// Execution price in fixed-point (scaled by 10^8), always the maker's price
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,

    /// Arrival sequence of the taker that produced this trade
    pub sequence: u64,
}

impl Trade {
    /// Build a trade between a resting `maker` and an incoming `taker`.
    ///
    /// ```
    /// use limit_book::types::{Order, Side, Trade};
    ///
    /// let maker = Order::limit(1, Side::Buy, 1_000_000_000, 5, 0);
    /// let taker = Order::limit(2, Side::Sell, 1_000_000_000, 3, 1);
    /// let trade = Trade::between(1, &maker, &taker, 3);
    ///
    /// assert_eq!(trade.buy_order_id, 1);
    /// assert_eq!(trade.sell_order_id, 2);
    /// assert_eq!(trade.price, 1_000_000_000);
    /// ```
    pub fn between(id: u64, maker: &Order, taker: &Order, quantity: u64) -> Self {
        let (buy_order_id, sell_order_id) = match taker.side() {
            Side::Buy => (taker.id, maker.id),
            Side::Sell => (maker.id, taker.id),
        };

        Self {
            id,
            buy_order_id,
            sell_order_id,
            maker_order_id: maker.id,
            taker_order_id: taker.id,
            price: maker.price,
            quantity,
            sequence: taker.sequence,
        }
    }

    /// Notional value of this trade (price * quantity), still scaled by 10^8.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
