//! Continuous double-auction matching.
//!
//! The engine owns the book and the trade tape. Every operation takes
//! `&mut self` and runs to completion, so observers never see a partially
//! applied match.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::SimpleSerialize;
use tracing::{debug, warn};

use crate::engine::{EngineConfig, TradeSummary, TradeTape};
use crate::orderbook::{BookSnapshot, OrderBook};
use crate::types::{EngineError, Order, OrderType, Side, Trade};

/// What happened to one submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub order_id: u64,
    pub side: Side,
    pub order_type: OrderType,
    /// Trades produced by this order, in execution order
    pub trades: Vec<Trade>,
    pub filled_quantity: u64,
    /// Quantity left resting in the book (limit orders only)
    pub resting_quantity: u64,
    /// Unfilled market quantity that was discarded
    pub cancelled_quantity: u64,
}

impl Execution {
    #[inline]
    pub fn fully_filled(&self) -> bool {
        self.resting_quantity == 0 && self.cancelled_quantity == 0
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.resting_quantity > 0
    }
}

/// Result of a cancellation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The order was resting and has been removed
    Cancelled(Order),
    /// No resting order had this id; nothing changed
    NotFound(u64),
}

impl CancelOutcome {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CancelOutcome::Cancelled(_))
    }

    /// Turn `NotFound` into [`EngineError::OrderNotFound`]
    pub fn into_result(self) -> Result<Order, EngineError> {
        match self {
            CancelOutcome::Cancelled(order) => Ok(order),
            CancelOutcome::NotFound(order_id) => Err(EngineError::OrderNotFound { order_id }),
        }
    }
}

/// Single-instrument matching engine with price-time priority.
///
/// ## Example
///
/// ```
/// use limit_book::engine::MatchingEngine;
/// use limit_book::types::Side;
///
/// let mut engine = MatchingEngine::new();
/// engine.submit_limit_order(1, Side::Buy, 1_000_000_000, 5).unwrap();
/// let execution = engine.submit_limit_order(2, Side::Sell, 1_000_000_000, 3).unwrap();
///
/// assert_eq!(execution.trades.len(), 1);
/// assert_eq!(execution.trades[0].buy_order_id, 1);
/// assert_eq!(engine.order(1).map(|o| o.remaining), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    book: OrderBook,
    tape: TradeTape,
    next_sequence: u64,
    next_trade_id: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::with_capacity(config.order_capacity),
            tape: TradeTape::with_capacity(config.trade_capacity),
            next_sequence: 0,
            next_trade_id: 1,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Submit a limit order.
    ///
    /// Matches against the opposite side while prices cross, then rests any
    /// remainder. Rejections (`InvalidQuantity`, `InvalidPrice`,
    /// `DuplicateOrderId`, `QuantityOverflow`) leave the engine unchanged.
    pub fn submit_limit_order(
        &mut self,
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> Result<Execution, EngineError> {
        let rejection = if quantity == 0 {
            Some(EngineError::InvalidQuantity { order_id: id })
        } else if price == 0 {
            Some(EngineError::InvalidPrice { order_id: id })
        } else if self.book.contains_order(id) {
            Some(EngineError::DuplicateOrderId { order_id: id })
        } else if !self.has_room(side, quantity, true) {
            Some(EngineError::QuantityOverflow { order_id: id })
        } else {
            None
        };
        if let Some(err) = rejection {
            warn!(order_id = id, %side, price, quantity, error = %err, "limit order rejected");
            return Err(err);
        }

        let mut incoming = Order::limit(id, side, price, quantity, self.next_sequence());
        debug!(order_id = id, %side, price, quantity, sequence = incoming.sequence, "limit order accepted");

        let trades = self.match_incoming(&mut incoming);
        let resting_quantity = incoming.remaining;
        if resting_quantity > 0 {
            self.book.add_order(incoming)?;
            debug!(order_id = id, %side, price, resting_quantity, "order resting");
        }

        Ok(Execution {
            order_id: id,
            side,
            order_type: OrderType::Limit,
            trades,
            filled_quantity: quantity - resting_quantity,
            resting_quantity,
            cancelled_quantity: 0,
        })
    }

    /// Submit a market order.
    ///
    /// Crosses against any resting price while liquidity remains. The
    /// unfilled remainder is discarded; the id is only used to label trades.
    pub fn submit_market_order(
        &mut self,
        id: u64,
        side: Side,
        quantity: u64,
    ) -> Result<Execution, EngineError> {
        let rejection = if quantity == 0 {
            Some(EngineError::InvalidQuantity { order_id: id })
        } else if !self.has_room(side, quantity, false) {
            Some(EngineError::QuantityOverflow { order_id: id })
        } else {
            None
        };
        if let Some(err) = rejection {
            warn!(order_id = id, %side, quantity, error = %err, "market order rejected");
            return Err(err);
        }

        let mut incoming = Order::market(id, side, quantity, self.next_sequence());
        debug!(order_id = id, %side, quantity, sequence = incoming.sequence, "market order accepted");

        let trades = self.match_incoming(&mut incoming);
        let cancelled_quantity = incoming.remaining;
        if cancelled_quantity > 0 {
            debug!(order_id = id, cancelled_quantity, "market remainder discarded");
        }

        Ok(Execution {
            order_id: id,
            side,
            order_type: OrderType::Market,
            trades,
            filled_quantity: quantity - cancelled_quantity,
            resting_quantity: 0,
            cancelled_quantity,
        })
    }

    /// Cancel a resting order. Unknown ids report `NotFound` and change nothing.
    pub fn cancel_order(&mut self, id: u64) -> CancelOutcome {
        match self.book.cancel_order(id) {
            Some(order) => {
                debug!(order_id = id, side = %order.side(), remaining = order.remaining, "order cancelled");
                CancelOutcome::Cancelled(order)
            }
            None => {
                warn!(order_id = id, "cancel for unknown order");
                CancelOutcome::NotFound(id)
            }
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Match `incoming` against the opposite side until it is filled or
    /// the best resting price no longer crosses.
    fn match_incoming(&mut self, incoming: &mut Order) -> Vec<Trade> {
        let side = incoming.side();
        let opposite = side.opposite();
        let mut trades = Vec::new();

        while incoming.remaining > 0 {
            let Some(key) = self.book.best_head(opposite) else {
                break;
            };
            let (resting_price, resting_remaining) = {
                let resting = self.book.get_order(key).expect("best level head missing from slab");
                (resting.price, resting.remaining)
            };
            if !side.crosses(incoming.price, resting_price) {
                break;
            }

            let quantity = incoming.remaining.min(resting_remaining);
            let maker = self.book.fill_resting(key, quantity);
            incoming.fill(quantity);

            let trade = Trade::between(self.next_trade_id(), &maker, incoming, quantity);
            debug!(
                trade_id = trade.id,
                buy_order_id = trade.buy_order_id,
                sell_order_id = trade.sell_order_id,
                price = trade.price,
                quantity,
                "trade"
            );
            self.tape.push(trade.clone());
            trades.push(trade);
        }

        trades
    }

    /// Worst case for `quantity` on `side`: all available opposite liquidity
    /// trades at the highest opposite price, or every unit rests.
    fn has_room(&self, side: Side, quantity: u64, may_rest: bool) -> bool {
        let opposite = self.book.side(side.opposite());
        let tradeable = quantity.min(opposite.total_quantity());
        let price_bound = opposite.highest_price().unwrap_or(0);
        self.tape.has_room(tradeable, price_bound)
            && (!may_rest || self.book.side(side).has_room(quantity))
    }

    #[inline]
    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    #[inline]
    fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn book_snapshot(&self) -> BookSnapshot {
        self.book.snapshot()
    }

    pub fn trade_summary(&self) -> TradeSummary {
        self.tape.summary()
    }

    #[inline]
    pub fn trades(&self) -> &[Trade] {
        self.tape.trades()
    }

    #[inline]
    pub fn tape(&self) -> &TradeTape {
        &self.tape
    }

    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    #[inline]
    pub fn spread(&self) -> Option<u64> {
        self.book.spread()
    }

    /// Resting order by id
    #[inline]
    pub fn order(&self, id: u64) -> Option<&Order> {
        self.book.order(id)
    }

    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.book.contains_order(id)
    }

    #[inline]
    pub fn resting_order_count(&self) -> usize {
        self.book.order_count()
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every resting order (bids then asks,
    /// priority order) followed by every trade on the tape.
    ///
    /// Identical command sequences produce identical roots.
    pub fn state_root(&self) -> Result<[u8; 32], EngineError> {
        let mut hasher = Sha256::new();

        for side in [Side::Buy, Side::Sell] {
            for order in self.book.resting_orders(side) {
                hasher.update(encode(order)?);
            }
        }
        for trade in self.tape.trades() {
            hasher.update(encode(trade)?);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    pub fn state_root_hex(&self) -> Result<String, EngineError> {
        self.state_root().map(hex::encode)
    }
}

fn encode<T: SimpleSerialize>(value: &T) -> Result<Vec<u8>, EngineError> {
    ssz_rs::serialize(value).map_err(|e| EngineError::Serialization(format!("{e:?}")))
}

// ============================================================================
// Unit Tests
// ============================================================================
