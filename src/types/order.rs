//! Order types for the limit order book.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so the resting book can be
//! encoded deterministically when computing the engine state root.
//! Enum fields are stored as raw `u8` for SSZ compatibility.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price`]).
//! Quantities are plain integer units.

use std::fmt;

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Crossing price used by market orders on this side.
    ///
    /// A market buy will pay any ask and a market sell will hit any bid,
    /// so the sentinel sits at the far end of the price range.
    #[inline]
    pub fn market_price(self) -> u64 {
        match self {
            Side::Buy => u64::MAX,
            Side::Sell => 0,
        }
    }

    /// Whether an incoming order on this side with `limit` may trade against
    /// a resting order priced at `resting`.
    ///
    /// ```
    /// use limit_book::types::Side;
    ///
    /// assert!(Side::Buy.crosses(10, 9));
    /// assert!(!Side::Buy.crosses(10, 11));
    /// assert!(Side::Sell.crosses(10, 11));
    /// assert!(!Side::Sell.crosses(10, 9));
    /// ```
    #[inline]
    pub fn crosses(self, limit: u64, resting: u64) -> bool {
        match self {
            Side::Buy => resting <= limit,
            Side::Sell => resting >= limit,
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

// ============================================================================
// OrderType enum
// ============================================================================

/// Order type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Executes at the limit price or better; the remainder rests
    #[default]
    Limit,
    /// Executes against any resting price; the remainder is discarded
    Market,
}

impl OrderType {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::Market => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::Limit),
            1 => Some(OrderType::Market),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order submitted to the book.
///
/// ## SSZ Layout
///
/// Fixed-size container, 42 bytes:
/// id (8) + side_raw (1) + order_type_raw (1) + price (8) + quantity (8)
/// + remaining (8) + sequence (8).
///
/// ## Example
///
/// ```
/// use limit_book::types::{Order, Side};
///
/// // Buy 5 units at 10.00000000, arrival sequence 0
/// let order = Order::limit(1, Side::Buy, 1_000_000_000, 5, 0);
/// assert_eq!(order.remaining, 5);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Caller-assigned order identifier
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Order type as u8 (0=Limit, 1=Market)
    pub order_type_raw: u8,

    /// Crossing price in fixed-point (scaled by 10^8).
    /// For market orders this is the side's sentinel.
    pub price: u64,

    /// Original quantity
    pub quantity: u64,

    /// Remaining quantity, decremented as the order is matched
    pub remaining: u64,

    /// Arrival sequence assigned by the engine
    pub sequence: u64,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `id` - Caller-assigned order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Limit price in fixed-point (scaled by 10^8)
    /// * `quantity` - Order size
    /// * `sequence` - Arrival sequence
    pub fn limit(id: u64, side: Side, price: u64, quantity: u64, sequence: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            order_type_raw: OrderType::Limit.to_u8(),
            price,
            quantity,
            remaining: quantity,
            sequence,
        }
    }

    /// Create a new market order carrying the side's sentinel price
    ///
    /// ```
    /// use limit_book::types::{Order, OrderType, Side};
    ///
    /// let order = Order::market(4, Side::Buy, 2, 1);
    /// assert_eq!(order.order_type(), OrderType::Market);
    /// assert_eq!(order.price, u64::MAX);
    /// ```
    pub fn market(id: u64, side: Side, quantity: u64, sequence: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            order_type_raw: OrderType::Market.to_u8(),
            price: side.market_price(),
            quantity,
            remaining: quantity,
            sequence,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the order type
    pub fn order_type(&self) -> OrderType {
        OrderType::from_u8(self.order_type_raw).unwrap_or(OrderType::Limit)
    }

    /// Check if this is a market order
    #[inline]
    pub fn is_market(&self) -> bool {
        self.order_type() == OrderType::Market
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (capped at the remaining quantity)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
