//! Error types for the matching engine.
//!
//! Every variant is recoverable: a rejected operation leaves the book,
//! the index and the trade tape exactly as they were.

use thiserror::Error;

/// Errors returned by [`MatchingEngine`](crate::engine::MatchingEngine) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Quantity was zero
    #[error("invalid quantity for order {order_id}: must be greater than zero")]
    InvalidQuantity { order_id: u64 },

    /// Limit price was zero
    #[error("invalid price for order {order_id}: must be greater than zero")]
    InvalidPrice { order_id: u64 },

    /// An order with this id is already resting
    #[error("order {order_id} is already resting in the book")]
    DuplicateOrderId { order_id: u64 },

    /// Accepting the order could overflow a resting or traded volume total
    #[error("order {order_id} would overflow the book or tape volume totals")]
    QuantityOverflow { order_id: u64 },

    /// No resting order with this id
    #[error("order {order_id} not found")]
    OrderNotFound { order_id: u64 },

    /// SSZ encoding failed while hashing the state root
    #[error("serialization failed: {0}")]
    Serialization(String),
}
