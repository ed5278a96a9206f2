//! # limit-book
//!
//! Single-instrument limit order book with continuous price-time priority
//! matching.
//!
//! ## Architecture
//!
//! - **Types**: Order, Trade, fixed-point prices, errors
//! - **OrderBook**: slab-backed price levels, bid/ask sides, order index
//! - **Engine**: matching, trade tape, reporting
//! - **Console**: the line-based command shell used by the binary
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical command sequences give identical books, trades and state roots
//! 2. **No Floating Point**: prices are u64 scaled by 10^8
//! 3. **Pre-allocated Memory**: slab allocation for resting orders
//! 4. **Synchronous Execution**: one `&mut self` operation at a time, no async
//!
//! ## Example
//!
//! ```
//! use limit_book::{MatchingEngine, Side};
//!
//! let mut engine = MatchingEngine::new();
//! engine.submit_limit_order(5, Side::Buy, 1_000_000_000, 1).unwrap();
//! engine.submit_limit_order(6, Side::Buy, 1_100_000_000, 1).unwrap();
//! let execution = engine.submit_limit_order(7, Side::Sell, 1_000_000_000, 2).unwrap();
//!
//! let prices: Vec<u64> = execution.trades.iter().map(|t| t.price).collect();
//! assert_eq!(prices, vec![1_100_000_000, 1_000_000_000]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Trade, prices, errors
pub mod types;

/// Order book: price levels, sides and index
pub mod orderbook;

/// Matching engine, trade tape and configuration
pub mod engine;

/// Console command parsing and session loop
pub mod console;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{EngineError, Order, OrderType, Side, Trade};
pub use orderbook::{BookSide, BookSnapshot, LevelSnapshot, OrderBook, OrderIndex, PriceLevel};
pub use engine::{CancelOutcome, EngineConfig, Execution, MatchingEngine, TradeSummary, TradeTape};
